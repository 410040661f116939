use crate::error::{FlowError, Result};
use crate::graph::edge::{Edge, EdgeId};
use crate::graph::node::{Node, NodeId};
use crate::loader::raw::RawGraph;
use log::debug;
use std::collections::HashMap;

/// Origin and destination of one analysis run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Route {
    origin: NodeId,
    destination: NodeId,
}

impl Route {
    pub fn origin(&self) -> NodeId {
        self.origin
    }

    pub fn destination(&self) -> NodeId {
        self.destination
    }
}

/// Directed graph with affine edge costs. Immutable once built.
#[derive(Debug)]
pub struct Network {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    adj: Vec<Vec<EdgeId>>,
    keys: HashMap<String, NodeId>,
}

impl Network {
    pub fn build(raw: &RawGraph) -> Result<Self> {
        if !raw.directed {
            return Err(FlowError::InvalidGraph("graph is not directed".into()));
        }
        if raw.nodes.is_empty() {
            return Err(FlowError::InvalidGraph("graph has no nodes".into()));
        }

        let mut keys = HashMap::with_capacity(raw.nodes.len());
        let mut nodes = Vec::with_capacity(raw.nodes.len());
        for raw_node in &raw.nodes {
            let id = NodeId(nodes.len());
            if keys.insert(raw_node.key.clone(), id).is_some() {
                return Err(FlowError::InvalidGraph(format!(
                    "duplicate node '{}'",
                    raw_node.key
                )));
            }
            nodes.push(Node::new(id, raw_node.key.as_str()));
        }

        let mut adj: Vec<Vec<EdgeId>> = vec![Vec::new(); nodes.len()];
        let mut edges: Vec<Edge> = Vec::with_capacity(raw.edges.len());
        for raw_edge in &raw.edges {
            let lookup = |key: &str| {
                keys.get(key).copied().ok_or_else(|| {
                    FlowError::InvalidGraph(format!("edge refers to unknown node '{}'", key))
                })
            };
            let from = lookup(&raw_edge.source)?;
            let to = lookup(&raw_edge.target)?;
            if adj[from.index()]
                .iter()
                .any(|e| edges[e.index()].to() == to)
            {
                return Err(FlowError::InvalidGraph(format!(
                    "duplicate edge '{}' -> '{}'",
                    raw_edge.source, raw_edge.target
                )));
            }

            let a = raw_edge.a.unwrap_or(0.0);
            let b = raw_edge.b.unwrap_or(0.0);
            if !(a.is_finite() && b.is_finite() && a >= 0.0 && b >= 0.0) {
                return Err(FlowError::InvalidGraph(format!(
                    "edge '{}' -> '{}' has invalid coefficients a={}, b={}",
                    raw_edge.source, raw_edge.target, a, b
                )));
            }

            let id = EdgeId(edges.len());
            adj[from.index()].push(id);
            edges.push(Edge::new(id, from, to, a, b));
        }

        debug!("built network: {} nodes, {} edges", nodes.len(), edges.len());

        Ok(Self {
            nodes,
            edges,
            adj,
            keys,
        })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_by_id(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn edge_by_id(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    pub fn node_by_key(&self, key: &str) -> Option<NodeId> {
        self.keys.get(key).copied()
    }

    pub fn outgoing(&self, id: NodeId) -> &[EdgeId] {
        &self.adj[id.index()]
    }

    pub fn edge_between(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        self.outgoing(from)
            .iter()
            .copied()
            .find(|e| self.edge_by_id(*e).to() == to)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Resolves origin and destination keys. Endpoints carrying a self-loop are rejected.
    pub fn route(&self, origin: &str, destination: &str) -> Result<Route> {
        let resolve = |key: &str| {
            self.node_by_key(key)
                .ok_or_else(|| FlowError::UnknownNode(key.to_string()))
        };
        let route = Route {
            origin: resolve(origin)?,
            destination: resolve(destination)?,
        };

        for id in [route.origin, route.destination] {
            if self.edge_between(id, id).is_some() {
                return Err(FlowError::InvalidGraph(format!(
                    "self-loop on endpoint '{}'",
                    self.node_by_id(id).key()
                )));
            }
        }
        Ok(route)
    }
}
