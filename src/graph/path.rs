use crate::error::{FlowError, Result};
use crate::graph::edge::EdgeId;
use crate::graph::network::{Network, Route};
use crate::graph::node::NodeId;
use log::{debug, warn};

/// Above this many paths the enumeration logs a warning.
const PATH_COUNT_WARNING: usize = 10_000;

/// A simple directed path, stored both as visited nodes and traversed edges.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    nodes: Vec<NodeId>,
    edges: Vec<EdgeId>,
}

impl Path {
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn uses(&self, edge: EdgeId) -> bool {
        self.edges.contains(&edge)
    }

    pub fn describe(&self, network: &Network) -> String {
        self.nodes
            .iter()
            .map(|n| network.node_by_id(*n).key())
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

/// Every simple path from origin to destination, in depth-first order following
/// the insertion order of outgoing edges. The order is stable for a given network.
///
/// `limit` caps the number of paths; exceeding it fails instead of truncating.
pub fn enumerate_simple_paths(
    network: &Network,
    route: &Route,
    limit: Option<usize>,
) -> Result<Vec<Path>> {
    let origin = route.origin();
    let destination = route.destination();
    let mut paths = Vec::new();
    if origin == destination {
        return Ok(paths);
    }

    let mut on_path = vec![false; network.node_count()];
    let mut nodes = vec![origin];
    let mut edges: Vec<EdgeId> = Vec::new();
    // stack of next outgoing edge position, one entry per node on the current path
    let mut cursor = vec![0usize];
    on_path[origin.index()] = true;

    while let Some(&node) = nodes.last() {
        let depth = cursor.len() - 1;
        let outgoing = network.outgoing(node);

        if cursor[depth] >= outgoing.len() {
            on_path[node.index()] = false;
            nodes.pop();
            edges.pop();
            cursor.pop();
            continue;
        }

        let edge_id = outgoing[cursor[depth]];
        cursor[depth] += 1;
        let next = network.edge_by_id(edge_id).to();
        if on_path[next.index()] {
            continue;
        }

        if next == destination {
            let mut path_edges = edges.clone();
            path_edges.push(edge_id);
            let mut path_nodes = nodes.clone();
            path_nodes.push(next);
            paths.push(Path {
                nodes: path_nodes,
                edges: path_edges,
            });
            if let Some(limit) = limit {
                if paths.len() > limit {
                    return Err(FlowError::PathLimitExceeded { limit });
                }
            }
            if paths.len() == PATH_COUNT_WARNING {
                warn!("{} simple paths and counting", PATH_COUNT_WARNING);
            }
            continue;
        }

        on_path[next.index()] = true;
        nodes.push(next);
        edges.push(edge_id);
        cursor.push(0);
    }

    debug!(
        "{} simple paths from '{}' to '{}'",
        paths.len(),
        network.node_by_id(origin).key(),
        network.node_by_id(destination).key()
    );
    Ok(paths)
}
