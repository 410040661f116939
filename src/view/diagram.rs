use crate::flow::evaluator::EdgeLoad;
use crate::graph::network::{Network, Route};
use crate::graph::node::NodeId;
use std::collections::VecDeque;

#[derive(Debug, PartialEq)]
pub struct DiagramNode {
    pub label: String,
    /// layer, 0 at the origin
    pub x: f64,
    /// position within the layer, centred on 0
    pub y: f64,
    pub endpoint: bool,
}

#[derive(Debug, PartialEq)]
pub struct DiagramEdge {
    pub from: usize,
    pub to: usize,
    pub label: String,
    pub flow: f64,
}

/// Drawable picture of one assignment. Holds no references to the network.
#[derive(Debug, PartialEq)]
pub struct Diagram {
    pub title: String,
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
    pub annotations: Vec<String>,
}

impl Diagram {
    pub fn width(&self) -> f64 {
        self.nodes.iter().map(|n| n.x).fold(0.0, f64::max)
    }

    pub fn height(&self) -> f64 {
        self.nodes.iter().map(|n| n.y.abs()).fold(0.0, f64::max)
    }
}

/// Lays out nodes by breadth-first depth from the origin; nodes the origin cannot
/// reach go into one extra trailing layer.
pub fn diagram(
    network: &Network,
    load: &EdgeLoad,
    route: &Route,
    title: &str,
    total_cost: f64,
    potential: f64,
) -> Diagram {
    let depth = depths(network, route.origin());
    let trailing = depth.iter().flatten().max().map_or(0, |d| d + 1);
    let layer_of = |id: usize| depth[id].unwrap_or(trailing);

    let mut layer_sizes = vec![0usize; trailing + 1];
    let mut slot = vec![0usize; network.node_count()];
    for node in network.nodes() {
        let i = node.id().index();
        slot[i] = layer_sizes[layer_of(i)];
        layer_sizes[layer_of(i)] += 1;
    }

    let nodes = network
        .nodes()
        .iter()
        .map(|node| {
            let i = node.id().index();
            let layer = layer_of(i);
            DiagramNode {
                label: node.key().to_string(),
                x: layer as f64,
                y: slot[i] as f64 - (layer_sizes[layer] - 1) as f64 / 2.0,
                endpoint: node.id() == route.origin() || node.id() == route.destination(),
            }
        })
        .collect();

    let edges = network
        .edges()
        .iter()
        .map(|e| {
            let flow = load.get(e.id());
            DiagramEdge {
                from: e.from().index(),
                to: e.to().index(),
                label: format!("{:.1} / {:.1}", flow, e.cost(flow)),
                flow,
            }
        })
        .collect();

    Diagram {
        title: title.to_string(),
        nodes,
        edges,
        annotations: vec![
            format!("Total system cost: {:.2}", total_cost),
            format!("Beckmann potential: {:.2}", potential),
        ],
    }
}

fn depths(network: &Network, origin: NodeId) -> Vec<Option<usize>> {
    let mut depth = vec![None; network.node_count()];
    let mut queue = VecDeque::from([origin]);
    depth[origin.index()] = Some(0);

    while let Some(node) = queue.pop_front() {
        let d = depth[node.index()].unwrap_or(0);
        for e in network.outgoing(node) {
            let next = network.edge_by_id(*e).to();
            if depth[next.index()].is_none() {
                depth[next.index()] = Some(d + 1);
                queue.push_back(next);
            }
        }
    }
    depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::evaluator::edge_loads;
    use crate::graph::path::enumerate_simple_paths;
    use crate::scenario::braess::BraessScenario;
    use approx::assert_relative_eq;

    #[test]
    fn test_layers_follow_distance_from_origin() {
        let scenario = BraessScenario::build();
        let raw = scenario.graph().clone().node("island");
        let network = Network::build(&raw).unwrap();
        let route = network.route("s", "t").unwrap();
        let paths = enumerate_simple_paths(&network, &route, None).unwrap();
        let load = edge_loads(&network, &paths, &[0.0, 4000.0, 0.0]).unwrap();

        let diagram = diagram(&network, &load, &route, "equilibrium", 320_000.0, 160_000.0);

        let xs = diagram.nodes.iter().map(|n| n.x).collect::<Vec<_>>();
        assert_eq!(vec![0.0, 1.0, 1.0, 2.0, 3.0], xs);
        assert_relative_eq!(-0.5, diagram.nodes[1].y);
        assert_relative_eq!(0.5, diagram.nodes[2].y);
        assert!(diagram.nodes[0].endpoint && diagram.nodes[3].endpoint);
        assert!(!diagram.nodes[4].endpoint);
        assert_relative_eq!(3.0, diagram.width());

        assert_eq!("4000.0 / 40.0", diagram.edges[0].label);
        assert_eq!("0.0 / 45.0", diagram.edges[1].label);
        assert_eq!(
            vec!["Total system cost: 320000.00", "Beckmann potential: 160000.00"],
            diagram.annotations
        );
    }
}
