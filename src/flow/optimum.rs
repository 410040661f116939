use crate::error::Result;
use crate::flow::assignment::FlowAssignment;
use crate::flow::solver::{EdgeTerm, SolverConfig, minimize};
use crate::graph::edge::Edge;
use crate::graph::network::{Network, Route};
use crate::graph::path::Path;

fn system_cost_term(edge: &Edge, load: f64) -> EdgeTerm {
    EdgeTerm {
        value: edge.total_cost(load),
        marginal: 2.0 * edge.a() * load + edge.b(),
        curvature: 2.0 * edge.a(),
    }
}

/// Path flows minimizing the total travel cost of all vehicles.
pub fn solve_social_optimum(
    network: &Network,
    route: &Route,
    paths: &[Path],
    vehicles: f64,
    config: &SolverConfig,
) -> Result<FlowAssignment> {
    minimize(network, route, paths, vehicles, config, system_cost_term)
}
