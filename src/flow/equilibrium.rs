use crate::error::Result;
use crate::flow::assignment::FlowAssignment;
use crate::flow::solver::{EdgeTerm, SolverConfig, minimize};
use crate::graph::edge::Edge;
use crate::graph::network::{Network, Route};
use crate::graph::path::Path;

fn potential_term(edge: &Edge, load: f64) -> EdgeTerm {
    EdgeTerm {
        value: edge.potential(load),
        marginal: edge.cost(load),
        curvature: edge.a(),
    }
}

/// Wardrop user equilibrium, found as the minimizer of the Beckmann potential.
///
/// Edge loads are unique whenever every edge has `a > 0`. Path flows are not: paths
/// with identical cost at equilibrium may split their flow in any proportion, and the
/// returned split is simply the one the solver reaches from an equal start.
pub fn solve_equilibrium(
    network: &Network,
    route: &Route,
    paths: &[Path],
    vehicles: f64,
    config: &SolverConfig,
) -> Result<FlowAssignment> {
    minimize(network, route, paths, vehicles, config, potential_term)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlowError;
    use crate::flow::evaluator::{edge_loads, path_cost, total_system_cost};
    use crate::graph::path::enumerate_simple_paths;
    use crate::loader::raw::RawGraph;
    use approx::assert_relative_eq;

    #[test]
    fn test_two_parallel_edges() {
        let raw = RawGraph::directed()
            .node("0")
            .node("1")
            .node("m")
            .edge("0", "1", 1.0, 0.0)
            .edge("0", "m", 0.0, 10.0)
            .edge("m", "1", 0.0, 0.0);
        let network = Network::build(&raw).unwrap();
        let route = network.route("0", "1").unwrap();
        let paths = enumerate_simple_paths(&network, &route, None).unwrap();

        let assignment =
            solve_equilibrium(&network, &route, &paths, 20.0, &SolverConfig::default()).unwrap();
        let load = edge_loads(&network, &paths, assignment.flows()).unwrap();

        assert_relative_eq!(10.0, assignment.flow(0), epsilon = 1e-6);
        assert_relative_eq!(10.0, assignment.flow(1), epsilon = 1e-6);
        assert_relative_eq!(10.0, path_cost(&paths[0], &load, &network), epsilon = 1e-6);
        assert_relative_eq!(10.0, path_cost(&paths[1], &load, &network), epsilon = 1e-6);
        assert_relative_eq!(200.0, total_system_cost(&load, &network), epsilon = 1e-6);
    }

    #[test]
    fn test_uneven_start_reaches_equal_costs() {
        // 0 → 1 with a=1, 0 → 1 via m with a=3, b=4
        let raw = RawGraph::directed()
            .node("0")
            .node("1")
            .node("m")
            .edge("0", "1", 1.0, 0.0)
            .edge("0", "m", 3.0, 4.0)
            .edge("m", "1", 0.0, 0.0);
        let network = Network::build(&raw).unwrap();
        let route = network.route("0", "1").unwrap();
        let paths = enumerate_simple_paths(&network, &route, None).unwrap();

        let assignment =
            solve_equilibrium(&network, &route, &paths, 12.0, &SolverConfig::default()).unwrap();

        // x = 3(12 - x) + 4  →  x = 10
        assert_relative_eq!(10.0, assignment.flow(0), epsilon = 1e-6);
        assert_relative_eq!(2.0, assignment.flow(1), epsilon = 1e-6);
    }

    #[test]
    fn test_single_path_carries_everything() {
        let raw = RawGraph::directed()
            .node("a")
            .node("b")
            .node("c")
            .edge("a", "b", 3.0, 1.0)
            .edge("b", "c", 0.0, 7.0)
            .edge("c", "a", 1.0, 0.0);
        let network = Network::build(&raw).unwrap();
        let route = network.route("a", "c").unwrap();
        let paths = enumerate_simple_paths(&network, &route, None).unwrap();

        let assignment =
            solve_equilibrium(&network, &route, &paths, 12.0, &SolverConfig::default()).unwrap();

        assert_eq!(&[12.0], assignment.flows());
        assert_eq!(0, assignment.iterations());
    }

    #[test]
    fn test_origin_equals_destination() {
        let raw = RawGraph::directed()
            .node("a")
            .node("b")
            .edge("a", "b", 1.0, 0.0);
        let network = Network::build(&raw).unwrap();
        let route = network.route("a", "a").unwrap();
        let paths = enumerate_simple_paths(&network, &route, None).unwrap();

        assert_eq!(
            Err(FlowError::NoFeasiblePaths {
                origin: "a".into(),
                destination: "a".into()
            }),
            solve_equilibrium(&network, &route, &paths, 5.0, &SolverConfig::default())
        );
    }
}
