use crate::analysis::summary::{AssignmentKind, AssignmentSummary, EdgeSummary, PathSummary};
use crate::error::Result;
use crate::flow::assignment::FlowAssignment;
use crate::flow::equilibrium::solve_equilibrium;
use crate::flow::evaluator::{beckmann_potential, edge_loads, path_cost, total_system_cost};
use crate::flow::optimum::solve_social_optimum;
use crate::flow::solver::SolverConfig;
use crate::graph::network::{Network, Route};
use crate::graph::path::{Path, enumerate_simple_paths};
use log::info;

#[derive(Clone, Debug, Default)]
pub struct AnalysisConfig {
    pub solver: SolverConfig,
    pub max_paths: Option<usize>,
}

pub struct Analysis {
    route: Route,
    vehicles: f64,
    paths: Vec<Path>,
    equilibrium: AssignmentSummary,
    optimum: AssignmentSummary,
}

impl Analysis {
    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn vehicles(&self) -> f64 {
        self.vehicles
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn equilibrium(&self) -> &AssignmentSummary {
        &self.equilibrium
    }

    pub fn optimum(&self) -> &AssignmentSummary {
        &self.optimum
    }

    pub fn summary(&self, kind: AssignmentKind) -> &AssignmentSummary {
        match kind {
            AssignmentKind::Equilibrium => &self.equilibrium,
            AssignmentKind::SocialOptimum => &self.optimum,
        }
    }

    /// Equilibrium cost over optimum cost, undefined when the optimum is free.
    pub fn price_of_anarchy(&self) -> Option<f64> {
        let optimum = self.optimum.total_system_cost();
        if optimum > 0.0 {
            Some(self.equilibrium.total_system_cost() / optimum)
        } else {
            None
        }
    }
}

/// Enumerates paths once and solves both assignments over the same path list.
pub fn analyze(
    network: &Network,
    route: Route,
    vehicles: f64,
    config: &AnalysisConfig,
) -> Result<Analysis> {
    let paths = enumerate_simple_paths(network, &route, config.max_paths)?;
    info!("{} candidate paths", paths.len());

    let equilibrium = solve_equilibrium(network, &route, &paths, vehicles, &config.solver)?;
    let optimum = solve_social_optimum(network, &route, &paths, vehicles, &config.solver)?;
    info!(
        "solved in {} (equilibrium) and {} (optimum) iterations",
        equilibrium.iterations(),
        optimum.iterations()
    );

    Ok(Analysis {
        route,
        vehicles,
        equilibrium: summarize(AssignmentKind::Equilibrium, network, &paths, equilibrium)?,
        optimum: summarize(AssignmentKind::SocialOptimum, network, &paths, optimum)?,
        paths,
    })
}

pub fn summarize(
    kind: AssignmentKind,
    network: &Network,
    paths: &[Path],
    assignment: FlowAssignment,
) -> Result<AssignmentSummary> {
    let load = edge_loads(network, paths, assignment.flows())?;

    let edges = network
        .edges()
        .iter()
        .map(|e| {
            let flow = load.get(e.id());
            EdgeSummary::new(
                network.node_by_id(e.from()).key().to_string(),
                network.node_by_id(e.to()).key().to_string(),
                flow,
                e.cost(flow),
            )
        })
        .collect();

    let path_rows = paths
        .iter()
        .zip(assignment.flows())
        .map(|(p, flow)| PathSummary::new(p.describe(network), *flow, path_cost(p, &load, network)))
        .collect();

    let total = total_system_cost(&load, network);
    let potential = beckmann_potential(&load, network);

    Ok(AssignmentSummary::new(
        kind, assignment, load, edges, path_rows, total, potential,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlowError;
    use crate::scenario::braess::BraessScenario;
    use crate::scenario::pigou::PigouScenario;
    use crate::scenario::random::RandomScenario;
    use crate::scenario::scenario::Scenario;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn run(scenario: &Scenario, vehicles: f64) -> (Network, Result<Analysis>) {
        let network = Network::build(scenario.graph()).unwrap();
        let route = network
            .route(scenario.origin(), scenario.destination())
            .unwrap();
        let analysis = analyze(&network, route, vehicles, &AnalysisConfig::default());
        (network, analysis)
    }

    fn assert_wardrop(summary: &AssignmentSummary) {
        let cheapest = summary
            .paths()
            .iter()
            .map(|p| p.cost())
            .fold(f64::INFINITY, f64::min);
        let tolerance = 1e-4 * cheapest.max(1.0);
        for path in summary.paths() {
            if path.flow() > 1e-6 {
                assert_abs_diff_eq!(cheapest, path.cost(), epsilon = tolerance);
            } else {
                assert!(path.cost() >= cheapest - tolerance);
            }
        }
    }

    #[test]
    fn test_pigou_costs() {
        let (_, analysis) = run(&PigouScenario::build(), 20.0);
        let analysis = analysis.unwrap();

        assert_relative_eq!(200.0, analysis.equilibrium().total_system_cost(), epsilon = 1e-6);
        assert_relative_eq!(175.0, analysis.optimum().total_system_cost(), epsilon = 1e-6);
        // 10²/2 + 10·10
        assert_relative_eq!(150.0, analysis.equilibrium().beckmann_potential(), epsilon = 1e-6);
        assert_relative_eq!(10.0, analysis.equilibrium().average_cost(), epsilon = 1e-6);
        assert_relative_eq!(
            200.0 / 175.0,
            analysis.price_of_anarchy().unwrap(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_braess_paradox() {
        let (network, analysis) = run(&BraessScenario::build(), 4000.0);
        let analysis = analysis.unwrap();
        let equilibrium = analysis.equilibrium();
        let optimum = analysis.optimum();

        // everyone takes the shortcut s → v → w → t at cost 80
        assert_eq!("s -> v -> w -> t", analysis.paths()[1].describe(&network));
        assert_relative_eq!(4000.0, equilibrium.assignment().flow(1), epsilon = 1e-6);
        assert_relative_eq!(320_000.0, equilibrium.total_system_cost(), epsilon = 1e-3);
        assert_relative_eq!(258_750.0, optimum.total_system_cost(), epsilon = 1e-3);
        assert!(optimum.total_system_cost() < equilibrium.total_system_cost());
        assert_wardrop(equilibrium);
    }

    #[test]
    fn test_edge_rows_follow_network_order() {
        let (network, analysis) = run(&BraessScenario::build(), 4000.0);
        let analysis = analysis.unwrap();
        let edges = analysis.equilibrium().edges();

        assert_eq!(network.edge_count(), edges.len());
        assert_eq!(("s", "v"), (edges[0].from(), edges[0].to()));
        assert_relative_eq!(4000.0, edges[0].flow(), epsilon = 1e-6);
        assert_relative_eq!(40.0, edges[0].cost_per_vehicle(), epsilon = 1e-6);
        assert_relative_eq!(160_000.0, edges[0].total_cost(), epsilon = 1e-3);
    }

    #[test]
    fn test_no_route_is_reported() {
        let scenario = BraessScenario::build();
        let network = Network::build(scenario.graph()).unwrap();
        let route = network.route("t", "s").unwrap();

        assert!(matches!(
            analyze(&network, route, 10.0, &AnalysisConfig::default()),
            Err(FlowError::NoFeasiblePaths { .. })
        ));
    }

    #[test]
    fn test_random_networks_satisfy_flow_properties() {
        for seed in 0..25 {
            let (_, analysis) = run(&RandomScenario::default().build(seed), 100.0);
            let analysis = analysis.unwrap();

            for summary in [analysis.equilibrium(), analysis.optimum()] {
                let assignment = summary.assignment();
                assert_relative_eq!(100.0, assignment.total(), epsilon = 1e-6);
                assert!(assignment.flows().iter().all(|f| *f >= 0.0));
            }
            assert!(
                analysis.optimum().total_system_cost()
                    <= analysis.equilibrium().total_system_cost() + 1e-6
            );
            assert_wardrop(analysis.equilibrium());
        }
    }

    #[test]
    fn test_vehicle_counts_across_magnitudes() {
        let scenarios = [
            RandomScenario::default().build(3),
            RandomScenario::default().build(40),
            RandomScenario::new(5, 4).build(8),
            RandomScenario::new(5, 4).build(11),
        ];

        for scenario in &scenarios {
            for vehicles in [1.0, 1e3, 1e6] {
                let (_, analysis) = run(scenario, vehicles);
                let analysis = analysis.unwrap();

                for summary in [analysis.equilibrium(), analysis.optimum()] {
                    let assignment = summary.assignment();
                    assert_relative_eq!(vehicles, assignment.total(), max_relative = 1e-9);
                    assert!(assignment.flows().iter().all(|f| *f >= 0.0));
                    assert!(assignment.residual() <= 1e-6);
                }
                assert!(
                    analysis.optimum().total_system_cost()
                        <= analysis.equilibrium().total_system_cost() * (1.0 + 1e-6)
                );
                assert_wardrop(analysis.equilibrium());
            }
        }
    }

    #[test]
    fn test_repeated_solves_give_same_edge_loads() {
        let scenario = RandomScenario::new(3, 4).build(7);
        let (_, first) = run(&scenario, 250.0);
        let (_, second) = run(&scenario, 250.0);
        let (first, second) = (first.unwrap(), second.unwrap());

        for (x, y) in first
            .equilibrium()
            .load()
            .loads()
            .iter()
            .zip(second.equilibrium().load().loads())
        {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-6);
        }
    }
}
