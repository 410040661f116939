use crate::analysis::analysis::Analysis;
use crate::analysis::summary::AssignmentSummary;
use crate::graph::network::Network;
use std::fmt;

/// Plain-text report of both assignments.
pub fn render(analysis: &Analysis, network: &Network) -> String {
    Report { analysis, network }.to_string()
}

struct Report<'a> {
    analysis: &'a Analysis,
    network: &'a Network,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let route = self.analysis.route();
        writeln!(
            f,
            "Route {} -> {}, {} vehicles, {} paths",
            self.network.node_by_id(route.origin()).key(),
            self.network.node_by_id(route.destination()).key(),
            self.analysis.vehicles(),
            self.analysis.paths().len()
        )?;

        for summary in [self.analysis.equilibrium(), self.analysis.optimum()] {
            writeln!(f)?;
            write_summary(f, summary)?;
        }

        writeln!(f)?;
        match self.analysis.price_of_anarchy() {
            Some(ratio) => writeln!(f, "Price of anarchy: {:.4}", ratio),
            None => writeln!(f, "Price of anarchy: undefined (optimum is free)"),
        }
    }
}

fn write_summary(f: &mut fmt::Formatter<'_>, summary: &AssignmentSummary) -> fmt::Result {
    writeln!(f, "{}", summary.kind().label())?;

    let edge_width = summary
        .edges()
        .iter()
        .map(|e| e.from().len() + e.to().len() + 4)
        .max()
        .unwrap_or(0)
        .max(4);
    writeln!(
        f,
        "  {:<w$} {:>12} {:>12} {:>14}",
        "Edge",
        "Flow",
        "Cost/veh",
        "Total",
        w = edge_width
    )?;
    for edge in summary.edges() {
        writeln!(
            f,
            "  {:<w$} {:>12.2} {:>12.2} {:>14.2}",
            format!("{} -> {}", edge.from(), edge.to()),
            edge.flow(),
            edge.cost_per_vehicle(),
            edge.total_cost(),
            w = edge_width
        )?;
    }

    let path_width = summary
        .paths()
        .iter()
        .map(|p| p.description().len())
        .max()
        .unwrap_or(0)
        .max(4);
    writeln!(
        f,
        "\n  {:<w$} {:>12} {:>12}",
        "Path",
        "Flow",
        "Cost",
        w = path_width
    )?;
    for path in summary.paths() {
        writeln!(
            f,
            "  {:<w$} {:>12.2} {:>12.2}",
            path.description(),
            path.flow(),
            path.cost(),
            w = path_width
        )?;
    }

    writeln!(f, "\n  Total system cost:        {:.2}", summary.total_system_cost())?;
    writeln!(f, "  Beckmann potential:       {:.2}", summary.beckmann_potential())?;
    writeln!(f, "  Average cost per vehicle: {:.2}", summary.average_cost())?;
    writeln!(
        f,
        "  Solver: {} iterations, residual {:.1e}",
        summary.assignment().iterations(),
        summary.assignment().residual()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analysis::{AnalysisConfig, analyze};
    use crate::loader::raw::RawGraph;
    use crate::scenario::pigou::PigouScenario;

    #[test]
    fn test_report_lists_both_assignments() {
        let scenario = PigouScenario::build();
        let network = Network::build(scenario.graph()).unwrap();
        let route = network.route("0", "1").unwrap();
        let analysis = analyze(&network, route, 20.0, &AnalysisConfig::default()).unwrap();

        let report = render(&analysis, &network);

        assert!(report.starts_with("Route 0 -> 1, 20 vehicles, 2 paths\n"));
        assert!(report.contains("Nash equilibrium\n"));
        assert!(report.contains("Social optimum\n"));
        assert!(report.contains("Total system cost:        200.00"));
        assert!(report.contains("Total system cost:        175.00"));
        assert!(report.contains("Beckmann potential:       150.00"));
        assert!(report.contains("Price of anarchy: 1.1429"));
    }

    #[test]
    fn test_free_network_has_no_price_of_anarchy() {
        let raw = RawGraph::directed().node("a").node("b").edge("a", "b", 0.0, 0.0);
        let network = Network::build(&raw).unwrap();
        let route = network.route("a", "b").unwrap();
        let analysis = analyze(&network, route, 5.0, &AnalysisConfig::default()).unwrap();

        let report = render(&analysis, &network);

        assert!(report.contains("  a -> b"));
        assert!(report.ends_with("\nPrice of anarchy: undefined (optimum is free)\n"));
    }
}
