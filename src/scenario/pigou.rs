use crate::loader::raw::RawGraph;
use crate::scenario::scenario::Scenario;

/// Two parallel roads from `0` to `1`: a congestible one (a=1) and a fixed-cost one (b=10).
///
/// At most one edge may connect an ordered pair, so the fixed-cost road passes
/// through a free intermediate node.
pub struct PigouScenario;

impl PigouScenario {
    pub fn build() -> Scenario {
        let graph = RawGraph::directed()
            .node("0")
            .node("1")
            .node("0'")
            .edge("0", "1", 1.0, 0.0)
            .edge("0", "0'", 0.0, 10.0)
            .edge("0'", "1", 0.0, 0.0);
        Scenario::new("pigou", graph, "0", "1")
    }
}
