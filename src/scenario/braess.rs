use crate::loader::raw::RawGraph;
use crate::scenario::scenario::Scenario;

//   ┌─ x/100 ─→ v ── 45 ──┐
//   s           │ 0       t
//   └── 45 ───→ w ─ x/100 ┘
pub struct BraessScenario;

impl BraessScenario {
    pub fn build() -> Scenario {
        let graph = RawGraph::directed()
            .node("s")
            .node("v")
            .node("w")
            .node("t")
            .edge("s", "v", 0.01, 0.0)
            .edge("s", "w", 0.0, 45.0)
            .edge("v", "t", 0.0, 45.0)
            .edge("w", "t", 0.01, 0.0)
            .edge("v", "w", 0.0, 0.0);
        Scenario::new("braess", graph, "s", "t")
    }
}
