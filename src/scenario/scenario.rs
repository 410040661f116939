use crate::loader::raw::RawGraph;

/// A built-in network together with its natural origin and destination.
pub struct Scenario {
    name: String,
    graph: RawGraph,
    origin: String,
    destination: String,
}

impl Scenario {
    pub fn new(
        name: impl Into<String>,
        graph: RawGraph,
        origin: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            graph,
            origin: origin.into(),
            destination: destination.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn graph(&self) -> &RawGraph {
        &self.graph
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }
}
