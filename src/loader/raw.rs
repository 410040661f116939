/// Graph description as read from a file, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGraph {
    pub directed: bool,
    pub nodes: Vec<RawNode>,
    pub edges: Vec<RawEdge>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawNode {
    pub key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawEdge {
    pub source: String,
    pub target: String,
    pub a: Option<f64>,
    pub b: Option<f64>,
}

impl RawGraph {
    pub fn directed() -> Self {
        Self {
            directed: true,
            ..Self::default()
        }
    }

    pub fn node(mut self, key: impl Into<String>) -> Self {
        self.nodes.push(RawNode { key: key.into() });
        self
    }

    pub fn edge(mut self, source: impl Into<String>, target: impl Into<String>, a: f64, b: f64) -> Self {
        self.edges.push(RawEdge {
            source: source.into(),
            target: target.into(),
            a: Some(a),
            b: Some(b),
        });
        self
    }
}
