use crate::graph::node::NodeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeId(pub usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A directed edge with affine cost per vehicle `a * load + b`.
#[derive(Debug)]
pub struct Edge {
    id: EdgeId,
    from: NodeId,
    to: NodeId,
    /// a >= 0.0
    a: f64,
    /// b >= 0.0
    b: f64,
}

impl Edge {
    pub fn new(id: EdgeId, from: NodeId, to: NodeId, a: f64, b: f64) -> Self {
        Self { id, from, to, a, b }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    /// Cost experienced by one vehicle when `load` vehicles use the edge.
    pub fn cost(&self, load: f64) -> f64 {
        self.a * load + self.b
    }

    /// Cost summed over every vehicle on the edge.
    pub fn total_cost(&self, load: f64) -> f64 {
        load * self.cost(load)
    }

    /// Integral of the cost function from 0 to `load`.
    pub fn potential(&self, load: f64) -> f64 {
        (self.a / 2.0 * load + self.b) * load
    }
}
