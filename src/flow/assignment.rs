/// Flow per path, aligned with the path list it was solved for.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowAssignment {
    flows: Vec<f64>,
    iterations: usize,
    residual: f64,
}

impl FlowAssignment {
    pub fn new(flows: Vec<f64>, iterations: usize, residual: f64) -> Self {
        Self {
            flows,
            iterations,
            residual,
        }
    }

    pub fn flows(&self) -> &[f64] {
        &self.flows
    }

    pub fn flow(&self, path: usize) -> f64 {
        self.flows[path]
    }

    pub fn total(&self) -> f64 {
        self.flows.iter().sum()
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Largest relative marginal-cost excess of a used path at termination.
    pub fn residual(&self) -> f64 {
        self.residual
    }
}
