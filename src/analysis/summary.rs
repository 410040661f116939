use crate::flow::assignment::FlowAssignment;
use crate::flow::evaluator::EdgeLoad;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AssignmentKind {
    Equilibrium,
    SocialOptimum,
}

impl AssignmentKind {
    pub fn label(&self) -> &'static str {
        match self {
            AssignmentKind::Equilibrium => "Nash equilibrium",
            AssignmentKind::SocialOptimum => "Social optimum",
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct EdgeSummary {
    from: String,
    to: String,
    flow: f64,
    cost_per_vehicle: f64,
}

impl EdgeSummary {
    pub fn new(from: String, to: String, flow: f64, cost_per_vehicle: f64) -> Self {
        Self {
            from,
            to,
            flow,
            cost_per_vehicle,
        }
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn flow(&self) -> f64 {
        self.flow
    }

    pub fn cost_per_vehicle(&self) -> f64 {
        self.cost_per_vehicle
    }

    pub fn total_cost(&self) -> f64 {
        self.flow * self.cost_per_vehicle
    }
}

#[derive(Debug, PartialEq)]
pub struct PathSummary {
    description: String,
    flow: f64,
    cost: f64,
}

impl PathSummary {
    pub fn new(description: String, flow: f64, cost: f64) -> Self {
        Self {
            description,
            flow,
            cost,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn flow(&self) -> f64 {
        self.flow
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }
}

pub struct AssignmentSummary {
    kind: AssignmentKind,
    assignment: FlowAssignment,
    load: EdgeLoad,
    edges: Vec<EdgeSummary>,
    paths: Vec<PathSummary>,
    total_system_cost: f64,
    beckmann_potential: f64,
}

impl AssignmentSummary {
    pub fn new(
        kind: AssignmentKind,
        assignment: FlowAssignment,
        load: EdgeLoad,
        edges: Vec<EdgeSummary>,
        paths: Vec<PathSummary>,
        total_system_cost: f64,
        beckmann_potential: f64,
    ) -> Self {
        Self {
            kind,
            assignment,
            load,
            edges,
            paths,
            total_system_cost,
            beckmann_potential,
        }
    }

    pub fn kind(&self) -> AssignmentKind {
        self.kind
    }

    pub fn assignment(&self) -> &FlowAssignment {
        &self.assignment
    }

    pub fn load(&self) -> &EdgeLoad {
        &self.load
    }

    pub fn edges(&self) -> &[EdgeSummary] {
        &self.edges
    }

    pub fn paths(&self) -> &[PathSummary] {
        &self.paths
    }

    pub fn total_system_cost(&self) -> f64 {
        self.total_system_cost
    }

    pub fn beckmann_potential(&self) -> f64 {
        self.beckmann_potential
    }

    pub fn average_cost(&self) -> f64 {
        let vehicles = self.assignment.total();
        if vehicles > 0.0 {
            self.total_system_cost / vehicles
        } else {
            0.0
        }
    }
}
