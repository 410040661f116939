use crate::analysis::analysis::Analysis;
use crate::analysis::summary::AssignmentKind;
use crate::view::diagram::Diagram;

pub struct App<'a> {
    pub running: bool,
    analysis: &'a Analysis,
    equilibrium: Diagram,
    optimum: Diagram,
    selected: AssignmentKind,
}

impl<'a> App<'a> {
    pub fn new(analysis: &'a Analysis, equilibrium: Diagram, optimum: Diagram) -> Self {
        Self {
            running: true,
            analysis,
            equilibrium,
            optimum,
            selected: AssignmentKind::Equilibrium,
        }
    }

    pub fn analysis(&self) -> &Analysis {
        self.analysis
    }

    pub fn selected(&self) -> AssignmentKind {
        self.selected
    }

    pub fn diagram(&self) -> &Diagram {
        match self.selected {
            AssignmentKind::Equilibrium => &self.equilibrium,
            AssignmentKind::SocialOptimum => &self.optimum,
        }
    }

    pub fn toggle(&mut self) {
        self.selected = match self.selected {
            AssignmentKind::Equilibrium => AssignmentKind::SocialOptimum,
            AssignmentKind::SocialOptimum => AssignmentKind::Equilibrium,
        };
    }
}

impl Drop for App<'_> {
    fn drop(&mut self) {
        ratatui::restore();
    }
}
