pub mod assignment;
pub mod equilibrium;
pub mod evaluator;
pub mod optimum;
pub mod solver;
