pub mod edge;
pub mod network;
pub mod node;
pub mod path;
