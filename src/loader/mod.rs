pub mod gml;
pub mod raw;

use crate::error::FlowError;
use crate::graph::network::Network;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read graph: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed GML: {0}")]
    Parse(#[from] gml::ParseError),

    #[error("malformed graph: {0}")]
    Format(String),

    #[error(transparent)]
    Graph(#[from] FlowError),
}

/// Reads a GML file and validates it into a network.
pub fn load_network(path: impl AsRef<Path>) -> Result<Network, LoadError> {
    let raw = gml::read(path)?;
    Ok(Network::build(&raw)?)
}
