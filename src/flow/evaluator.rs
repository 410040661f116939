use crate::error::{FlowError, Result};
use crate::graph::edge::EdgeId;
use crate::graph::network::Network;
use crate::graph::path::Path;

/// Aggregated flow per edge, indexed by `EdgeId`.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeLoad {
    loads: Vec<f64>,
}

impl EdgeLoad {
    pub fn zero(network: &Network) -> Self {
        Self {
            loads: vec![0.0; network.edge_count()],
        }
    }

    pub fn get(&self, id: EdgeId) -> f64 {
        self.loads[id.index()]
    }

    pub fn loads(&self) -> &[f64] {
        &self.loads
    }

    pub(crate) fn add_path(&mut self, path: &Path, flow: f64) {
        path.edges()
            .iter()
            .for_each(|e| self.loads[e.index()] += flow);
    }
}

pub fn edge_loads(network: &Network, paths: &[Path], flows: &[f64]) -> Result<EdgeLoad> {
    if paths.len() != flows.len() {
        return Err(FlowError::DimensionMismatch {
            paths: paths.len(),
            flows: flows.len(),
        });
    }
    let mut load = EdgeLoad::zero(network);
    paths
        .iter()
        .zip(flows)
        .for_each(|(path, flow)| load.add_path(path, *flow));
    Ok(load)
}

/// Travel cost summed over all vehicles: Σ x·(a·x + b).
pub fn total_system_cost(load: &EdgeLoad, network: &Network) -> f64 {
    network
        .edges()
        .iter()
        .map(|e| e.total_cost(load.get(e.id())))
        .sum()
}

/// Beckmann potential: Σ ∫₀ˣ (a·t + b) dt.
pub fn beckmann_potential(load: &EdgeLoad, network: &Network) -> f64 {
    network
        .edges()
        .iter()
        .map(|e| e.potential(load.get(e.id())))
        .sum()
}

/// Cost of one vehicle travelling `path` under the given loads.
pub fn path_cost(path: &Path, load: &EdgeLoad, network: &Network) -> f64 {
    path.edges()
        .iter()
        .map(|e| network.edge_by_id(*e).cost(load.get(*e)))
        .sum()
}
