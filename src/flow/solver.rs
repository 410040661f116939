use crate::error::{FlowError, Result};
use crate::flow::assignment::FlowAssignment;
use crate::flow::evaluator::{EdgeLoad, edge_loads};
use crate::graph::edge::Edge;
use crate::graph::network::{Network, Route};
use crate::graph::path::Path;
use log::{debug, trace};
use std::time::{Duration, Instant};

#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfig {
    /// relative optimality tolerance, also bounds the conservation residual
    pub tolerance: f64,
    /// path flows at or below this are treated as zero
    pub flow_tolerance: f64,
    pub max_iterations: usize,
    pub time_limit: Option<Duration>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            flow_tolerance: 1e-6,
            max_iterations: 10_000,
            time_limit: None,
        }
    }
}

/// Contribution of one edge to a separable convex objective at a given load.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeTerm {
    pub value: f64,
    /// first derivative with respect to the edge load
    pub marginal: f64,
    /// second derivative with respect to the edge load, >= 0
    pub curvature: f64,
}

/// Minimizes `Σ_e objective(e, x_e).value` over path flows `f >= 0` with `Σ f = vehicles`,
/// where `x_e` is the sum of flows of the paths using `e`.
///
/// Each sweep picks the path with the smallest marginal cost and moves flow onto it from
/// every other used path by an exact line search along that pair. For quadratic edge
/// terms the step `(g_i - g_best) / Σ curvature` over the edges the two paths don't share
/// is the exact minimizer, clamped to the flow available on path `i`. A Newton step over
/// all used paths follows each sweep. Terminates once every used path is within
/// `tolerance` (relative) of the cheapest marginal cost.
pub fn minimize<F>(
    network: &Network,
    route: &Route,
    paths: &[Path],
    vehicles: f64,
    config: &SolverConfig,
    objective: F,
) -> Result<FlowAssignment>
where
    F: Fn(&Edge, f64) -> EdgeTerm,
{
    if paths.is_empty() {
        return Err(FlowError::NoFeasiblePaths {
            origin: network.node_by_id(route.origin()).key().to_string(),
            destination: network.node_by_id(route.destination()).key().to_string(),
        });
    }
    if !(vehicles.is_finite() && vehicles > 0.0) {
        return Err(FlowError::InvalidVehicleCount(vehicles));
    }

    let started = Instant::now();
    let k = paths.len();
    let mut flows = vec![vehicles / k as f64; k];
    let marginal = |path: &Path, load: &EdgeLoad| -> f64 {
        path.edges()
            .iter()
            .map(|e| objective(network.edge_by_id(*e), load.get(*e)).marginal)
            .sum()
    };

    let mut residual = f64::INFINITY;
    for iteration in 0..=config.max_iterations {
        let mut load = edge_loads(network, paths, &flows)?;
        let gradient = paths
            .iter()
            .map(|p| marginal(p, &load))
            .collect::<Vec<f64>>();
        let best = gradient
            .iter()
            .enumerate()
            .fold(0, |best, (i, g)| if *g < gradient[best] { i } else { best });
        let cheapest = gradient[best];

        residual = gradient
            .iter()
            .zip(&flows)
            .filter(|(_, f)| **f > config.flow_tolerance)
            .map(|(g, _)| g - cheapest)
            .fold(0.0, f64::max)
            / cheapest.abs().max(1.0);

        if log::log_enabled!(log::Level::Trace) {
            let value: f64 = network
                .edges()
                .iter()
                .map(|e| objective(e, load.get(e.id())).value)
                .sum();
            trace!(
                "iteration {}: objective {:.6}, residual {:e}",
                iteration, value, residual
            );
        }

        if residual <= config.tolerance {
            debug!(
                "converged after {} iterations (residual {:e})",
                iteration, residual
            );
            return finish(flows, best, vehicles, iteration, residual, config);
        }
        if iteration == config.max_iterations {
            break;
        }
        if let Some(limit) = config.time_limit {
            if started.elapsed() > limit {
                debug!("time limit of {:?} reached", limit);
                return Err(FlowError::NotConverged {
                    iterations: iteration,
                    residual,
                });
            }
        }

        for i in (0..k).filter(|i| *i != best) {
            if flows[i] <= 0.0 {
                continue;
            }
            let excess = marginal(&paths[i], &load) - marginal(&paths[best], &load);
            if excess <= 0.0 {
                continue;
            }

            let curvature: f64 = paths[i]
                .edges()
                .iter()
                .filter(|e| !paths[best].uses(**e))
                .chain(paths[best].edges().iter().filter(|e| !paths[i].uses(**e)))
                .map(|e| objective(network.edge_by_id(*e), load.get(*e)).curvature)
                .sum();
            let shift = if curvature > 0.0 {
                (excess / curvature).min(flows[i])
            } else {
                flows[i]
            };

            flows[i] -= shift;
            flows[best] += shift;
            load.add_path(&paths[i], -shift);
            load.add_path(&paths[best], shift);
        }

        newton_step(network, paths, &mut flows, vehicles, &objective)?;
    }

    Err(FlowError::NotConverged {
        iterations: config.max_iterations,
        residual,
    })
}

/// Relative stopping threshold of the conjugate gradient residual.
const CG_TOLERANCE: f64 = 1e-24;
/// Curvature below this share of the steepest edge counts as flat.
const FLAT_CURVATURE: f64 = 1e-12;

/// Moves the used paths together towards the minimizer of the local quadratic model,
/// keeping their total fixed, and stops at the first path whose flow runs out.
fn newton_step<F>(
    network: &Network,
    paths: &[Path],
    flows: &mut [f64],
    vehicles: f64,
    objective: &F,
) -> Result<()>
where
    F: Fn(&Edge, f64) -> EdgeTerm,
{
    let active = (0..flows.len())
        .filter(|i| flows[*i] > 0.0)
        .collect::<Vec<usize>>();
    if active.len() < 2 {
        return Ok(());
    }

    let load = edge_loads(network, paths, flows)?;
    let terms = network
        .edges()
        .iter()
        .map(|e| objective(e, load.get(e.id())))
        .collect::<Vec<EdgeTerm>>();
    let gradient = active
        .iter()
        .map(|i| {
            paths[*i]
                .edges()
                .iter()
                .map(|e| terms[e.index()].marginal)
                .sum::<f64>()
        })
        .collect::<Vec<f64>>();
    let curvature = terms.iter().map(|t| t.curvature).collect::<Vec<f64>>();

    let (direction, flat) = newton_direction(network, paths, &active, &gradient, &curvature);

    let blocking = active
        .iter()
        .zip(&direction)
        .filter(|(_, d)| **d < 0.0)
        .map(|(i, d)| (flows[*i] / -d, *i))
        .min_by(|x, y| x.0.total_cmp(&y.0));
    let Some((limit, blocked)) = blocking else {
        return Ok(());
    };
    // along a flat direction the objective keeps falling until some path is empty
    let step = if flat { limit } else { limit.min(1.0) };

    for (i, d) in active.iter().zip(&direction) {
        flows[*i] = (flows[*i] + step * d).max(0.0);
    }
    if step == limit {
        flows[blocked] = 0.0;
    }

    let drift = vehicles - flows.iter().sum::<f64>();
    let largest = active
        .iter()
        .copied()
        .max_by(|x, y| flows[*x].total_cmp(&flows[*y]));
    if let Some(largest) = largest {
        flows[largest] += drift;
    }
    Ok(())
}

/// Projected conjugate gradient for `H d = -g` restricted to `Σ d = 0`, where
/// `H = Pᵀ diag(curvature) P` over the active paths. The second value is set when the
/// first search direction already has no curvature; that direction is then returned.
fn newton_direction(
    network: &Network,
    paths: &[Path],
    active: &[usize],
    gradient: &[f64],
    curvature: &[f64],
) -> (Vec<f64>, bool) {
    let dot = |x: &[f64], y: &[f64]| x.iter().zip(y).map(|(a, b)| a * b).sum::<f64>();
    let project = |v: &mut Vec<f64>| {
        let mean = v.iter().sum::<f64>() / v.len() as f64;
        v.iter_mut().for_each(|x| *x -= mean);
    };
    let steepest = curvature.iter().copied().fold(0.0, f64::max);

    let mut direction = vec![0.0; active.len()];
    let mut residual = gradient.iter().map(|g| -g).collect::<Vec<f64>>();
    project(&mut residual);
    let mut rr = dot(&residual, &residual);
    let start = rr;
    if rr == 0.0 {
        return (direction, false);
    }

    let mut search = residual.clone();
    for _ in 0..active.len() {
        let mut product = hessian_product(network, paths, active, &search, curvature);
        project(&mut product);
        let along = dot(&search, &product);
        if along <= FLAT_CURVATURE * steepest * dot(&search, &search) {
            if direction.iter().all(|d| *d == 0.0) {
                return (search, true);
            }
            break;
        }

        let alpha = rr / along;
        direction
            .iter_mut()
            .zip(&search)
            .for_each(|(d, s)| *d += alpha * s);
        residual
            .iter_mut()
            .zip(&product)
            .for_each(|(r, p)| *r -= alpha * p);

        let next = dot(&residual, &residual);
        if next <= CG_TOLERANCE * start {
            break;
        }
        let beta = next / rr;
        search
            .iter_mut()
            .zip(&residual)
            .for_each(|(s, r)| *s = r + beta * *s);
        rr = next;
    }
    (direction, false)
}

fn hessian_product(
    network: &Network,
    paths: &[Path],
    active: &[usize],
    v: &[f64],
    curvature: &[f64],
) -> Vec<f64> {
    let mut load = EdgeLoad::zero(network);
    active
        .iter()
        .zip(v)
        .for_each(|(i, x)| load.add_path(&paths[*i], *x));

    active
        .iter()
        .map(|i| {
            paths[*i]
                .edges()
                .iter()
                .map(|e| curvature[e.index()] * load.get(*e))
                .sum::<f64>()
        })
        .collect()
}

fn finish(
    mut flows: Vec<f64>,
    best: usize,
    vehicles: f64,
    iterations: usize,
    residual: f64,
    config: &SolverConfig,
) -> Result<FlowAssignment> {
    let dropped: f64 = flows
        .iter_mut()
        .filter(|f| **f <= config.flow_tolerance)
        .map(|f| std::mem::replace(f, 0.0))
        .sum();
    flows[best] += dropped;

    let imbalance = (flows.iter().sum::<f64>() - vehicles).abs();
    if imbalance > config.tolerance * vehicles.max(1.0) {
        return Err(FlowError::NotConverged {
            iterations,
            residual: imbalance,
        });
    }
    Ok(FlowAssignment::new(flows, iterations, residual))
}
