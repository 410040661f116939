use crate::loader::raw::RawGraph;
use crate::scenario::scenario::Scenario;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded layered network: source `0`, `layers` layers of `width` nodes, sink last.
/// Edges run forward between consecutive layers, plus occasional links inside a layer
/// from lower to higher index, so the graph stays acyclic.
pub struct RandomScenario {
    layers: usize,
    width: usize,
    /// chance of an edge between two nodes of consecutive layers
    density: f64,
    /// chance of a congestion-free edge (a = 0)
    fixed_share: f64,
}

impl Default for RandomScenario {
    fn default() -> Self {
        Self {
            layers: 4,
            width: 3,
            density: 0.7,
            fixed_share: 0.2,
        }
    }
}

impl RandomScenario {
    pub fn new(layers: usize, width: usize) -> Self {
        Self {
            layers: layers.max(1),
            width: width.max(1),
            ..Self::default()
        }
    }

    pub fn build(&self, seed: u64) -> Scenario {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut layers: Vec<Vec<usize>> = vec![vec![0]];
        let mut nid = 1usize;
        for _ in 0..self.layers {
            layers.push((nid..nid + self.width).collect());
            nid += self.width;
        }
        layers.push(vec![nid]);
        let sink = nid;

        let mut graph = (0..=sink).fold(RawGraph::directed(), |g, n| g.node(n.to_string()));

        let coefficients = |rng: &mut StdRng| {
            let a = if rng.gen_bool(self.fixed_share) {
                0.0
            } else {
                rng.gen_range(0.01..2.0)
            };
            (a, rng.gen_range(0.0..20.0))
        };

        for pair in layers.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            let forced = current.len() == 1 || next.len() == 1;
            for from in current {
                let mut targets = next
                    .iter()
                    .copied()
                    .filter(|_| forced || rng.gen_bool(self.density))
                    .collect::<Vec<usize>>();
                if targets.is_empty() {
                    targets.push(next[rng.gen_range(0..next.len())]);
                }
                for to in targets {
                    let (a, b) = coefficients(&mut rng);
                    graph = graph.edge(from.to_string(), to.to_string(), a, b);
                }
            }
            for pair in current.windows(2) {
                if rng.gen_bool(0.2) {
                    let (a, b) = coefficients(&mut rng);
                    graph = graph.edge(pair[0].to_string(), pair[1].to_string(), a, b);
                }
            }
        }

        Scenario::new(format!("random-{}", seed), graph, "0", sink.to_string())
    }
}
