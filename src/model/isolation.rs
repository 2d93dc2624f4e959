// src/model/isolation.rs

use crate::model::IsolationParams;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;
const MAX_SUBSAMPLE: usize = 256;

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        size: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone)]
struct IsolationTree {
    nodes: Vec<Node>,
}

impl IsolationTree {
    fn grow<R: Rng>(rows: &[Vec<f64>], samples: Vec<usize>, max_depth: usize, rng: &mut R) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.split(rows, samples, 0, max_depth, rng);
        tree
    }

    fn split<R: Rng>(
        &mut self,
        rows: &[Vec<f64>],
        samples: Vec<usize>,
        depth: usize,
        max_depth: usize,
        rng: &mut R,
    ) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node::Leaf {
            size: samples.len(),
        });

        if depth >= max_depth || samples.len() <= 1 {
            return id;
        }

        // Only features that still vary inside this node can isolate anything.
        let n_features = rows[samples[0]].len();
        let ranges: Vec<(usize, f64, f64)> = (0..n_features)
            .filter_map(|f| {
                let (lo, hi) = samples.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |acc, &i| {
                    (acc.0.min(rows[i][f]), acc.1.max(rows[i][f]))
                });
                (lo < hi).then_some((f, lo, hi))
            })
            .collect();

        if ranges.is_empty() {
            return id;
        }

        let (feature, lo, hi) = ranges[rng.gen_range(0..ranges.len())];
        let threshold = rng.gen_range(lo..hi);

        let (left, right): (Vec<usize>, Vec<usize>) =
            samples.into_iter().partition(|&i| rows[i][feature] <= threshold);

        let left = self.split(rows, left, depth + 1, max_depth, rng);
        let right = self.split(rows, right, depth + 1, max_depth, rng);
        self.nodes[id] = Node::Split {
            feature,
            threshold,
            left,
            right,
        };
        id
    }

    fn path_length(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        let mut depth = 0.0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { size } => return depth + average_path_length(*size),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                    depth += 1.0;
                }
            }
        }
    }
}

/// Expected path length of an unsuccessful search in a binary search tree
/// of `n` points; normalises isolation depths.
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

/// Random partition trees; points that separate from the rest in few cuts
/// are outliers.
#[derive(Debug, Clone)]
pub struct IsolationForest {
    trees: Vec<IsolationTree>,
    subsample: usize,
}

impl IsolationForest {
    pub fn fit(rows: &[Vec<f64>], params: &IsolationParams) -> Self {
        let n = rows.len();
        let subsample = n.min(MAX_SUBSAMPLE);
        if subsample == 0 {
            return Self {
                trees: Vec::new(),
                subsample,
            };
        }
        let max_depth = (subsample.max(2) as f64).log2().ceil() as usize;

        let mut master = StdRng::seed_from_u64(params.seed);
        let trees = (0..params.n_trees.max(1))
            .map(|_| {
                let mut rng = StdRng::seed_from_u64(master.gen());
                let samples = index::sample(&mut rng, n, subsample).into_vec();
                IsolationTree::grow(rows, samples, max_depth, &mut rng)
            })
            .collect();

        Self { trees, subsample }
    }

    /// Negated anomaly score in `[-1, 0)`. Lower means more anomalous.
    pub fn score_samples(&self, rows: &[Vec<f64>]) -> Vec<f64> {
        if self.trees.is_empty() {
            return vec![0.0; rows.len()];
        }

        let norm = match average_path_length(self.subsample) {
            c if c > 0.0 => c,
            _ => 1.0,
        };

        rows.iter()
            .map(|row| {
                let mean_depth = self.trees.iter().map(|t| t.path_length(row)).sum::<f64>()
                    / self.trees.len() as f64;
                -(2f64).powf(-mean_depth / norm)
            })
            .collect()
    }
}

/// Fits on the batch and flags the `contamination` share with the lowest
/// scores. Returns `(score, is_anomaly)` per row, in input order.
pub fn detect_outliers(rows: &[Vec<f64>], params: &IsolationParams) -> Vec<(f64, bool)> {
    let forest = IsolationForest::fit(rows, params);
    let scores = forest.score_samples(rows);
    let threshold = percentile(&scores, params.contamination.clamp(f64::EPSILON, 0.5));

    scores.into_iter().map(|s| (s, s < threshold)).collect()
}

/// Linear-interpolated quantile, `q` in `[0, 1]`.
pub fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}
