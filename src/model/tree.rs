// src/model/tree.rs

use rand::seq::SliceRandom;
use rand::Rng;

/// Growth limits for a single regression tree.
#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    /// Features drawn as split candidates at each node.
    pub max_features: usize,
    pub min_samples_split: usize,
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Copy)]
struct Split {
    feature: usize,
    threshold: f64,
    sse: f64,
}

/// CART regression tree minimising squared error. Nodes live in a flat
/// arena; index 0 is the root.
#[derive(Debug, Clone)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    /// Grows a tree over the rows named by `samples` (duplicates allowed, as
    /// produced by bootstrap resampling). Each split's weighted squared-error
    /// decrease is added to `importances[feature]`.
    pub fn fit<R: Rng>(
        x: &[Vec<f64>],
        y: &[f64],
        samples: Vec<usize>,
        params: &TreeParams,
        rng: &mut R,
        importances: &mut [f64],
    ) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        if samples.is_empty() {
            tree.nodes.push(Node::Leaf { value: 0.0 });
            return tree;
        }

        let mut builder = Builder {
            x,
            y,
            params,
            rng,
            importances,
        };
        builder.grow(&mut tree.nodes, samples, 0);
        tree
    }

    pub fn predict(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { value } => return *value,
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
                }
            }
        }
    }

    #[cfg(test)]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

struct Builder<'a, R> {
    x: &'a [Vec<f64>],
    y: &'a [f64],
    params: &'a TreeParams,
    rng: &'a mut R,
    importances: &'a mut [f64],
}

impl<R: Rng> Builder<'_, R> {
    fn grow(&mut self, nodes: &mut Vec<Node>, samples: Vec<usize>, depth: usize) -> usize {
        let n = samples.len() as f64;
        let mean = samples.iter().map(|&i| self.y[i]).sum::<f64>() / n;
        let sse: f64 = samples.iter().map(|&i| (self.y[i] - mean).powi(2)).sum();

        let id = nodes.len();
        nodes.push(Node::Leaf { value: mean });

        let depth_reached = self.params.max_depth.is_some_and(|d| depth >= d);
        if samples.len() < self.params.min_samples_split || sse <= f64::EPSILON || depth_reached {
            return id;
        }

        let Some(split) = self.best_split(&samples, mean) else {
            return id;
        };

        self.importances[split.feature] += (sse - split.sse).max(0.0);

        let (left, right): (Vec<usize>, Vec<usize>) = samples
            .into_iter()
            .partition(|&i| self.x[i][split.feature] <= split.threshold);

        let left = self.grow(nodes, left, depth + 1);
        let right = self.grow(nodes, right, depth + 1);
        nodes[id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        id
    }

    /// Draws `max_features` candidates; if none of them can separate the
    /// node, keeps trying the remaining features in drawn order.
    fn best_split(&mut self, samples: &[usize], mean: f64) -> Option<Split> {
        let n_features = self.x[samples[0]].len();
        let mut order: Vec<usize> = (0..n_features).collect();
        order.shuffle(&mut *self.rng);

        let mut best: Option<Split> = None;
        for (visited, &feature) in order.iter().enumerate() {
            if visited >= self.params.max_features && best.is_some() {
                break;
            }
            if let Some(candidate) = self.best_split_on(feature, samples, mean) {
                if best.map_or(true, |b| candidate.sse < b.sse) {
                    best = Some(candidate);
                }
            }
        }
        best
    }

    fn best_split_on(&self, feature: usize, samples: &[usize], mean: f64) -> Option<Split> {
        let mut pairs: Vec<(f64, f64)> = samples
            .iter()
            .map(|&i| (self.x[i][feature], self.y[i] - mean))
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let n = pairs.len();
        let total_sum: f64 = pairs.iter().map(|p| p.1).sum();
        let total_sq: f64 = pairs.iter().map(|p| p.1 * p.1).sum();

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        let mut best: Option<Split> = None;

        for k in 1..n {
            let (prev_x, prev_y) = pairs[k - 1];
            left_sum += prev_y;
            left_sq += prev_y * prev_y;

            let next_x = pairs[k].0;
            if prev_x >= next_x {
                continue;
            }

            let nl = k as f64;
            let nr = (n - k) as f64;
            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let sse = (left_sq - left_sum * left_sum / nl).max(0.0)
                + (right_sq - right_sum * right_sum / nr).max(0.0);

            if best.map_or(true, |b| sse < b.sse) {
                let mid = prev_x + (next_x - prev_x) / 2.0;
                let threshold = if mid < next_x { mid } else { prev_x };
                best = Some(Split {
                    feature,
                    threshold,
                    sse,
                });
            }
        }
        best
    }
}
