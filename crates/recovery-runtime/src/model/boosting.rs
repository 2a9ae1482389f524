//! Gradient-boosted decision stumps under log loss

use super::{check_training_input, sigmoid, ClassProbabilities, Classifier};
use crate::error::{Result, RuntimeError};
use crate::transform::Matrix;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostingParams {
    pub n_estimators: usize,
    pub learning_rate: f64,
    /// Upper bound on split candidates examined per feature
    pub max_candidates: usize,
    pub min_samples_leaf: usize,
}

impl Default for BoostingParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            learning_rate: 0.1,
            max_candidates: 32,
            min_samples_leaf: 5,
        }
    }
}

/// One-split regression tree on the log-odds scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stump {
    pub feature: usize,
    pub threshold: f64,
    pub left: f64,
    pub right: f64,
}

impl Stump {
    fn predict(&self, row: &[f64]) -> f64 {
        if row[self.feature] <= self.threshold {
            self.left
        } else {
            self.right
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostedStumps {
    params: BoostingParams,
    n_features: Option<usize>,
    base_score: f64,
    stumps: Vec<Stump>,
}

impl GradientBoostedStumps {
    pub fn new(params: BoostingParams) -> Self {
        Self {
            params,
            n_features: None,
            base_score: 0.0,
            stumps: Vec::new(),
        }
    }

    pub fn stumps(&self) -> &[Stump] {
        &self.stumps
    }

    fn raw_score(&self, row: &[f64]) -> f64 {
        self.base_score
            + self.params.learning_rate * self.stumps.iter().map(|s| s.predict(row)).sum::<f64>()
    }

    /// Best split of the residuals, as a Newton-step stump
    fn best_stump(&self, x: &Matrix, residuals: &[f64], hessians: &[f64]) -> Option<Stump> {
        let n = x.n_rows();
        let min_leaf = self.params.min_samples_leaf.max(1);
        if n < 2 * min_leaf {
            return None;
        }

        let mut best: Option<(f64, Stump)> = None;
        for feature in 0..x.n_cols() {
            let mut order: Vec<usize> = (0..n).collect();
            order.sort_by(|a, b| x.rows()[*a][feature].total_cmp(&x.rows()[*b][feature]));

            let total_r: f64 = residuals.iter().sum();
            let total_h: f64 = hessians.iter().sum();
            let step = ((n - 2 * min_leaf) / self.params.max_candidates.max(1)).max(1);

            let mut left_r = 0.0;
            let mut left_h = 0.0;
            let mut position = 0;
            for split in (min_leaf..=n - min_leaf).step_by(step) {
                while position < split {
                    left_r += residuals[order[position]];
                    left_h += hessians[order[position]];
                    position += 1;
                }

                let below = x.rows()[order[split - 1]][feature];
                let above = x.rows()[order[split]][feature];
                if below == above {
                    continue;
                }

                let right_r = total_r - left_r;
                let right_h = total_h - left_h;
                let gain = left_r * left_r / left_h.max(f64::EPSILON)
                    + right_r * right_r / right_h.max(f64::EPSILON);

                if best.as_ref().map_or(true, |(g, _)| gain > *g) {
                    best = Some((
                        gain,
                        Stump {
                            feature,
                            threshold: (below + above) / 2.0,
                            left: left_r / left_h.max(f64::EPSILON),
                            right: right_r / right_h.max(f64::EPSILON),
                        },
                    ));
                }
            }
        }
        best.map(|(_, stump)| stump)
    }
}

impl Default for GradientBoostedStumps {
    fn default() -> Self {
        Self::new(BoostingParams::default())
    }
}

impl Classifier for GradientBoostedStumps {
    fn name(&self) -> &str {
        "gradient_boosting"
    }

    fn fit(&mut self, x: &Matrix, y: &[u8]) -> Result<()> {
        check_training_input(x, y)?;
        if self.params.learning_rate <= 0.0 {
            return Err(RuntimeError::InvalidConfig(format!(
                "learning_rate must be positive, got {}",
                self.params.learning_rate
            )));
        }

        let positives = y.iter().filter(|label| **label == 1).count() as f64;
        let prior = positives / y.len() as f64;
        self.base_score = (prior / (1.0 - prior)).ln();
        self.stumps.clear();

        let targets: Vec<f64> = y.iter().map(|label| f64::from(*label)).collect();
        let mut scores = vec![self.base_score; x.n_rows()];

        for _ in 0..self.params.n_estimators {
            let probs: Vec<f64> = scores.iter().map(|s| sigmoid(*s)).collect();
            let residuals: Vec<f64> = targets.iter().zip(&probs).map(|(t, p)| t - p).collect();
            let hessians: Vec<f64> = probs.iter().map(|p| p * (1.0 - p)).collect();

            let Some(stump) = self.best_stump(x, &residuals, &hessians) else {
                break;
            };
            for (score, row) in scores.iter_mut().zip(x.rows()) {
                *score += self.params.learning_rate * stump.predict(row);
            }
            self.stumps.push(stump);
        }

        self.n_features = Some(x.n_cols());
        tracing::debug!(stumps = self.stumps.len(), "Fitted gradient-boosted stumps");
        Ok(())
    }

    fn predict_proba(&self, x: &Matrix) -> Result<Vec<ClassProbabilities>> {
        let n_features = self
            .n_features
            .ok_or_else(|| RuntimeError::NotFitted(self.name().to_string()))?;
        x.ensure_width(n_features)?;

        x.rows()
            .iter()
            .map(|row| ClassProbabilities::from_recovered(sigmoid(self.raw_score(row))))
            .collect()
    }
}
