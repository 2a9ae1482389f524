//! Logistic regression trained by batch gradient descent

use super::{check_training_input, sigmoid, ClassProbabilities, Classifier};
use crate::error::{Result, RuntimeError};
use crate::transform::Matrix;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticParams {
    pub learning_rate: f64,
    pub max_iter: usize,
    /// L2 penalty on the weights (not the bias)
    pub l2: f64,
    /// Stop once the largest gradient component falls below this
    pub tolerance: f64,
}

impl Default for LogisticParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            max_iter: 500,
            l2: 1e-4,
            tolerance: 1e-6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    params: LogisticParams,
    weights: Option<Vec<f64>>,
    bias: f64,
}

impl LogisticRegression {
    pub fn new(params: LogisticParams) -> Self {
        Self {
            params,
            weights: None,
            bias: 0.0,
        }
    }

    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    fn score(weights: &[f64], bias: f64, row: &[f64]) -> f64 {
        bias + weights.iter().zip(row).map(|(w, x)| w * x).sum::<f64>()
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new(LogisticParams::default())
    }
}

impl Classifier for LogisticRegression {
    fn name(&self) -> &str {
        "logistic_regression"
    }

    fn fit(&mut self, x: &Matrix, y: &[u8]) -> Result<()> {
        check_training_input(x, y)?;
        if self.params.learning_rate <= 0.0 {
            return Err(RuntimeError::InvalidConfig(format!(
                "learning_rate must be positive, got {}",
                self.params.learning_rate
            )));
        }

        let n = x.n_rows() as f64;
        let mut weights = vec![0.0; x.n_cols()];
        let mut bias = 0.0;
        let mut iterations = 0;

        for _ in 0..self.params.max_iter {
            iterations += 1;
            let mut grad_w = vec![0.0; weights.len()];
            let mut grad_b = 0.0;

            for (row, label) in x.rows().iter().zip(y) {
                let error = sigmoid(Self::score(&weights, bias, row)) - f64::from(*label);
                for (g, value) in grad_w.iter_mut().zip(row) {
                    *g += error * value;
                }
                grad_b += error;
            }

            let mut largest = (grad_b / n).abs();
            for (w, g) in weights.iter_mut().zip(&grad_w) {
                let step = g / n + self.params.l2 * *w;
                largest = largest.max(step.abs());
                *w -= self.params.learning_rate * step;
            }
            bias -= self.params.learning_rate * grad_b / n;

            if largest < self.params.tolerance {
                break;
            }
        }

        tracing::debug!(iterations, features = weights.len(), "Fitted logistic regression");
        self.weights = Some(weights);
        self.bias = bias;
        Ok(())
    }

    fn predict_proba(&self, x: &Matrix) -> Result<Vec<ClassProbabilities>> {
        let weights = self
            .weights
            .as_deref()
            .ok_or_else(|| RuntimeError::NotFitted(self.name().to_string()))?;
        x.ensure_width(weights.len())?;

        x.rows()
            .iter()
            .map(|row| ClassProbabilities::from_recovered(sigmoid(Self::score(weights, self.bias, row))))
            .collect()
    }
}
