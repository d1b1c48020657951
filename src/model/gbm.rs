//! Gradient-boosting classifier
//!
//! Evaluates an exported ensemble of regression trees. Trees use the flat
//! array-of-nodes layout: node `i` is a leaf when both children are `-1`,
//! otherwise samples with `x[feature[i]] <= threshold[i]` go left.

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

/// Trait for inference backends
pub trait Classifier: Send + Sync {
    /// Number of input columns the model expects
    fn n_features(&self) -> usize;

    /// One class code per input row
    fn predict(&self, samples: ArrayView2<'_, f64>) -> Vec<i64>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl RegressionTree {
    fn validate(&self, n_features: usize) -> Result<(), String> {
        let n = self.children_left.len();
        if n == 0 {
            return Err("tree has no nodes".to_string());
        }
        if [self.children_right.len(), self.feature.len(), self.threshold.len(), self.value.len()]
            .iter()
            .any(|len| *len != n)
        {
            return Err("tree node arrays differ in length".to_string());
        }

        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == -1 && right == -1 {
                continue;
            }
            // Children always follow their parent, so traversal terminates.
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(format!("node {} has invalid child {}", node, child));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(format!("node {} splits on missing feature {}", node, feature));
            }
        }
        Ok(())
    }

    pub fn evaluate(&self, sample: &[f64]) -> f64 {
        let mut node = 0usize;
        loop {
            let left = self.children_left[node];
            if left == -1 {
                return self.value[node];
            }
            node = if sample[self.feature[node] as usize] <= self.threshold[node] {
                left as usize
            } else {
                self.children_right[node] as usize
            };
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBoosting {
    /// Input width; the scaler and selector must agree with it
    pub n_features: usize,
    pub learning_rate: f64,
    /// Baseline raw score per output column
    pub init: Vec<f64>,
    /// Class codes; two for a binary model, one per column otherwise
    pub classes: Vec<i64>,
    /// `estimators[stage][column]`
    pub estimators: Vec<Vec<RegressionTree>>,
}

impl GradientBoosting {
    pub fn validate(&self) -> Result<(), String> {
        let columns = self.init.len();
        if columns == 0 {
            return Err("model has no output columns".to_string());
        }
        let expected_classes = if columns == 1 { 2 } else { columns };
        if self.classes.len() != expected_classes {
            return Err(format!(
                "model has {} classes but {} output columns",
                self.classes.len(),
                columns
            ));
        }
        for (stage, trees) in self.estimators.iter().enumerate() {
            if trees.len() != columns {
                return Err(format!("stage {} has {} trees, expected {}", stage, trees.len(), columns));
            }
            for tree in trees {
                tree.validate(self.n_features)
                    .map_err(|e| format!("stage {}: {}", stage, e))?;
            }
        }
        Ok(())
    }

    /// Raw additive scores, one per output column
    pub fn decision_function(&self, sample: &[f64]) -> Vec<f64> {
        let mut scores = self.init.clone();
        for trees in &self.estimators {
            for (score, tree) in scores.iter_mut().zip(trees) {
                *score += self.learning_rate * tree.evaluate(sample);
            }
        }
        scores
    }

    fn class_for(&self, scores: &[f64]) -> i64 {
        if scores.len() == 1 {
            return if scores[0] > 0.0 { self.classes[1] } else { self.classes[0] };
        }
        let mut best = 0;
        for (i, score) in scores.iter().enumerate() {
            if *score > scores[best] {
                best = i;
            }
        }
        self.classes[best]
    }
}

impl Classifier for GradientBoosting {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, samples: ArrayView2<'_, f64>) -> Vec<i64> {
        samples
            .rows()
            .into_iter()
            .map(|row| {
                let sample = row.to_vec();
                self.class_for(&self.decision_function(&sample))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn stump(feature: i64, threshold: f64, left: f64, right: f64) -> RegressionTree {
        RegressionTree {
            children_left: vec![1, -1, -1],
            children_right: vec![2, -1, -1],
            feature: vec![feature, -2, -2],
            threshold: vec![threshold, -2.0, -2.0],
            value: vec![0.0, left, right],
        }
    }

    #[test]
    fn test_binary_decision() {
        let model = GradientBoosting {
            n_features: 2,
            learning_rate: 0.5,
            init: vec![-0.25],
            classes: vec![0, 1],
            estimators: vec![vec![stump(0, 1.0, -1.0, 1.0)], vec![stump(1, 0.0, 0.0, 1.0)]],
        };
        assert!(model.validate().is_ok());

        // -0.25 + 0.5 * (1.0 + 1.0)
        assert_eq!(model.decision_function(&[2.0, 3.0]), vec![0.75]);
        // -0.25 + 0.5 * (-1.0 + 0.0)
        assert_eq!(model.decision_function(&[0.0, -1.0]), vec![-0.75]);

        let samples = array![[2.0, 3.0], [0.0, -1.0], [2.0, -1.0]];
        // last row: -0.25 + 0.5 * 1.0 = 0.25
        assert_eq!(model.predict(samples.view()), vec![1, 0, 1]);
    }

    #[test]
    fn test_multiclass_argmax() {
        let model = GradientBoosting {
            n_features: 1,
            learning_rate: 1.0,
            init: vec![0.0, 0.0, 0.0],
            classes: vec![0, 1, 2],
            estimators: vec![vec![
                stump(0, 0.0, 1.0, 0.0),
                stump(0, 5.0, 0.0, 2.0),
                stump(0, 5.0, 0.5, 0.0),
            ]],
        };
        assert!(model.validate().is_ok());
        let samples = array![[-1.0], [3.0], [9.0]];
        assert_eq!(model.predict(samples.view()), vec![0, 2, 1]);
    }

    #[test]
    fn test_validate_rejects_out_of_range_feature() {
        let model = GradientBoosting {
            n_features: 1,
            learning_rate: 0.1,
            init: vec![0.0],
            classes: vec![0, 1],
            estimators: vec![vec![stump(3, 0.0, 0.0, 1.0)]],
        };
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_backward_child() {
        let mut tree = stump(0, 0.0, 0.0, 1.0);
        tree.children_left[0] = 0;
        let model = GradientBoosting {
            n_features: 1,
            learning_rate: 0.1,
            init: vec![0.0],
            classes: vec![0, 1],
            estimators: vec![vec![tree]],
        };
        assert!(model.validate().is_err());
    }
}
