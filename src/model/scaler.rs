//! Standard scaler

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

/// Per-feature standardization `(x - mean) / scale`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.mean.len() != self.scale.len() {
            return Err(format!(
                "scaler has {} means but {} scales",
                self.mean.len(),
                self.scale.len()
            ));
        }
        Ok(())
    }

    /// Scale every row in place. Column count must equal `n_features()`.
    pub fn transform(&self, matrix: &mut Array2<f64>) {
        for mut row in matrix.axis_iter_mut(Axis(0)) {
            for (j, value) in row.iter_mut().enumerate() {
                let scale = match self.scale[j] {
                    s if s == 0.0 || !s.is_finite() => 1.0,
                    s => s,
                };
                *value = (*value - self.mean[j]) / scale;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_transform_standardizes_columns() {
        let scaler = StandardScaler {
            mean: vec![10.0, 0.0],
            scale: vec![2.0, 0.5],
        };
        let mut m = array![[12.0, 1.0], [10.0, -0.5]];
        scaler.transform(&mut m);
        assert_eq!(m, array![[1.0, 2.0], [0.0, -1.0]]);
    }

    #[test]
    fn test_zero_scale_only_centers() {
        let scaler = StandardScaler {
            mean: vec![3.0],
            scale: vec![0.0],
        };
        let mut m = array![[5.0]];
        scaler.transform(&mut m);
        assert_eq!(m[[0, 0]], 2.0);
    }

    #[test]
    fn test_validate_rejects_length_mismatch() {
        let scaler = StandardScaler {
            mean: vec![0.0, 1.0],
            scale: vec![1.0],
        };
        assert!(scaler.validate().is_err());
    }
}
