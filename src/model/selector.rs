//! Feature selector

use serde::{Deserialize, Serialize};

/// Fitted feature selection mask over the training columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSelector {
    pub feature_names_in: Vec<String>,
    pub support: Vec<bool>,
}

impl FeatureSelector {
    pub fn validate(&self) -> Result<(), String> {
        if self.feature_names_in.len() != self.support.len() {
            return Err(format!(
                "selector has {} input names but a support mask of {}",
                self.feature_names_in.len(),
                self.support.len()
            ));
        }
        if !self.support.iter().any(|s| *s) {
            return Err("selector keeps no features".to_string());
        }
        Ok(())
    }

    /// Names of the kept features, in training column order.
    ///
    /// Names are trimmed the same way flow CSV headers are, so a model
    /// trained on raw cicflowmeter headers (`" Flow Duration"`) still lines up.
    pub fn feature_names_out(&self) -> Vec<String> {
        self.feature_names_in
            .iter()
            .zip(&self.support)
            .filter(|(_, keep)| **keep)
            .map(|(name, _)| name.trim().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_names_out_keeps_order() {
        let selector = FeatureSelector {
            feature_names_in: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            support: vec![false, true, false, true],
        };
        assert!(selector.validate().is_ok());
        assert_eq!(selector.feature_names_out(), vec!["b", "d"]);
    }

    #[test]
    fn test_feature_names_out_are_trimmed() {
        let selector = FeatureSelector {
            feature_names_in: vec![" Flow Duration".into(), "Tot Fwd Pkts ".into()],
            support: vec![true, true],
        };
        assert_eq!(selector.feature_names_out(), vec!["Flow Duration", "Tot Fwd Pkts"]);
    }

    #[test]
    fn test_empty_support_is_invalid() {
        let selector = FeatureSelector {
            feature_names_in: vec!["a".into()],
            support: vec![false],
        };
        assert!(selector.validate().is_err());
    }
}
