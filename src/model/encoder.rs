//! Label encoder

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("class code {code} is outside the encoder's {n_classes} classes")]
pub struct DecodeError {
    pub code: i64,
    pub n_classes: usize,
}

impl LabelEncoder {
    /// Decode every code; any unknown code fails the whole batch
    pub fn inverse_transform(&self, codes: &[i64]) -> Result<Vec<String>, DecodeError> {
        codes
            .iter()
            .map(|&code| {
                usize::try_from(code)
                    .ok()
                    .and_then(|i| self.classes.get(i))
                    .cloned()
                    .ok_or(DecodeError {
                        code,
                        n_classes: self.classes.len(),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> LabelEncoder {
        LabelEncoder {
            classes: vec!["BENIGN".into(), "DDoS".into()],
        }
    }

    #[test]
    fn test_inverse_transform() {
        assert_eq!(
            encoder().inverse_transform(&[1, 0, 1]).unwrap(),
            vec!["DDoS", "BENIGN", "DDoS"]
        );
    }

    #[test]
    fn test_unknown_code_fails_batch() {
        let err = encoder().inverse_transform(&[0, 7]).unwrap_err();
        assert_eq!(err, DecodeError { code: 7, n_classes: 2 });
        assert!(encoder().inverse_transform(&[-1]).is_err());
    }
}
