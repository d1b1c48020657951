//! Model Module - pre-trained artifact bundle
//!
//! Scaler, feature selector, label encoder and gradient-boosting classifier,
//! loaded from their JSON exports and used read-only for the process lifetime.

pub mod scaler;
pub mod selector;
pub mod encoder;
pub mod gbm;
pub mod artifacts;

// Re-export common types
pub use scaler::StandardScaler;
pub use selector::FeatureSelector;
pub use encoder::{LabelEncoder, DecodeError};
pub use gbm::{Classifier, GradientBoosting, RegressionTree};
pub use artifacts::{ArtifactBundle, ArtifactError, ArtifactStatus};
