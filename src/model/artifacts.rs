//! Artifact loader
//!
//! The four artifacts are loaded together at startup. Any failure leaves the
//! service without a bundle, which the classifier treats as "unknown" mode.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::ArtifactPaths;
use super::{Classifier, FeatureSelector, GradientBoosting, LabelEncoder, StandardScaler};

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {kind} artifact: {reason}")]
    Invalid { kind: &'static str, reason: String },

    #[error("artifact bundle mismatch: {0}")]
    Mismatch(String),
}

/// Loaded scaler, encoder and classifier.
///
/// The selector only contributes its output names, kept as
/// `expected_features`.
#[derive(Clone)]
pub struct ArtifactBundle {
    pub scaler: StandardScaler,
    pub encoder: LabelEncoder,
    pub classifier: Arc<dyn Classifier>,
    pub expected_features: Vec<String>,
}

impl std::fmt::Debug for ArtifactBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactBundle")
            .field("expected_features", &self.expected_features)
            .field("classes", &self.encoder.classes)
            .finish()
    }
}

impl ArtifactBundle {
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let scaler: StandardScaler = read_json(&paths.scaler)?;
        scaler.validate().map_err(|reason| ArtifactError::Invalid { kind: "scaler", reason })?;

        let selector: FeatureSelector = read_json(&paths.selector)?;
        selector.validate().map_err(|reason| ArtifactError::Invalid { kind: "selector", reason })?;

        let encoder: LabelEncoder = read_json(&paths.label_encoder)?;

        let model: GradientBoosting = read_json(&paths.model)?;
        model.validate().map_err(|reason| ArtifactError::Invalid { kind: "model", reason })?;

        Self::from_parts(scaler, selector, encoder, Arc::new(model))
    }

    pub fn from_parts(
        scaler: StandardScaler,
        selector: FeatureSelector,
        encoder: LabelEncoder,
        classifier: Arc<dyn Classifier>,
    ) -> Result<Self, ArtifactError> {
        let expected_features = selector.feature_names_out();

        if scaler.n_features() != expected_features.len() {
            return Err(ArtifactError::Mismatch(format!(
                "selector keeps {} features but scaler expects {}",
                expected_features.len(),
                scaler.n_features()
            )));
        }
        if classifier.n_features() != expected_features.len() {
            return Err(ArtifactError::Mismatch(format!(
                "selector keeps {} features but model expects {}",
                expected_features.len(),
                classifier.n_features()
            )));
        }

        Ok(Self {
            scaler,
            encoder,
            classifier,
            expected_features,
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// STATUS
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ArtifactFile {
    pub kind: &'static str,
    pub path: String,
    pub sha256: Option<String>,
}

/// Artifact status for the UI
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactStatus {
    pub loaded: bool,
    pub mode: &'static str,
    pub expected_features: Vec<String>,
    pub classes: Vec<String>,
    pub files: Vec<ArtifactFile>,
    pub load_error: Option<String>,
    pub loaded_at: DateTime<Utc>,
}

/// Load the bundle, logging and degrading on failure
pub fn load_or_degrade(paths: &ArtifactPaths) -> (Option<Arc<ArtifactBundle>>, ArtifactStatus) {
    let files = [
        ("scaler", &paths.scaler),
        ("selector", &paths.selector),
        ("label_encoder", &paths.label_encoder),
        ("model", &paths.model),
    ]
    .into_iter()
    .map(|(kind, path)| ArtifactFile {
        kind,
        path: path.display().to_string(),
        sha256: file_digest(path),
    })
    .collect();

    match ArtifactBundle::load(paths) {
        Ok(bundle) => {
            tracing::info!(
                "Model artifacts loaded: {} features, {} classes",
                bundle.expected_features.len(),
                bundle.encoder.classes.len()
            );
            let status = ArtifactStatus {
                loaded: true,
                mode: "model",
                expected_features: bundle.expected_features.clone(),
                classes: bundle.encoder.classes.clone(),
                files,
                load_error: None,
                loaded_at: Utc::now(),
            };
            (Some(Arc::new(bundle)), status)
        }
        Err(e) => {
            tracing::warn!("Could not load model artifacts: {}", e);
            let status = ArtifactStatus {
                loaded: false,
                mode: "unknown",
                expected_features: Vec::new(),
                classes: Vec::new(),
                files,
                load_error: Some(e.to_string()),
                loaded_at: Utc::now(),
            };
            (None, status)
        }
    }
}

fn file_digest(path: &Path) -> Option<String> {
    let bytes = fs::read(path).ok()?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Some(format!("{:x}", hasher.finalize()))
}
