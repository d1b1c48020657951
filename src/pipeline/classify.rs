//! Inference pipeline - flow CSV to prediction records
//!
//! The live path never fails: missing or unreadable input yields an empty
//! result, missing artifacts yield `UNKNOWN` labels, and an undecodable class
//! code is kept as the raw code. The offline path (`classify_file`) reports
//! those conditions as errors instead.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::flows::{write_predictions, FlowRecord, FlowTable, Prediction};
use crate::model::ArtifactBundle;

#[derive(Debug, Error)]
pub enum ClassifyFileError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{0} has no flow rows")]
    NoRows(PathBuf),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Result of an offline run
#[derive(Debug)]
pub struct ClassifyFileReport {
    pub output: PathBuf,
    pub counts: BTreeMap<String, usize>,
}

/// `<dir>/<stem>_with_pred.csv` next to the input
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("flows");
    input.with_file_name(format!("{}_with_pred.csv", stem))
}

/// Classify a saved flow CSV and write the annotated copy.
///
/// Unlike `classify_flows` there is no degraded mode: the bundle is required
/// and an unreadable or row-less input is an error.
pub fn classify_file(
    input: &Path,
    output: Option<&Path>,
    bundle: &ArtifactBundle,
) -> Result<ClassifyFileReport, ClassifyFileError> {
    let table = FlowTable::read(input).map_err(|source| ClassifyFileError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    if table.is_empty() {
        return Err(ClassifyFileError::NoRows(input.to_path_buf()));
    }

    let predictions = predict(&table, bundle);
    let output = output.map(Path::to_path_buf).unwrap_or_else(|| default_output_path(input));
    write_predictions(&output, &table, &predictions).map_err(|source| ClassifyFileError::Write {
        path: output.clone(),
        source,
    })?;
    tracing::debug!("Classified {} rows from {}", table.len(), input.display());

    Ok(ClassifyFileReport {
        output,
        counts: label_counts(&predictions),
    })
}

/// Classify the flows in `csv`.
///
/// When `predictions_csv` is given, the annotated table is written there.
pub fn classify_flows(
    csv: &Path,
    predictions_csv: Option<&Path>,
    bundle: Option<&ArtifactBundle>,
) -> Vec<FlowRecord> {
    if let Some(path) = predictions_csv {
        if let Err(e) = std::fs::remove_file(path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Could not remove stale {}: {}", path.display(), e);
            }
        }
    }

    let empty_file = std::fs::metadata(csv).map(|m| m.len() == 0).unwrap_or(true);
    if empty_file {
        tracing::warn!("No flow file or file is empty: {}", csv.display());
        return Vec::new();
    }

    let table = match FlowTable::read(csv) {
        Ok(table) => table,
        Err(e) => {
            tracing::error!("Error reading flow CSV {}: {}", csv.display(), e);
            return Vec::new();
        }
    };

    if table.is_empty() {
        tracing::warn!("Flow CSV parsed but has no rows");
        return Vec::new();
    }

    let predictions = match bundle {
        Some(bundle) => predict(&table, bundle),
        None => {
            tracing::warn!("Model artifacts not loaded, marking all flows as UNKNOWN");
            vec![Prediction::unknown(); table.len()]
        }
    };

    if predictions.is_empty() {
        return Vec::new();
    }

    if let Some(path) = predictions_csv {
        match write_predictions(path, &table, &predictions) {
            Ok(()) => tracing::debug!("Saved predictions to {}", path.display()),
            Err(e) => tracing::warn!("Could not write {}: {}", path.display(), e),
        }
    }

    for (label, count) in label_counts(&predictions) {
        tracing::info!("Prediction {}: {} flows", label, count);
    }

    FlowRecord::from_table(&table, &predictions)
}

/// Align, scale, predict and decode every row of `table`
pub fn predict(table: &FlowTable, bundle: &ArtifactBundle) -> Vec<Prediction> {
    let mut features = table.feature_matrix(&bundle.expected_features);
    if features.nrows() == 0 {
        tracing::warn!("Aligned feature matrix has 0 rows");
        return Vec::new();
    }

    bundle.scaler.transform(&mut features);
    let codes = bundle.classifier.predict(features.view());

    match bundle.encoder.inverse_transform(&codes) {
        Ok(labels) => labels.into_iter().map(Prediction::Label).collect(),
        Err(e) => {
            tracing::warn!("Label decoding failed ({}), keeping raw class codes", e);
            codes.into_iter().map(Prediction::Code).collect()
        }
    }
}

pub fn label_counts(predictions: &[Prediction]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for prediction in predictions {
        *counts.entry(prediction.to_string()).or_insert(0) += 1;
    }
    counts
}
