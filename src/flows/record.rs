use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::FlowTable;

pub const UNKNOWN_LABEL: &str = "UNKNOWN";

/// Flow columns echoed back with each prediction, in output order
pub const RECORD_COLUMNS: [&str; 5] = ["src_ip", "src_port", "dst_ip", "dst_port", "timestamp"];

/// Classifier output for one flow
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Prediction {
    /// Decoded class label, or `UNKNOWN` when no model is loaded
    Label(String),
    /// Raw class code, kept when label decoding fails
    Code(i64),
}

impl Prediction {
    pub fn unknown() -> Self {
        Prediction::Label(UNKNOWN_LABEL.to_string())
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Label(label) => f.write_str(label),
            Prediction::Code(code) => write!(f, "{}", code),
        }
    }
}

/// Flow identity plus its prediction, as served by `/api/flows`.
///
/// Identity columns missing from the extractor output are omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_ip: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_port: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dst_ip: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dst_port: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,
    #[serde(rename = "Prediction")]
    pub prediction: Prediction,
}

impl FlowRecord {
    /// One record per table row, zipped with `predictions`
    pub fn from_table(table: &FlowTable, predictions: &[Prediction]) -> Vec<FlowRecord> {
        let [src_ip, src_port, dst_ip, dst_port, timestamp] = RECORD_COLUMNS.map(|name| table.column(name));
        let cell = |row: usize, col: Option<usize>| col.map(|c| table.json_value(row, c));

        predictions
            .iter()
            .enumerate()
            .map(|(row, prediction)| FlowRecord {
                src_ip: cell(row, src_ip),
                src_port: cell(row, src_port),
                dst_ip: cell(row, dst_ip),
                dst_port: cell(row, dst_port),
                timestamp: cell(row, timestamp),
                prediction: prediction.clone(),
            })
            .collect()
    }
}
