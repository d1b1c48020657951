//! Flows Module - extractor CSV in, prediction records out

pub mod table;
pub mod record;
pub mod writer;

pub use table::{ColumnKind, FlowTable};
pub use record::{FlowRecord, Prediction, RECORD_COLUMNS, UNKNOWN_LABEL};
pub use writer::write_predictions;
