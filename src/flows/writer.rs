use std::path::Path;

use super::{FlowTable, Prediction};

/// Write every flow row with an extra `Prediction` column
pub fn write_predictions(path: &Path, table: &FlowTable, predictions: &[Prediction]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header: Vec<&str> = table.headers().iter().map(String::as_str).collect();
    header.push("Prediction");
    writer.write_record(&header)?;

    for (row, prediction) in table.rows().iter().zip(predictions) {
        let label = prediction.to_string();
        writer.write_record(row.iter().map(String::as_str).chain(std::iter::once(label.as_str())))?;
    }

    writer.flush()?;
    Ok(())
}
