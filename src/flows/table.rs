//! Flow table - raw extractor CSV with per-column numeric typing

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use ndarray::Array2;
use serde_json::Value;

/// How a column's cells are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Every cell is a whole number, none empty
    Integer,
    /// Every non-empty cell parses as a float
    Float,
    Text,
}

impl ColumnKind {
    pub fn is_numeric(self) -> bool {
        !matches!(self, ColumnKind::Text)
    }
}

#[derive(Debug, Clone)]
pub struct FlowTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    kinds: Vec<ColumnKind>,
    /// Header name -> first column carrying it
    index: HashMap<String, usize>,
}

impl FlowTable {
    pub fn read(path: &Path) -> Result<Self, csv::Error> {
        Self::from_reader(File::open(path)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            if record.len() > headers.len() {
                tracing::warn!(
                    "Flow row {} has {} cells for {} columns, dropping the extra cells",
                    rows.len() + 1,
                    record.len(),
                    headers.len()
                );
            }
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        let kinds = (0..headers.len())
            .map(|col| column_kind(rows.iter().map(|row| row[col].as_str())))
            .collect();

        let mut index = HashMap::new();
        for (i, name) in headers.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }

        Ok(Self { headers, rows, kinds, index })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    #[cfg(test)]
    fn kind(&self, col: usize) -> ColumnKind {
        self.kinds[col]
    }

    /// Cleaned numeric value: empty, NaN and infinite cells read as 0
    pub fn numeric(&self, row: usize, col: usize) -> f64 {
        match self.rows[row][col].parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => 0.0,
        }
    }

    /// Feature matrix with one column per name in `features`.
    ///
    /// Names absent from the table, or naming a non-numeric column, are
    /// zero-filled. Other columns are dropped.
    pub fn feature_matrix(&self, features: &[String]) -> Array2<f64> {
        let sources: Vec<Option<usize>> = features
            .iter()
            .map(|name| self.column(name).filter(|&col| self.kinds[col].is_numeric()))
            .collect();

        let mut matrix = Array2::zeros((self.rows.len(), features.len()));
        for (j, source) in sources.iter().enumerate() {
            if let Some(col) = *source {
                for i in 0..self.rows.len() {
                    matrix[[i, j]] = self.numeric(i, col);
                }
            }
        }
        matrix
    }

    /// JSON rendering of a cell following its column's type
    pub fn json_value(&self, row: usize, col: usize) -> Value {
        let cell = &self.rows[row][col];
        match self.kinds[col] {
            ColumnKind::Integer => cell
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or(Value::Null),
            ColumnKind::Float => cell
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            ColumnKind::Text if cell.is_empty() => Value::Null,
            ColumnKind::Text => Value::String(cell.clone()),
        }
    }
}

fn column_kind<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnKind {
    let mut kind = ColumnKind::Integer;
    for cell in cells {
        if cell.is_empty() {
            kind = ColumnKind::Float;
        } else if cell.parse::<i64>().is_ok() {
            continue;
        } else if cell.parse::<f64>().is_ok() {
            kind = ColumnKind::Float;
        } else {
            return ColumnKind::Text;
        }
    }
    kind
}
