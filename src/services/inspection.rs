use std::collections::VecDeque;
use std::path::Path;

use anyhow::Result;
use log::info;
use ndarray::Array1;
use serde::Serialize;

use crate::errors::{with_load_context, with_parse_context, with_row_context};
use crate::rating::quantile::{quantile, sorted_array};
use crate::services::ingestion::record_line;

pub const PROFILE_QUANTILES: [f64; 6] = [0.0, 0.05, 0.50, 0.95, 0.99, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    pub missing: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    /// (probability, value) pairs for [`PROFILE_QUANTILES`]
    pub quantiles: Vec<(f64, f64)>,
}

/// Shape, types, missing values and distribution of a review export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetProfile {
    pub rows: usize,
    pub columns: Vec<ColumnProfile>,
    pub head: Vec<Vec<String>>,
    pub tail: Vec<Vec<String>>,
    pub numeric: Vec<NumericSummary>,
}

pub fn profile<P: AsRef<Path>>(path: P, head: usize) -> Result<DatasetProfile> {
    let path = path.as_ref();
    let display = path.display().to_string();
    info!("Profiling {}", display);

    let reader = with_load_context(csv::Reader::from_path(path), &display)?;
    profile_reader(reader, head)
}

pub fn profile_reader<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    head: usize,
) -> Result<DatasetProfile> {
    let headers = with_parse_context(reader.headers(), "CSV header")?.clone();
    let mut builder = ProfileBuilder::new(&headers, head);

    for row in reader.records() {
        let line = record_line(&row);
        let record = with_row_context(row, line)?;
        builder.add(&record);
    }

    Ok(builder.finish())
}

struct ProfileBuilder {
    names: Vec<String>,
    missing: Vec<usize>,
    numbers: Vec<Option<Vec<f64>>>,
    head_limit: usize,
    head: Vec<Vec<String>>,
    tail: VecDeque<Vec<String>>,
    rows: usize,
}

impl ProfileBuilder {
    fn new(headers: &csv::StringRecord, head_limit: usize) -> Self {
        let width = headers.len();
        Self {
            names: headers.iter().map(str::to_string).collect(),
            missing: vec![0; width],
            numbers: vec![Some(Vec::new()); width],
            head_limit,
            head: Vec::new(),
            tail: VecDeque::with_capacity(head_limit),
            rows: 0,
        }
    }

    fn add(&mut self, record: &csv::StringRecord) {
        self.rows += 1;

        for (col, field) in record.iter().enumerate().take(self.names.len()) {
            self.observe(col, field.trim());
        }

        let row: Vec<String> = record.iter().map(str::to_string).collect();
        self.remember(row);
    }

    fn observe(&mut self, col: usize, field: &str) {
        if field.is_empty() {
            self.missing[col] += 1;
            return;
        }

        // A single non-numeric value demotes the column to text
        match field.parse::<f64>() {
            Ok(value) => {
                if let Some(values) = self.numbers[col].as_mut() {
                    values.push(value);
                }
            }
            Err(_) => self.numbers[col] = None,
        }
    }

    fn remember(&mut self, row: Vec<String>) {
        if self.head.len() < self.head_limit {
            self.head.push(row.clone());
        }
        if self.head_limit > 0 {
            if self.tail.len() == self.head_limit {
                self.tail.pop_front();
            }
            self.tail.push_back(row);
        }
    }

    fn finish(self) -> DatasetProfile {
        let mut columns = Vec::with_capacity(self.names.len());
        let mut numeric = Vec::new();

        let observed = self.names.into_iter().zip(self.missing).zip(self.numbers);
        for ((name, missing), values) in observed {
            let kind = match values {
                Some(values) if !values.is_empty() => {
                    numeric.push(summarize_column(&name, values));
                    ColumnKind::Numeric
                }
                _ => ColumnKind::Text,
            };
            columns.push(ColumnProfile {
                name,
                kind,
                missing,
            });
        }

        DatasetProfile {
            rows: self.rows,
            columns,
            head: self.head,
            tail: self.tail.into_iter().collect(),
            numeric,
        }
    }
}

fn summarize_column(name: &str, values: Vec<f64>) -> NumericSummary {
    let count = values.len();
    let data = Array1::from_vec(values);
    let mean = data.mean().unwrap_or(0.0);
    let std = if count > 1 { data.std(1.0) } else { f64::NAN };

    let sorted = sorted_array(data.iter().copied());
    let quantiles = PROFILE_QUANTILES
        .iter()
        .filter_map(|&p| quantile(&sorted, p).ok().map(|v| (p, v)))
        .collect();

    NumericSummary {
        column: name.to_string(),
        count,
        mean,
        std,
        quantiles,
    }
}
