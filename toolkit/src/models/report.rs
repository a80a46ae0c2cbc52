//! Structured diagnostics about a dataset.
//!
//! `DatasetReport` only holds computed values. Its `Display` impl renders
//! the console dump; serde renders JSON.

use crate::models::{CorrelationMatrix, Value};
use chrono::{Duration, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

/// First and last date of a dataset and the distance between them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(rename = "span_days", serialize_with = "serialize_days")]
    pub span: Duration,
}

impl TimeSpan {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            span: end - start,
        }
    }

    pub fn days(&self) -> i64 {
        self.span.num_days()
    }
}

fn serialize_days<S: Serializer>(span: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(span.num_days())
}

/// Descriptive statistics of one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    /// Column type as polars names it, e.g. `f64` or `date`
    pub dtype: String,
    /// Non-null cells
    pub count: usize,
    pub mean: Option<f64>,
    pub stddev: Option<f64>,
    pub min: Value,
    pub max: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NullCount {
    pub column: String,
    pub nulls: usize,
}

/// First rows of a dataset in plain cell form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRows {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    /// Pre-rendered table used by the console output
    #[serde(skip)]
    pub table: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaField {
    pub name: String,
    pub dtype: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetReport {
    pub file: String,
    pub schema: Vec<SchemaField>,
    pub sample: SampleRows,
    pub row_count: usize,
    pub time_span: TimeSpan,
    pub column_stats: Vec<ColumnSummary>,
    pub null_counts: Vec<NullCount>,
    pub correlation: CorrelationMatrix,
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "null".to_string(), |v| format!("{:?}", v))
}

impl fmt::Display for DatasetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Infos of the {} file\n", self.file)?;

        writeln!(f, "► Schema of the dataset")?;
        writeln!(f, "root")?;
        for field in &self.schema {
            writeln!(f, " |-- {}: {} (nullable = true)", field.name, field.dtype)?;
        }

        writeln!(f, "\n► Top rows of the dataset")?;
        writeln!(f, "{}", self.sample.table)?;

        writeln!(f, "\n► Row count")?;
        writeln!(f, "{}", self.row_count)?;

        writeln!(f, "\n► Time span")?;
        writeln!(f, "Minimum date {}", self.time_span.start)?;
        writeln!(f, "Maximum date {}", self.time_span.end)?;
        writeln!(f, "{} days", self.time_span.days())?;

        writeln!(f, "\n► Columns info")?;
        for stats in &self.column_stats {
            writeln!(f, "{} ({})", stats.name, stats.dtype)?;
            writeln!(f, "  count   {}", stats.count)?;
            writeln!(f, "  mean    {}", fmt_opt(stats.mean))?;
            writeln!(f, "  stddev  {}", fmt_opt(stats.stddev))?;
            writeln!(f, "  min     {}", stats.min)?;
            writeln!(f, "  max     {}", stats.max)?;
        }

        writeln!(f, "\n► Missing values for each column")?;
        for nulls in &self.null_counts {
            writeln!(f, "{}\tnumber of null values: {}", nulls.column, nulls.nulls)?;
        }

        writeln!(f, "\n► Correlation Matrix")?;
        write!(f, "{}", self.correlation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_span_days() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let span = TimeSpan::new(start, end);
        assert_eq!(span.days(), 60);

        let json = serde_json::to_value(span).unwrap();
        assert_eq!(json["span_days"], 60);
        assert_eq!(json["start"], "2024-01-01");
    }
}
