use chrono::NaiveDate;
use polars::prelude::{DataType, PolarsError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the toolkit. Everything except the missing
/// `Daily_return` column in `get_highest_dr` propagates to the caller.
#[derive(Debug, Error)]
pub enum ToolkitError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("column not found: {0}")]
    ColumnNotFound(String),
    #[error("column {column} is not numeric (found {found})")]
    NotNumeric { column: String, found: DataType },
    #[error("column {column} is not a date column (found {found})")]
    NotDate { column: String, found: DataType },
    #[error("column {column} has {nulls} null values")]
    NullValue { column: String, nulls: usize },
    #[error("column {0} has no non-null values")]
    EmptyColumn(String),
    #[error("no row dated {0} to use as the reference close")]
    MissingReferenceRow(NaiveDate),
    #[error("period of {0} days from the reference date is out of the date range")]
    InvalidPeriod(i64),
    #[error("need at least 2 overlapping rows to correlate, found {0}")]
    InsufficientOverlap(usize),
    #[error("window size must be at least 1, got {0}")]
    InvalidWindow(usize),
    #[error("invalid master {0:?}, expected local, local[N] or local[*]")]
    InvalidMaster(String),
    #[error("delimiter {0:?} is not a single ASCII character")]
    InvalidDelimiter(char),
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ToolkitError>;
