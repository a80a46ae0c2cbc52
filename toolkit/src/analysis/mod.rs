//! Analysis functions over stock datasets.
//!
//! Every function takes its input by reference and returns a new value.
//! Column names are resolved case-insensitively, so `Date`/`date` and
//! `Close`/`close` are interchangeable.

pub mod cross_series;
pub mod descriptive;
pub mod difference;
pub mod period;
pub mod returns;
pub mod visualization;

pub use cross_series::*;
pub use descriptive::*;
pub use difference::*;
pub use period::*;
pub use returns::*;
pub use visualization::*;

use crate::error::Result;
use crate::models::{Dataset, DatasetExt, DateRange};
use crate::utils::DEFAULT_DATE_FORMAT;
use polars::prelude::*;

pub const DATE: &str = "Date";
pub const OPEN: &str = "Open";
pub const CLOSE: &str = "Close";
pub const VOLUME: &str = "Volume";
pub const COMPANY_NAME: &str = "company_name";

pub const STOCK_DIFFERENCE: &str = "stock_difference";
pub const DAILY_RETURN: &str = "Daily_return";
pub const RETURN_RATE: &str = "return_rate";
pub const TRADING_VALUE: &str = "trading_value";

/// The dataset with its Date column typed as a date, plus that column's
/// stored name. Datasets from a session already carry parsed dates; text
/// dates from other sources are read as YYYY-MM-DD.
pub(crate) fn dated(dataset: &Dataset) -> Result<(DataFrame, String)> {
    let date = dataset.resolve(DATE)?;
    let frame = dataset.with_dates(&date, DEFAULT_DATE_FORMAT)?;
    Ok((frame, date))
}

/// Keeps rows whose `date` falls in `range`. Each bound applies on its own
/// and rows with a null date are dropped by any bound.
pub(crate) fn filter_by_range(frame: LazyFrame, date: &str, range: &DateRange) -> LazyFrame {
    let start = range.start.map(|start| col(date).gt_eq(lit(start)));
    let end = range.end.map(|end| col(date).lt_eq(lit(end)));
    let predicate = match (start, end) {
        (Some(start), Some(end)) => Some(start.and(end)),
        (start, end) => start.or(end),
    };
    match predicate {
        Some(predicate) => frame.filter(predicate),
        None => frame,
    }
}

/// Stable sort; ascending puts nulls first, descending puts them last
pub(crate) fn sort_options(descending: bool) -> SortMultipleOptions {
    SortMultipleOptions::default()
        .with_order_descending(descending)
        .with_nulls_last(descending)
        .with_maintain_order(true)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::{Dataset, DatasetExt};
    use chrono::NaiveDate;
    use polars::prelude::*;

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Date/Close dataset over consecutive January 2024 days
    pub fn closes(values: &[f64]) -> Dataset {
        let dates: Vec<NaiveDate> = (0..values.len())
            .map(|i| date(2024, 1, 1 + i as u32))
            .collect();
        df!("Date" => dates, "Close" => values.to_vec()).unwrap()
    }

    pub fn floats(dataset: &Dataset, column: &str) -> Vec<Option<f64>> {
        dataset.f64_values(column).unwrap()
    }

    pub fn dates(dataset: &Dataset, column: &str) -> Vec<Option<NaiveDate>> {
        dataset.date_values(column).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{closes, date, dates};
    use super::*;

    fn in_range(range: DateRange) -> Vec<Option<chrono::NaiveDate>> {
        let frame = closes(&[1.0, 2.0, 3.0, 4.0]);
        let kept = filter_by_range(frame.lazy(), DATE, &range).collect().unwrap();
        dates(&kept, DATE)
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let kept = in_range(DateRange::between(date(2024, 1, 2), date(2024, 1, 3)));
        assert_eq!(kept, vec![Some(date(2024, 1, 2)), Some(date(2024, 1, 3))]);
        assert_eq!(in_range(DateRange::all()).len(), 4);
    }

    #[test]
    fn test_lone_bounds_filter_one_side() {
        let from = in_range(DateRange::from_bounds(Some(date(2024, 1, 3)), None));
        assert_eq!(from, vec![Some(date(2024, 1, 3)), Some(date(2024, 1, 4))]);
        let until = in_range(DateRange::from_bounds(None, Some(date(2024, 1, 1))));
        assert_eq!(until, vec![Some(date(2024, 1, 1))]);
    }

    #[test]
    fn test_dated_parses_text_dates() {
        let ds = df!("date" => ["2024-01-02", "2024-01-01"]).unwrap();
        let (frame, name) = dated(&ds).unwrap();
        assert_eq!(name, "date");
        assert_eq!(dates(&frame, "date"), vec![Some(date(2024, 1, 2)), Some(date(2024, 1, 1))]);
    }
}
