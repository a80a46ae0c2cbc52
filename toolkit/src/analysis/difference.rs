use super::{dated, sort_options, CLOSE, STOCK_DIFFERENCE};
use crate::{
    error::Result,
    models::{Dataset, DatasetExt},
};
use polars::prelude::*;

const ROW_INDEX: &str = "__row_index";

/// Close-to-close change between consecutive days, in date order.
/// The first row has no predecessor and gets a null difference.
pub fn daily_difference(dataset: &Dataset) -> Result<Dataset> {
    let (frame, date) = dated(dataset)?;
    lag_difference(frame, &date)
}

/// Close-to-close change between the first trading day of each month
pub fn monthly_difference(dataset: &Dataset) -> Result<Dataset> {
    let (frame, date) = dated(dataset)?;
    let month = [
        col(date.as_str()).dt().year(),
        col(date.as_str()).dt().month(),
    ];

    let month_starts = frame
        .lazy()
        .sort_by_exprs([col(date.as_str())], sort_options(false))
        .with_row_index(ROW_INDEX, None)
        .filter(col(ROW_INDEX).eq(col(ROW_INDEX).min().over(month)))
        .collect()?
        .drop(ROW_INDEX)?;
    lag_difference(month_starts, &date)
}

fn lag_difference(frame: DataFrame, date: &str) -> Result<Dataset> {
    let close = frame.numeric(CLOSE)?;
    Ok(frame
        .lazy()
        .sort_by_exprs([col(date)], sort_options(false))
        .with_column((close.clone() - close.shift(lit(1))).alias(STOCK_DIFFERENCE))
        .collect()?)
}
