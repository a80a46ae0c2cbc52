use super::{dated, filter_by_range, sort_options, CLOSE, DATE};
use crate::{
    error::{Result, ToolkitError},
    models::{Dataset, DatasetExt, DateRange},
};
use chrono::NaiveDate;
use polars::prelude::*;

/// Pearson correlation between the closing prices of two stocks on the
/// dates both of them traded, optionally restricted to `range`.
///
/// Fails with [`ToolkitError::InsufficientOverlap`] when fewer than two
/// dates have a close in both series.
pub fn calculate_stock_correlation(
    stock1: &Dataset,
    stock2: &Dataset,
    range: &DateRange,
) -> Result<f64> {
    let joined = closes_as(stock1, "close1", range)?
        .join(
            closes_as(stock2, "close2", range)?,
            [col(DATE)],
            [col(DATE)],
            JoinArgs::new(JoinType::Inner),
        )
        .filter(col("close1").is_not_null().and(col("close2").is_not_null()))
        .collect()?;

    if joined.height() < 2 {
        return Err(ToolkitError::InsufficientOverlap(joined.height()));
    }
    let r = joined
        .lazy()
        .select([pearson_corr(col("close1"), col("close2")).alias("r")])
        .collect()?;
    Ok(r.column("r")?.f64()?.get(0).unwrap_or(f64::NAN))
}

/// Date and close of `stock` within `range`, the close renamed to `alias`
fn closes_as(stock: &Dataset, alias: &str, range: &DateRange) -> Result<LazyFrame> {
    let (frame, date) = dated(stock)?;
    let close = frame.numeric(CLOSE)?;
    Ok(filter_by_range(frame.lazy(), &date, range)
        .select([col(date.as_str()).alias(DATE), close.alias(alias)]))
}

/// Trailing simple moving average of `column` over the last `n` rows by date,
/// stored as `{column}_moving_avg`.
///
/// The first `n - 1` rows average the rows available so far. `start_date`
/// only filters the output, so early rows still feed the averages after it.
pub fn calculate_moving_average(
    dataset: &Dataset,
    column: &str,
    n: usize,
    start_date: Option<NaiveDate>,
) -> Result<Dataset> {
    if n == 0 {
        return Err(ToolkitError::InvalidWindow(n));
    }

    let (frame, date) = dated(dataset)?;
    let values = frame.numeric(column)?;
    let averaged = frame
        .lazy()
        .sort_by_exprs([col(date.as_str())], sort_options(false))
        .with_column(
            values
                .rolling_mean(RollingOptionsFixedWindow {
                    window_size: n,
                    min_periods: 1,
                    ..Default::default()
                })
                .alias(format!("{}_moving_avg", column)),
        );

    let from = DateRange::from_bounds(start_date, None);
    Ok(filter_by_range(averaged, &date, &from).collect()?)
}
