use super::{
    dated, filter_by_range, sort_options, CLOSE, DAILY_RETURN, OPEN, RETURN_RATE, TRADING_VALUE,
    VOLUME,
};
use crate::{
    error::{Result, ToolkitError},
    models::{Dataset, DatasetExt, DateRange},
    utils::Logger,
};
use chrono::{Duration, NaiveDate};
use polars::prelude::*;

/// Adds `Daily_return = Close - Open`
pub fn calculate_daily_return(dataset: &Dataset) -> Result<Dataset> {
    let returns = dataset.numeric(CLOSE)? - dataset.numeric(OPEN)?;
    Ok(dataset
        .clone()
        .lazy()
        .with_column(returns.alias(DAILY_RETURN))
        .collect()?)
}

/// Rows ordered by `Daily_return`, highest first, restricted to `range`.
///
/// Returns `Ok(None)` after logging an error when the dataset has no
/// `Daily_return` column; run [`calculate_daily_return`] first.
pub fn get_highest_dr(dataset: &Dataset, range: &DateRange) -> Result<Option<Dataset>> {
    let Ok(returns) = dataset.resolve(DAILY_RETURN) else {
        Logger::new("RETURNS").error(&format!("Error: '{}' column not found.", DAILY_RETURN));
        return Ok(None);
    };

    let frame = if range.is_unbounded() {
        dataset.clone().lazy()
    } else {
        let (frame, date) = dated(dataset)?;
        filter_by_range(frame.lazy(), &date, range)
    };
    let ranked = frame
        .sort_by_exprs([col(returns.as_str())], sort_options(true))
        .collect()?;
    Ok(Some(ranked))
}

/// Rate of return over `period` days from `reference_date`.
///
/// Keeps the rows dated within `[reference_date, reference_date + period]`,
/// takes the close of the first row on `reference_date` as baseline and adds
/// `return_rate = (Close - baseline) / baseline`. Rows come out in date order.
pub fn get_ror_period(dataset: &Dataset, reference_date: NaiveDate, period: i64) -> Result<Dataset> {
    let end = Duration::try_days(period)
        .and_then(|span| reference_date.checked_add_signed(span))
        .ok_or(ToolkitError::InvalidPeriod(period))?;

    let (frame, date) = dated(dataset)?;
    let close = frame.numeric(CLOSE)?;
    let window = filter_by_range(frame.lazy(), &date, &DateRange::between(reference_date, end))
        .sort_by_exprs([col(date.as_str())], sort_options(false))
        .collect()?;

    let reference = window
        .date_values(&date)?
        .into_iter()
        .position(|d| d == Some(reference_date))
        .ok_or(ToolkitError::MissingReferenceRow(reference_date))?;
    let baseline = window.f64_values(CLOSE)?[reference].filter(|b| *b != 0.0);

    let rate = match baseline {
        Some(base) => (close - lit(base)) / lit(base),
        None => lit(NULL).cast(DataType::Float64),
    };
    Ok(window
        .lazy()
        .with_column(rate.alias(RETURN_RATE))
        .collect()?)
}

/// Adds `trading_value = Close * Volume`
pub fn get_trading_value(dataset: &Dataset) -> Result<Dataset> {
    let values = dataset.numeric(CLOSE)? * dataset.numeric(VOLUME)?;
    Ok(dataset
        .clone()
        .lazy()
        .with_column(values.alias(TRADING_VALUE))
        .collect()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::{closes, date, dates, floats};
    use crate::models::Value;

    fn ohlc() -> Dataset {
        df!(
            "Date" => [date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3), date(2024, 1, 4)],
            "Open" => [Some(10.0), Some(10.0), Some(10.0), None],
            "Close" => [13.0, 9.0, 15.0, 8.0],
            "Volume" => [100i64, 200, 0, 50],
        )
        .unwrap()
    }

    #[test]
    fn test_daily_return() {
        let out = calculate_daily_return(&ohlc()).unwrap();
        assert_eq!(out.width(), 5);
        assert_eq!(
            floats(&out, DAILY_RETURN),
            vec![Some(3.0), Some(-1.0), Some(5.0), None]
        );
    }

    #[test]
    fn test_highest_daily_return_first() {
        let with_returns = calculate_daily_return(&ohlc()).unwrap();
        let out = get_highest_dr(&with_returns, &DateRange::all())
            .unwrap()
            .unwrap();
        assert_eq!(
            floats(&out, DAILY_RETURN),
            vec![Some(5.0), Some(3.0), Some(-1.0), None]
        );
    }

    #[test]
    fn test_highest_daily_return_within_range() {
        let with_returns = calculate_daily_return(&ohlc()).unwrap();
        let range = DateRange::between(date(2024, 1, 1), date(2024, 1, 2));
        let out = get_highest_dr(&with_returns, &range).unwrap().unwrap();
        assert_eq!(out.height(), 2);
        assert_eq!(out.row_values(0).unwrap()[0], Value::Date(date(2024, 1, 1)));
    }

    #[test]
    fn test_highest_daily_return_with_lone_bounds() {
        let with_returns = calculate_daily_return(&ohlc()).unwrap();

        let from = DateRange::from_bounds(Some(date(2024, 1, 2)), None);
        let out = get_highest_dr(&with_returns, &from).unwrap().unwrap();
        assert_eq!(
            dates(&out, "Date"),
            vec![Some(date(2024, 1, 3)), Some(date(2024, 1, 2)), Some(date(2024, 1, 4))]
        );

        let until = DateRange::from_bounds(None, Some(date(2024, 1, 2)));
        let out = get_highest_dr(&with_returns, &until).unwrap().unwrap();
        assert_eq!(floats(&out, DAILY_RETURN), vec![Some(3.0), Some(-1.0)]);
    }

    #[test]
    fn test_highest_daily_return_without_column() {
        assert!(get_highest_dr(&ohlc(), &DateRange::all()).unwrap().is_none());
    }

    #[test]
    fn test_rate_of_return_over_period() {
        let ds = closes(&[100.0, 110.0, 95.0, 120.0]);
        let out = get_ror_period(&ds, date(2024, 1, 1), 2).unwrap();
        assert_eq!(out.height(), 3);

        let rates = floats(&out, RETURN_RATE);
        assert_eq!(rates[0], Some(0.0));
        assert!((rates[1].unwrap() - 0.10).abs() < 1e-12);
        assert!((rates[2].unwrap() + 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_rate_of_return_needs_reference_row() {
        let ds = closes(&[100.0, 110.0]);
        let err = get_ror_period(&ds, date(2023, 12, 1), 5).unwrap_err();
        assert!(matches!(err, ToolkitError::MissingReferenceRow(d) if d == date(2023, 12, 1)));
    }

    #[test]
    fn test_rate_of_return_with_zero_baseline() {
        let ds = closes(&[0.0, 5.0]);
        let out = get_ror_period(&ds, date(2024, 1, 1), 1).unwrap();
        assert_eq!(floats(&out, RETURN_RATE), vec![None, None]);
    }

    #[test]
    fn test_rate_of_return_with_out_of_range_period() {
        let ds = closes(&[100.0, 110.0]);
        for period in [200_000_000, i64::MAX, -200_000_000] {
            assert!(matches!(
                get_ror_period(&ds, date(2024, 1, 1), period),
                Err(ToolkitError::InvalidPeriod(p)) if p == period
            ));
        }
    }

    #[test]
    fn test_trading_value() {
        let out = get_trading_value(&ohlc()).unwrap();
        assert_eq!(
            floats(&out, TRADING_VALUE),
            vec![Some(1300.0), Some(1800.0), Some(0.0), Some(400.0)]
        );
    }

    #[test]
    fn test_trading_value_needs_numeric_volume() {
        let ds = df!("Close" => [1.0], "Volume" => ["many"]).unwrap();
        assert!(matches!(
            get_trading_value(&ds),
            Err(ToolkitError::NotNumeric { .. })
        ));
    }
}
