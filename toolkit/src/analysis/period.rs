use super::{dated, sort_options};
use crate::{
    error::Result,
    models::{Dataset, DatasetExt},
    utils::DatePart,
};
use polars::prelude::*;

/// Yearly mean of `column`
pub fn get_average_year(dataset: &Dataset, column: &str) -> Result<Dataset> {
    average_by_period(dataset, column, DatePart::Year)
}

/// Mean of `column` per (year, month)
pub fn get_average_month(dataset: &Dataset, column: &str) -> Result<Dataset> {
    average_by_period(dataset, column, DatePart::Month)
}

/// Mean of `column` per (year, ISO week)
pub fn get_average_week(dataset: &Dataset, column: &str) -> Result<Dataset> {
    average_by_period(dataset, column, DatePart::Week)
}

/// Groups rows by the calendar period of their date and averages `column`.
///
/// Output columns are `year`, then `month` or `week` when the period has one,
/// then `average_{column}`. Groups come out in ascending key order, with the
/// null-date group first. Nulls in `column` are skipped and an all-null group
/// averages to null.
///
/// The year is always the calendar year of the date, even when its ISO week
/// belongs to the neighbouring year.
pub fn average_by_period(dataset: &Dataset, column: &str, part: DatePart) -> Result<Dataset> {
    let (frame, date) = dated(dataset)?;
    let values = frame.numeric(column)?;
    let date = col(date.as_str());

    let mut keys = vec![date.clone().dt().year().cast(DataType::Int32).alias("year")];
    let mut order = vec![col("year")];
    let sub = match part {
        DatePart::Year => None,
        DatePart::Month => Some(date.dt().month()),
        DatePart::Week => Some(date.dt().week()),
    };
    if let (Some(sub), Some(label)) = (sub, part.sub_label()) {
        keys.push(sub.cast(DataType::Int32).alias(label));
        order.push(col(label));
    }

    Ok(frame
        .lazy()
        .group_by(keys)
        .agg([values.mean().alias(format!("average_{}", column))])
        .sort_by_exprs(order, sort_options(false))
        .collect()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::{date, floats};
    use crate::models::Value;

    fn prices() -> Dataset {
        df!(
            "Date" => ["2024-02-10", "2023-12-30", "2024-01-03", "2024-01-20", "2024-12-30"],
            "Close" => [Some(30.0), Some(5.0), Some(10.0), Some(20.0), None],
        )
        .unwrap()
    }

    fn rows(ds: &Dataset) -> Vec<Vec<Value>> {
        (0..ds.height()).map(|i| ds.row_values(i).unwrap()).collect()
    }

    #[test]
    fn test_yearly_average() {
        let out = get_average_year(&prices(), "Close").unwrap();
        assert_eq!(out.get_column_names_str(), vec!["year", "average_Close"]);
        assert_eq!(
            rows(&out),
            vec![
                vec![Value::Integer(2023), Value::Float(5.0)],
                vec![Value::Integer(2024), Value::Float(20.0)],
            ]
        );
    }

    #[test]
    fn test_monthly_average_is_sorted_group_mean() {
        let out = get_average_month(&prices(), "Close").unwrap();
        assert_eq!(out.get_column_names_str(), vec!["year", "month", "average_Close"]);

        let keys: Vec<Vec<Value>> = rows(&out).into_iter().map(|r| r[..2].to_vec()).collect();
        assert_eq!(
            keys,
            vec![
                vec![Value::Integer(2023), Value::Integer(12)],
                vec![Value::Integer(2024), Value::Integer(1)],
                vec![Value::Integer(2024), Value::Integer(2)],
                vec![Value::Integer(2024), Value::Integer(12)],
            ]
        );
        assert_eq!(
            floats(&out, "average_Close"),
            vec![Some(5.0), Some(15.0), Some(30.0), None]
        );
    }

    #[test]
    fn test_weekly_average_uses_calendar_year_and_iso_week() {
        let out = get_average_week(&prices(), "Close").unwrap();
        assert_eq!(out.get_column_names_str(), vec!["year", "week", "average_Close"]);

        let rows = rows(&out);
        // 2024-12-30 falls in ISO week 1 and groups with 2024-01-03
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], vec![Value::Integer(2023), Value::Integer(52), Value::Float(5.0)]);
        assert_eq!(rows[1], vec![Value::Integer(2024), Value::Integer(1), Value::Float(10.0)]);
        assert_eq!(rows[2], vec![Value::Integer(2024), Value::Integer(3), Value::Float(20.0)]);
        assert_eq!(rows[3], vec![Value::Integer(2024), Value::Integer(6), Value::Float(30.0)]);
    }

    #[test]
    fn test_null_dates_form_first_group() {
        let ds = df!(
            "Date" => [Some(date(2024, 5, 1)), None, None],
            "Close" => [1.0, 2.0, 4.0],
        )
        .unwrap();
        let out = get_average_year(&ds, "close").unwrap();
        assert_eq!(out.height(), 2);
        assert_eq!(out.row_values(0).unwrap(), vec![Value::Null, Value::Float(3.0)]);
        assert_eq!(out.row_values(1).unwrap(), vec![Value::Integer(2024), Value::Float(1.0)]);
    }
}
