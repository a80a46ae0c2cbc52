//! Datasets are polars data frames. [`DatasetExt`] adds the column lookups
//! the analyses share: case-insensitive names, numeric checks and date
//! casting.

use crate::error::{Result, ToolkitError};
use crate::models::Value;
use chrono::NaiveDate;
use polars::prelude::*;

/// A loaded price file
pub type Dataset = DataFrame;

pub trait DatasetExt {
    /// Stored name of `name`: exact match first, then ASCII case-insensitive
    fn resolve(&self, name: &str) -> Result<String>;

    /// `name` as a Float64 expression. Fails unless the column is numeric.
    fn numeric(&self, name: &str) -> Result<Expr>;

    /// Copy with column `name` typed as a date. Text is parsed strictly with
    /// `format`, so one malformed cell fails the whole cast.
    fn with_dates(&self, name: &str, format: &str) -> Result<DataFrame>;

    fn date_values(&self, name: &str) -> Result<Vec<Option<NaiveDate>>>;

    fn f64_values(&self, name: &str) -> Result<Vec<Option<f64>>>;

    fn row_values(&self, row: usize) -> Result<Vec<Value>>;

    /// First `n` rows as a printable table
    fn show(&self, n: usize) -> String;
}

impl DatasetExt for DataFrame {
    fn resolve(&self, name: &str) -> Result<String> {
        let names = self.get_column_names_str();
        names
            .iter()
            .find(|c| **c == name)
            .or_else(|| names.iter().find(|c| c.eq_ignore_ascii_case(name)))
            .map(|c| c.to_string())
            .ok_or_else(|| ToolkitError::ColumnNotFound(name.to_string()))
    }

    fn numeric(&self, name: &str) -> Result<Expr> {
        let name = self.resolve(name)?;
        let dtype = self.column(&name)?.dtype();
        if !dtype.is_primitive_numeric() {
            return Err(ToolkitError::NotNumeric {
                found: dtype.clone(),
                column: name,
            });
        }
        Ok(col(name.as_str()).cast(DataType::Float64))
    }

    fn with_dates(&self, name: &str, format: &str) -> Result<DataFrame> {
        let name = self.resolve(name)?;
        let dates = match self.column(&name)?.dtype() {
            DataType::Date => return Ok(self.clone()),
            DataType::String => col(name.as_str()).str().to_date(StrptimeOptions {
                format: Some(format.into()),
                strict: true,
                // Timestamps keep only their date part
                exact: false,
                ..Default::default()
            }),
            dtype if dtype.is_temporal() => col(name.as_str()).cast(DataType::Date),
            other => {
                return Err(ToolkitError::NotDate {
                    found: other.clone(),
                    column: name,
                })
            }
        };
        Ok(self.clone().lazy().with_column(dates).collect()?)
    }

    fn date_values(&self, name: &str) -> Result<Vec<Option<NaiveDate>>> {
        let name = self.resolve(name)?;
        let column = self.column(&name)?;
        if column.dtype() != &DataType::Date {
            return Err(ToolkitError::NotDate {
                found: column.dtype().clone(),
                column: name,
            });
        }
        Ok(column.date()?.as_date_iter().collect())
    }

    fn f64_values(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let values = self
            .clone()
            .lazy()
            .select([self.numeric(name)?])
            .collect()?;
        let column = &values.get_columns()[0];
        Ok(column.f64()?.into_iter().collect())
    }

    fn row_values(&self, row: usize) -> Result<Vec<Value>> {
        self.get_columns()
            .iter()
            .map(|column| Ok(Value::from(column.get(row)?)))
            .collect()
    }

    fn show(&self, n: usize) -> String {
        self.head(Some(n)).to_string()
    }
}
