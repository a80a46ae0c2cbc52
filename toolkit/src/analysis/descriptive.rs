use super::{dated, COMPANY_NAME, DATE};
use crate::{
    error::{Result, ToolkitError},
    models::{
        ColumnSummary, CorrelationMatrix, Dataset, DatasetExt, DatasetReport, NullCount,
        SampleRows, SchemaField, TimeSpan, Value,
    },
    utils::{format_span_days, Logger, Timer},
};
use polars::prelude::*;

/// Rows kept in the report sample
pub const SAMPLE_ROWS: usize = 10;

/// Earliest date, latest date and the distance between them
pub fn calculate_time_span(dataset: &Dataset) -> Result<TimeSpan> {
    let (frame, date) = dated(dataset)?;
    let bounds = frame
        .lazy()
        .select([
            col(date.as_str()).min().alias("start"),
            col(date.as_str()).max().alias("end"),
        ])
        .collect()?;

    let start = bounds.date_values("start")?.into_iter().flatten().next();
    let end = bounds.date_values("end")?.into_iter().flatten().next();
    match (start, end) {
        (Some(start), Some(end)) => Ok(TimeSpan::new(start, end)),
        _ => Err(ToolkitError::EmptyColumn(date)),
    }
}

/// Pearson correlation matrix of every column except Date and company_name.
/// The remaining columns must be numeric and free of nulls.
pub fn calculate_corr(dataset: &Dataset) -> Result<CorrelationMatrix> {
    let names: Vec<String> = dataset
        .get_column_names_str()
        .into_iter()
        .filter(|c| !c.eq_ignore_ascii_case(DATE) && !c.eq_ignore_ascii_case(COMPANY_NAME))
        .map(String::from)
        .collect();

    let mut series = Vec::with_capacity(names.len());
    for name in &names {
        let nulls = dataset.column(name)?.null_count();
        if nulls > 0 {
            return Err(ToolkitError::NullValue {
                column: name.clone(),
                nulls,
            });
        }
        series.push(dataset.numeric(name)?);
    }

    let n = names.len();
    if n == 0 {
        return Ok(CorrelationMatrix::new(names, Vec::new()));
    }

    // One pass computes the upper triangle; the matrix is symmetric
    let pair = |i: usize, j: usize| format!("{}_{}", i, j);
    let mut coefficients = Vec::with_capacity(n * (n + 1) / 2);
    for i in 0..n {
        for j in i..n {
            coefficients.push(pearson_corr(series[i].clone(), series[j].clone()).alias(pair(i, j)));
        }
    }
    let row = dataset.clone().lazy().select(coefficients).collect()?;

    let mut values = vec![f64::NAN; n * n];
    for i in 0..n {
        for j in i..n {
            let r = row.column(&pair(i, j))?.f64()?.get(0).unwrap_or(f64::NAN);
            values[i * n + j] = r;
            values[j * n + i] = r;
        }
    }
    Ok(CorrelationMatrix::new(names, values))
}

/// Count, mean, sample standard deviation, min and max of one column.
/// Mean and deviation are only defined for numeric columns.
pub fn describe_column(column: &Column) -> Result<ColumnSummary> {
    let name = column.name().as_str();
    let numeric = column.dtype().is_primitive_numeric();

    let mut stats = vec![col(name).min().alias("min"), col(name).max().alias("max")];
    if numeric {
        let values = col(name).cast(DataType::Float64);
        stats.push(values.clone().mean().alias("mean"));
        stats.push(values.std(1).alias("stddev"));
    }
    let summary = DataFrame::new(vec![column.clone()])?
        .lazy()
        .select(stats)
        .collect()?;

    let cell = |label: &str| -> Result<Value> { Ok(Value::from(summary.column(label)?.get(0)?)) };
    let (mean, stddev) = if numeric {
        (
            summary.column("mean")?.f64()?.get(0),
            summary.column("stddev")?.f64()?.get(0),
        )
    } else {
        (None, None)
    };

    Ok(ColumnSummary {
        name: name.to_string(),
        dtype: column.dtype().to_string(),
        count: column.len() - column.null_count(),
        mean,
        stddev,
        min: cell("min")?,
        max: cell("max")?,
    })
}

/// Diagnostic report of a dataset: schema, first rows, row count, time span,
/// per-column statistics, null counts and the correlation matrix
pub fn get_info_df(dataset: &Dataset, file: &str) -> Result<DatasetReport> {
    let logger = Logger::new("REPORT");
    let timer = Timer::start(&format!("report for {}", file));

    let schema = dataset
        .get_columns()
        .iter()
        .map(|c| SchemaField {
            name: c.name().to_string(),
            dtype: c.dtype().to_string(),
        })
        .collect();

    let head = dataset.head(Some(SAMPLE_ROWS));
    let sample = SampleRows {
        columns: dataset
            .get_column_names_str()
            .into_iter()
            .map(String::from)
            .collect(),
        rows: (0..head.height())
            .map(|row| head.row_values(row))
            .collect::<Result<_>>()?,
        table: dataset.show(SAMPLE_ROWS),
    };

    let time_span = calculate_time_span(dataset)?;
    logger.debug(&format!(
        "{} spans {} to {} ({})",
        file,
        time_span.start,
        time_span.end,
        format_span_days(time_span.days())
    ));

    let column_stats = dataset
        .get_columns()
        .iter()
        .map(describe_column)
        .collect::<Result<_>>()?;
    let null_counts = dataset
        .get_columns()
        .iter()
        .map(|c| NullCount {
            column: c.name().to_string(),
            nulls: c.null_count(),
        })
        .collect();

    let correlation = calculate_corr(dataset)?;

    timer.log_elapsed("REPORT");
    Ok(DatasetReport {
        file: file.to_string(),
        schema,
        sample,
        row_count: dataset.height(),
        time_span,
        column_stats,
        null_counts,
        correlation,
    })
}
