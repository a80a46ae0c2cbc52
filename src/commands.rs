use crate::config::AppConfig;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use std::path::{Path, PathBuf};
use stock_toolkit::analysis::{self, DATE};
use stock_toolkit::models::{Dataset, DatasetExt, DateRange, TimeRange};
use stock_toolkit::services::AnalyticsSession;
use stock_toolkit::utils::{format_span_days, DatePart};

/// Date restriction shared by the commands that accept one
#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// First day to include (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Trailing window ending on the last day of the data: 1W, 2W, 1M, 2M, 3M, 6M, 1Y, 2Y or ALL
    #[arg(long, conflicts_with_all = ["start", "end"])]
    pub range: Option<TimeRange>,
}

impl RangeArgs {
    /// `anchor` is only asked for when a trailing range was requested
    pub fn resolve(&self, anchor: impl FnOnce() -> Result<NaiveDate>) -> Result<DateRange> {
        match self.range {
            Some(range) => Ok(DateRange::trailing(range, anchor()?)),
            None => Ok(DateRange::from_bounds(self.start, self.end)),
        }
    }
}

/// Loaded configuration plus the session every command reads through
pub struct Workspace {
    session: AnalyticsSession,
    folder: PathBuf,
    chart_output: PathBuf,
}

impl Workspace {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let session = AnalyticsSession::new(config.session.clone())
            .context("Failed to start analytics session")?;
        Ok(Self {
            session,
            folder: config.data_folder.clone(),
            chart_output: config.chart_output.clone(),
        })
    }

    fn load(&self, file: &str) -> Result<Dataset> {
        self.session
            .read_file(&self.folder, file)
            .with_context(|| format!("Failed to load {} from {}", file, self.folder.display()))
    }

    pub fn info(&self, file: &str, json: bool) -> Result<()> {
        let dataset = self.load(file)?;
        let report = analysis::get_info_df(&dataset, file)
            .with_context(|| format!("Failed to build report for {}", file))?;

        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{}", report);
        }
        Ok(())
    }

    pub fn span(&self, file: &str) -> Result<()> {
        let span = analysis::calculate_time_span(&self.load(file)?)?;
        println!("Minimum date {}", span.start);
        println!("Maximum date {}", span.end);
        println!("{}", format_span_days(span.days()));
        Ok(())
    }

    pub fn correlation(&self, file: &str) -> Result<()> {
        let matrix = analysis::calculate_corr(&self.load(file)?)?;
        println!("{}", matrix);
        Ok(())
    }

    pub fn averages(&self, file: &str, period: DatePart, column: &str) -> Result<()> {
        let dataset = self.load(file)?;
        let averages = analysis::average_by_period(&dataset, column, period)?;
        println!("{}", averages.show(averages.height()));
        Ok(())
    }

    pub fn difference(&self, file: &str, monthly: bool) -> Result<()> {
        let dataset = self.load(file)?;
        let difference = if monthly {
            analysis::monthly_difference(&dataset)?
        } else {
            analysis::daily_difference(&dataset)?
        };
        println!("{}", difference);
        Ok(())
    }

    pub fn daily_return(&self, file: &str) -> Result<()> {
        let returns = analysis::calculate_daily_return(&self.load(file)?)?;
        println!("{}", returns);
        Ok(())
    }

    pub fn highest_returns(&self, file: &str, range: &RangeArgs, limit: usize) -> Result<()> {
        let dataset = analysis::calculate_daily_return(&self.load(file)?)?;
        let range = range.resolve(|| last_day(&dataset))?;
        tracing::info!(range = %range.describe(), "Ranking daily returns");

        if let Some(ranked) = analysis::get_highest_dr(&dataset, &range)? {
            println!("{}", ranked.show(limit));
        }
        Ok(())
    }

    pub fn rate_of_return(&self, file: &str, reference_date: NaiveDate, period: i64) -> Result<()> {
        let rates = analysis::get_ror_period(&self.load(file)?, reference_date, period)
            .with_context(|| format!("Failed to compute rate of return for {}", file))?;
        println!("{}", rates.show(rates.height()));
        Ok(())
    }

    pub fn moving_average(
        &self,
        file: &str,
        column: &str,
        window: usize,
        start: Option<NaiveDate>,
    ) -> Result<()> {
        let averaged =
            analysis::calculate_moving_average(&self.load(file)?, column, window, start)?;
        println!("{}", averaged);
        Ok(())
    }

    pub fn correlate(&self, first: &str, second: &str, range: &RangeArgs) -> Result<()> {
        let stock1 = self.load(first)?;
        let stock2 = self.load(second)?;
        let range = range.resolve(|| Ok(last_day(&stock1)?.min(last_day(&stock2)?)))?;

        let r = analysis::calculate_stock_correlation(&stock1, &stock2, &range)
            .with_context(|| format!("Failed to correlate {} and {}", first, second))?;
        println!(
            "Correlation between {} and {} ({}): {:.4}",
            first,
            second,
            range.describe(),
            r
        );
        Ok(())
    }

    pub fn trading_value(&self, file: &str) -> Result<()> {
        let values = analysis::get_trading_value(&self.load(file)?)?;
        println!("{}", values);
        Ok(())
    }

    pub fn plot(&self, files: &[String], column: &str, output: Option<PathBuf>) -> Result<()> {
        let datasets = self
            .session
            .read_files(&self.folder, files)
            .with_context(|| {
                format!("Failed to load {} from {}", files.join(", "), self.folder.display())
            })?;

        let mut chart = analysis::plot_stock();
        for (file, dataset) in files.iter().zip(&datasets) {
            analysis::add_trace_plot(dataset, column, &mut chart, &series_name(file))?;
        }

        let output = output.unwrap_or_else(|| self.chart_output.clone());
        chart
            .write_html(&output)
            .with_context(|| format!("Failed to write chart to {}", output.display()))?;
        tracing::info!(traces = chart.traces().len(), path = %output.display(), "Chart written");
        println!("{}", output.display());
        Ok(())
    }
}

fn last_day(dataset: &Dataset) -> Result<NaiveDate> {
    let span = analysis::calculate_time_span(dataset)
        .with_context(|| format!("Cannot anchor a trailing range without a {} column", DATE))?;
    Ok(span.end)
}

/// Series label of a file: its name without the extension
fn series_name(file: &str) -> String {
    Path::new(file)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string())
}
