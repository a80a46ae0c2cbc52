pub mod commands;
pub mod config;

use crate::commands::{RangeArgs, Workspace};
use crate::config::AppConfig;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stock_toolkit::utils::{init_logger_with, DatePart};

#[derive(Parser)]
#[command(name = "stock-analytics")]
#[command(about = "Descriptive analysis of daily stock price CSV files")]
pub struct Cli {
    /// Folder holding the CSV files (overrides DATA_FOLDER)
    #[arg(short, long, global = true)]
    pub folder: Option<PathBuf>,

    /// YAML configuration file (overrides CONFIG_FILE)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print schema, sample rows, statistics, null counts and correlations
    Info {
        file: String,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the first date, last date and the days between them
    Span { file: String },
    /// Print the correlation matrix of the numeric columns
    Correlation { file: String },
    /// Average a column per year, month or ISO week
    Averages {
        file: String,
        /// year, month or week
        #[arg(short, long, default_value = "month")]
        period: DatePart,
        #[arg(long, default_value = "Close")]
        column: String,
    },
    /// Close-to-close difference between consecutive days or months
    Difference {
        file: String,
        /// Compare the first trading day of each month instead
        #[arg(long)]
        monthly: bool,
    },
    /// Add Daily_return = Close - Open
    DailyReturn { file: String },
    /// Days with the highest daily return
    HighestReturns {
        file: String,
        #[command(flatten)]
        range: RangeArgs,
        /// Rows to print
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Rate of return relative to a reference day
    Ror {
        file: String,
        /// Baseline day (YYYY-MM-DD)
        #[arg(long)]
        reference_date: NaiveDate,
        /// Days after the reference day to include
        #[arg(long)]
        period: i64,
    },
    /// Trailing moving average ordered by date
    MovingAverage {
        file: String,
        #[arg(long, default_value = "Close")]
        column: String,
        /// Rows in the window
        #[arg(short, long)]
        window: usize,
        /// Only print rows from this date on (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
    },
    /// Pearson correlation of two stocks' closing prices
    Correlate {
        first: String,
        second: String,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Add trading_value = Close * Volume
    TradingValue { file: String },
    /// Draw one line per file into an HTML chart
    Plot {
        #[arg(required = true)]
        files: Vec<String>,
        #[arg(long, default_value = "Close")]
        column: String,
        /// Output HTML file (overrides CHART_OUTPUT)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut app_config = AppConfig::load(cli.config.as_deref())?;
    if let Some(folder) = cli.folder {
        app_config.data_folder = folder;
    }

    init_logger_with(&app_config.log_filter)?;

    let _span = tracing::info_span!("app", name = %app_config.session.app_name).entered();
    tracing::info!(folder = %app_config.data_folder.display(), "Loaded configuration");

    let workspace = Workspace::new(&app_config)?;

    match cli.command {
        Commands::Info { file, json } => workspace.info(&file, json),
        Commands::Span { file } => workspace.span(&file),
        Commands::Correlation { file } => workspace.correlation(&file),
        Commands::Averages {
            file,
            period,
            column,
        } => workspace.averages(&file, period, &column),
        Commands::Difference { file, monthly } => workspace.difference(&file, monthly),
        Commands::DailyReturn { file } => workspace.daily_return(&file),
        Commands::HighestReturns { file, range, limit } => {
            workspace.highest_returns(&file, &range, limit)
        }
        Commands::Ror {
            file,
            reference_date,
            period,
        } => workspace.rate_of_return(&file, reference_date, period),
        Commands::MovingAverage {
            file,
            column,
            window,
            start,
        } => workspace.moving_average(&file, &column, window, start),
        Commands::Correlate {
            first,
            second,
            range,
        } => workspace.correlate(&first, &second, &range),
        Commands::TradingValue { file } => workspace.trading_value(&file),
        Commands::Plot {
            files,
            column,
            output,
        } => workspace.plot(&files, &column, output),
    }
}
