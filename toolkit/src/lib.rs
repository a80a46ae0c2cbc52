//! # stock-toolkit - Stock price analysis helpers
//!
//! A small analytics library over daily stock price files, built on polars
//! data frames, featuring:
//! - CSV ingestion with column type inference
//! - Diagnostic reports (schema, statistics, null counts, correlation matrix)
//! - Period averages, sequential differences and return rates
//! - Cross-stock correlation and trailing moving averages
//! - Line charts rendered as Plotly JSON or HTML
//!
//! ## Quick Start
//!
//! ```no_run
//! use stock_toolkit::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let session = SessionBuilder::new().app_name("StockAnalysis").build()?;
//!     let aapl = read_file(&session, "data", "AAPL.csv")?;
//!
//!     let averages = get_average_month(&aapl, "Close")?;
//!     println!("{}", averages);
//!
//!     let mut chart = plot_stock();
//!     add_trace_plot(&aapl, "Close", &mut chart, "AAPL")?;
//!     chart.write_html("chart.html")?;
//!     Ok(())
//! }
//! ```

// Core modules
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

// Analysis functions over loaded datasets
pub mod analysis;

// Public API for easy library usage
pub mod api;

// Prelude for convenient imports
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use stock_toolkit::prelude::*;
    //! ```

    pub use crate::analysis::{
        add_trace_plot, calculate_corr, calculate_daily_return, calculate_moving_average,
        calculate_stock_correlation, calculate_time_span, daily_difference, get_average_month,
        get_average_week, get_average_year, get_highest_dr, get_info_df, get_ror_period,
        get_trading_value, monthly_difference, plot_stock,
    };
    pub use crate::api::SessionBuilder;
    pub use crate::error::{Result, ToolkitError};
    pub use crate::models::{
        Chart, CorrelationMatrix, Dataset, DatasetExt, DatasetReport, DateRange, TimeRange,
        TimeSpan, Value,
    };
    pub use crate::services::{read_file, AnalyticsSession, SessionConfig};
}

// Re-export some commonly used utilities
pub use error::{Result, ToolkitError};
pub use utils::{init_logger, Logger, Timer};
