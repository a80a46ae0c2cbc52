//! Builder pattern for configuring an analytics session

use crate::error::Result;
use crate::services::{AnalyticsSession, SessionConfig};

/// Fluent configuration of an [`AnalyticsSession`]
///
/// # Example
/// ```rust
/// use stock_toolkit::api::SessionBuilder;
///
/// let session = SessionBuilder::new()
///     .app_name("Backtest")
///     .master("local[2]")
///     .build()
///     .unwrap();
/// assert_eq!(session.parallelism(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    config: SessionConfig,
}

impl SessionBuilder {
    /// Create a builder with the default settings (`StockAnalysis`, `local[*]`)
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration, e.g. one loaded from a file
    pub fn from_config(config: SessionConfig) -> Self {
        Self { config }
    }

    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.config.app_name = name.into();
        self
    }

    /// Thread count as `local`, `local[N]` or `local[*]`
    pub fn master(mut self, master: impl Into<String>) -> Self {
        self.config.master = master.into();
        self
    }

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// strftime format of the Date column, applied when a file is loaded
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.config.date_format = format.into();
        self
    }

    pub fn infer_schema(mut self, infer: bool) -> Self {
        self.config.infer_schema = infer;
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn build(self) -> Result<AnalyticsSession> {
        AnalyticsSession::new(self.config)
    }
}
