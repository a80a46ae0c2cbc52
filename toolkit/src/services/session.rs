use crate::{
    api::SessionBuilder,
    error::{Result, ToolkitError},
    models::Dataset,
    services::csv_service::{read_csv, CsvOptions},
    utils::{Logger, DEFAULT_DATE_FORMAT},
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings of an [`AnalyticsSession`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub app_name: String,
    /// `local`, `local[N]` or `local[*]`
    pub master: String,
    pub delimiter: char,
    pub date_format: String,
    pub infer_schema: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            app_name: "StockAnalysis".to_string(),
            master: "local[*]".to_string(),
            delimiter: ',',
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            infer_schema: true,
        }
    }
}

/// Number of worker threads requested by a master string
pub fn parse_master(master: &str) -> Result<usize> {
    let invalid = || ToolkitError::InvalidMaster(master.to_string());
    let master = master.trim();

    if master == "local" {
        return Ok(1);
    }
    let inner = master
        .strip_prefix("local[")
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(invalid)?;

    match inner {
        "*" => Ok(num_cpus::get()),
        n => match n.parse::<usize>() {
            Ok(threads) if threads > 0 => Ok(threads),
            _ => Err(invalid()),
        },
    }
}

/// Execution context owned by the caller: ingestion settings plus the
/// thread pool that parallel work runs on
pub struct AnalyticsSession {
    config: SessionConfig,
    csv_options: CsvOptions,
    pool: rayon::ThreadPool,
    logger: Logger,
}

impl AnalyticsSession {
    pub fn new(config: SessionConfig) -> Result<Self> {
        let threads = parse_master(&config.master)?;
        let delimiter = u8::try_from(config.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or(ToolkitError::InvalidDelimiter(config.delimiter))?;

        let thread_prefix = config.app_name.clone();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(move |i| format!("{}-worker-{}", thread_prefix, i))
            .build()?;

        let logger = Logger::new("SESSION");
        logger.info(&format!(
            "Session {} started: master={}, threads={}",
            config.app_name, config.master, threads
        ));

        let csv_options = CsvOptions {
            delimiter,
            infer_schema: config.infer_schema,
            date_format: config.date_format.clone(),
        };

        Ok(Self {
            config,
            csv_options,
            pool,
            logger,
        })
    }

    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn date_format(&self) -> &str {
        &self.config.date_format
    }

    pub fn parallelism(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run `op` on the session's thread pool; rayon work inside it uses
    /// the session's threads
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }

    /// Load `folder/file` as a dataset with a header row and inferred types.
    /// The Date column is parsed with the session's `date_format`.
    pub fn read_file(&self, folder: impl AsRef<Path>, file: impl AsRef<Path>) -> Result<Dataset> {
        let path = folder.as_ref().join(file);
        self.logger.debug(&format!("Reading {}", path.display()));
        self.install(|| read_csv(&path, &self.csv_options))
    }

    /// Load several files of `folder` concurrently on the session's threads.
    /// Datasets come back in the order of `files`; the first failure wins.
    pub fn read_files<P>(&self, folder: impl AsRef<Path>, files: &[P]) -> Result<Vec<Dataset>>
    where
        P: AsRef<Path> + Sync,
    {
        let folder = folder.as_ref();
        self.logger.debug(&format!(
            "Reading {} files from {}",
            files.len(),
            folder.display()
        ));
        self.install(|| {
            files
                .par_iter()
                .map(|file| read_csv(&folder.join(file), &self.csv_options))
                .collect()
        })
    }
}

impl std::fmt::Debug for AnalyticsSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsSession")
            .field("config", &self.config)
            .field("threads", &self.parallelism())
            .finish()
    }
}

/// Load `folder/file` through `session`
pub fn read_file(
    session: &AnalyticsSession,
    folder: impl AsRef<Path>,
    file: impl AsRef<Path>,
) -> Result<Dataset> {
    session.read_file(folder, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DatasetExt;
    use polars::prelude::DataType;

    #[test]
    fn test_parse_master() {
        assert_eq!(parse_master("local").unwrap(), 1);
        assert_eq!(parse_master("local[3]").unwrap(), 3);
        assert_eq!(parse_master("local[*]").unwrap(), num_cpus::get());
        assert!(parse_master("local[0]").is_err());
        assert!(parse_master("yarn").is_err());
        assert!(parse_master("local[two]").is_err());
    }

    #[test]
    fn test_session_uses_configured_threads() {
        let session = AnalyticsSession::new(SessionConfig {
            master: "local[2]".to_string(),
            ..SessionConfig::default()
        })
        .unwrap();
        assert_eq!(session.parallelism(), 2);
        assert_eq!(session.install(rayon::current_num_threads), 2);
    }

    #[test]
    fn test_rejects_non_ascii_delimiter() {
        let result = AnalyticsSession::new(SessionConfig {
            delimiter: '§',
            ..SessionConfig::default()
        });
        assert!(matches!(result, Err(ToolkitError::InvalidDelimiter('§'))));
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: SessionConfig = serde_json::from_str(r#"{"master": "local[4]"}"#).unwrap();
        assert_eq!(config.master, "local[4]");
        assert_eq!(config.app_name, "StockAnalysis");
        assert_eq!(config.delimiter, ',');
    }

    #[test]
    fn test_read_file_joins_folder_and_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("prices.csv"), "Date,Close\n2024-01-02,1.0\n").unwrap();

        let session = AnalyticsSession::new(SessionConfig::default()).unwrap();
        let ds = read_file(&session, dir.path(), "prices.csv").unwrap();
        assert_eq!(ds.height(), 1);
        assert_eq!(ds.column("Date").unwrap().dtype(), &DataType::Date);
        assert!(matches!(
            session.read_file(dir.path(), "missing.csv"),
            Err(ToolkitError::Io { .. })
        ));
    }

    #[test]
    fn test_session_date_format_reaches_loaded_dates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("eu.csv"), "Date,Close\n31/01/2024,1\n").unwrap();

        let session = AnalyticsSession::new(SessionConfig {
            date_format: "%d/%m/%Y".to_string(),
            infer_schema: false,
            ..SessionConfig::default()
        })
        .unwrap();
        let ds = session.read_file(dir.path(), "eu.csv").unwrap();
        assert_eq!(
            ds.date_values("Date").unwrap(),
            vec![chrono::NaiveDate::from_ymd_opt(2024, 1, 31)]
        );
        assert_eq!(ds.column("Close").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_read_files_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        for (name, rows) in [("a.csv", 1), ("b.csv", 3), ("c.csv", 2)] {
            let mut content = String::from("Date,Close\n");
            for day in 1..=rows {
                content.push_str(&format!("2024-01-0{},{}\n", day, day));
            }
            std::fs::write(dir.path().join(name), content).unwrap();
        }

        let session = SessionBuilder::new().master("local[2]").build().unwrap();
        let heights: Vec<usize> = session
            .read_files(dir.path(), &["a.csv", "b.csv", "c.csv"])
            .unwrap()
            .iter()
            .map(|ds| ds.height())
            .collect();
        assert_eq!(heights, vec![1, 3, 2]);

        assert!(matches!(
            session.read_files(dir.path(), &["a.csv", "nope.csv"]),
            Err(ToolkitError::Io { .. })
        ));
    }
}
