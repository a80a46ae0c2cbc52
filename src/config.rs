use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use stock_toolkit::services::SessionConfig;
use stock_toolkit::utils::DEFAULT_LOG_FILTER;

// Application-wide settings, readable from YAML or the environment
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_folder: PathBuf,
    pub session: SessionConfig,
    pub log_filter: String,
    pub chart_output: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_folder: PathBuf::from("data"),
            session: SessionConfig::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            chart_output: PathBuf::from("chart.html"),
        }
    }
}

impl AppConfig {
    // An explicit config file wins, then CONFIG_FILE, then plain environment variables
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let config_file = config_file
            .map(Path::to_path_buf)
            .or_else(|| env::var_os("CONFIG_FILE").map(PathBuf::from));

        match config_file {
            Some(path) => Self::from_yaml(&path),
            None => Self::from_env(),
        }
    }

    pub fn from_yaml(file_path: &Path) -> Result<Self> {
        let yaml_content = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read config file {}", file_path.display()))?;
        Self::from_yaml_str(&yaml_content)
            .with_context(|| format!("Failed to parse YAML config {}", file_path.display()))
    }

    pub fn from_yaml_str(yaml_content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml_content)?)
    }

    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    // Missing variables keep their defaults
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(folder) = lookup("DATA_FOLDER") {
            config.data_folder = PathBuf::from(folder);
        }
        if let Some(app_name) = lookup("APP_NAME") {
            config.session.app_name = app_name;
        }
        if let Some(master) = lookup("MASTER") {
            config.session.master = master;
        }
        if let Some(date_format) = lookup("DATE_FORMAT") {
            config.session.date_format = date_format;
        }
        if let Some(delimiter) = lookup("CSV_DELIMITER") {
            config.session.delimiter = parse_delimiter(&delimiter)?;
        }
        if let Some(infer) = lookup("INFER_SCHEMA") {
            config.session.infer_schema = infer
                .parse()
                .with_context(|| format!("INFER_SCHEMA must be true or false, got {:?}", infer))?;
        }
        if let Some(filter) = lookup("LOG_FILTER") {
            config.log_filter = filter;
        }
        if let Some(output) = lookup("CHART_OUTPUT") {
            config.chart_output = PathBuf::from(output);
        }

        Ok(config)
    }
}

fn parse_delimiter(value: &str) -> Result<char> {
    if value == "\\t" || value.eq_ignore_ascii_case("tab") {
        return Ok('\t');
    }
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => bail!("CSV_DELIMITER must be a single character, got {:?}", value),
    }
}
