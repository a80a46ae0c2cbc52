use crate::{
    analysis::DATE,
    error::{Result, ToolkitError},
    models::{Dataset, DatasetExt},
    utils::{Logger, Timer, DEFAULT_DATE_FORMAT},
};
use polars::io::mmap::MmapBytesReader;
use polars::prelude::*;
use std::{fs::File, io::Cursor, path::Path};

/// How delimited text is read into a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub infer_schema: bool,
    /// Applied to the Date column at load time, whether or not other
    /// column types are inferred
    pub date_format: String,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            infer_schema: true,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// Load a CSV file with a header row
pub fn read_csv(path: &Path, options: &CsvOptions) -> Result<Dataset> {
    let logger = Logger::new("CSV_SERVICE");
    let timer = Timer::start(&format!("read {}", path.display()));

    let file = File::open(path).map_err(|source| ToolkitError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = parse_csv_reader(file, options)?;

    logger.info(&format!(
        "Loaded {}: {} rows x {} columns",
        path.display(),
        dataset.height(),
        dataset.width()
    ));
    timer.log_elapsed("CSV_SERVICE");
    Ok(dataset)
}

/// Parse in-memory CSV content with a header row
pub fn parse_csv_content(content: &str, options: &CsvOptions) -> Result<Dataset> {
    parse_csv_reader(Cursor::new(content.to_owned()), options)
}

fn parse_csv_reader<R: MmapBytesReader>(reader: R, options: &CsvOptions) -> Result<Dataset> {
    // A schema length of 0 reads every column as text; None scans all rows
    let infer_schema_length = if options.infer_schema { None } else { Some(0) };

    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(infer_schema_length)
        .map_parse_options(|parse| {
            parse
                .with_separator(options.delimiter)
                .with_try_parse_dates(false)
        })
        .into_reader_with_file_handle(reader)
        .finish()?;

    match frame.resolve(DATE) {
        Ok(date) => frame.with_dates(&date, &options.date_format),
        Err(_) => Ok(frame),
    }
}
