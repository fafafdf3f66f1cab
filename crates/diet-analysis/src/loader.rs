//! Dataset loading.
//!
//! Reads the comma-delimited recipe file into a [`DataFrame`], keeping the
//! header names and row order exactly as stored.

use crate::config::DEFAULT_INFER_SCHEMA_LENGTH;
use crate::error::{AnalysisError, Result, ResultExt};
use crate::types::MacroColumn;
use polars::io::mmap::MmapBytesReader;
use polars::prelude::*;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Upper bound on the bytes scanned for the header line.
const HEADER_SCAN_LIMIT: u64 = 64 * 1024;

/// Loads recipe tables from CSV.
#[derive(Debug, Clone, Copy)]
pub struct DatasetLoader {
    infer_schema_length: Option<usize>,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new(Some(DEFAULT_INFER_SCHEMA_LENGTH))
    }
}

impl DatasetLoader {
    /// Create a loader that infers column types from the first
    /// `infer_schema_length` rows (`None` scans everything).
    pub fn new(infer_schema_length: Option<usize>) -> Self {
        Self {
            infer_schema_length,
        }
    }

    /// Load the dataset at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::DatasetNotFound`] when the path is not a
    /// readable file, and a polars error when the content cannot be parsed.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<DataFrame> {
        let path = path.as_ref();
        info!("Loading dataset from: {}", path.display());

        if !path.is_file() {
            return Err(AnalysisError::DatasetNotFound(path.to_path_buf()));
        }
        let file =
            File::open(path).map_err(|_| AnalysisError::DatasetNotFound(path.to_path_buf()))?;

        self.read(file)
            .context(format!("Failed to parse dataset '{}'", path.display()))
    }

    /// Read a dataset from any in-memory or file-backed reader.
    ///
    /// Macronutrient columns are always read as Float64; the remaining
    /// columns are typed by inference. Text in a macro column that is not a
    /// number fails the read.
    pub fn read<R: MmapBytesReader>(&self, mut reader: R) -> Result<DataFrame> {
        let header = header_columns(&mut reader)?;
        let macro_schema = macro_schema(&header);

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(self.infer_schema_length)
            .with_schema_overwrite(macro_schema)
            .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
            .into_reader_with_file_handle(reader)
            .finish()?;

        debug!("Dataset loaded: {:?}", df.shape());
        Ok(df)
    }
}

/// Column names of the first line, with the reader rewound to the start.
fn header_columns<R: Read + Seek>(reader: &mut R) -> Result<Vec<String>> {
    let mut head = Vec::new();
    reader.by_ref().take(HEADER_SCAN_LIMIT).read_to_end(&mut head)?;
    reader.seek(SeekFrom::Start(0))?;

    let line_end = head.iter().position(|&b| b == b'\n').unwrap_or(head.len());
    let line = String::from_utf8_lossy(&head[..line_end]);
    let line = line.trim_start_matches('\u{feff}').trim_end_matches('\r');
    if line.is_empty() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => names.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    names.push(current);

    Ok(names)
}

/// Float64 overrides for the macro columns present in `header`.
///
/// Only present columns are listed: polars maps an override with as many
/// fields as the header by position.
fn macro_schema(header: &[String]) -> Option<SchemaRef> {
    let mut schema = Schema::with_capacity(MacroColumn::ALL.len());
    for column in MacroColumn::ALL {
        if header.iter().any(|name| name == column.column_name()) {
            schema.with_column(column.column_name().into(), DataType::Float64);
        }
    }
    (!schema.is_empty()).then(|| Arc::new(schema))
}

/// Load the dataset at `path` with default loader settings.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<DataFrame> {
    DatasetLoader::default().load(path)
}
