//! Grid loaders for exported sheets
//!
//! CSV exports have no header row worth trusting, so every record is read
//! as data. JSON grids are arrays of rows of `string | number | null`, the
//! shape sheet APIs return for a values range.

use crate::error::{Error, Result};
use crate::grid::{CellValue, Grid};
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

/// Supported sheet file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetFormat {
    Csv,
    Json,
}

impl SheetFormat {
    /// Format implied by a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(SheetFormat::Csv),
            "json" => Some(SheetFormat::Json),
            _ => None,
        }
    }
}

/// Load a sheet file, choosing the decoder from its extension
pub fn load_grid<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let path = path.as_ref();
    match SheetFormat::from_path(path) {
        Some(SheetFormat::Csv) => load_csv_grid(path),
        Some(SheetFormat::Json) => load_json_grid(path),
        None => Err(Error::UnsupportedFormat(path.display().to_string())),
    }
}

/// Load a CSV export into a Grid
pub fn load_csv_grid<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    read_csv_grid(BufReader::new(file), &sheet_name(path)).map_err(|e| match e {
        Error::Csv { source, .. } => Error::Csv {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Parse CSV from a string (useful for testing)
pub fn parse_csv_grid_str(content: &str, source_name: &str) -> Result<Grid> {
    read_csv_grid(content.as_bytes(), source_name)
}

fn read_csv_grid<R: Read>(reader: R, source_name: &str) -> Result<Grid> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // Rows vary in width
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(|e| Error::Csv {
            path: source_name.into(),
            source: e,
        })?;
        rows.push(record.iter().map(CellValue::parse).collect());
    }

    Ok(Grid::new(source_name, rows))
}

/// Load a JSON values array into a Grid
pub fn load_json_grid<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_json_grid_str(&content, &sheet_name(path))
}

/// Parse a JSON values array from a string
pub fn parse_json_grid_str(content: &str, source_name: &str) -> Result<Grid> {
    let rows: Vec<Vec<CellValue>> =
        serde_json::from_str(content).map_err(|e| Error::GridParse {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;
    Ok(Grid::new(source_name, rows))
}

fn sheet_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}
