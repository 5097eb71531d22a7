//! Core grid types for representing a raw draft board sheet

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A raw cell value as decoded from the sheet
///
/// Serializes untagged so a JSON grid is a plain array of arrays of
/// `string | number | null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Integer value
    Integer(i64),
    /// Floating-point value
    Float(f64),
    /// String value
    String(String),
    /// Empty/null cell
    Empty,
}

impl CellValue {
    /// Parse a string into a CellValue, detecting the type
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return CellValue::Empty;
        }

        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Integer(i);
        }

        // f64 also accepts "inf" and "NaN", which are text on a board
        if trimmed.bytes().any(|b| b.is_ascii_digit()) {
            if let Ok(f) = trimmed.parse::<f64>() {
                return CellValue::Float(f);
            }
        }

        CellValue::String(trimmed.to_string())
    }

    /// Check if the cell carries no data (null or whitespace-only text)
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Check if the cell is a number
    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Integer(_) | CellValue::Float(_))
    }

    /// Convert to a display string
    pub fn to_string_value(&self) -> String {
        match self {
            CellValue::Integer(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::String(s) => s.clone(),
            CellValue::Empty => String::new(),
        }
    }

    /// Display string with surrounding whitespace removed
    pub fn text(&self) -> String {
        match self {
            CellValue::String(s) => s.trim().to_string(),
            other => other.to_string_value(),
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Float(fl) => write!(f, "{}", fl),
            CellValue::String(s) => write!(f, "{}", s),
            CellValue::Empty => write!(f, ""),
        }
    }
}

static EMPTY: CellValue = CellValue::Empty;

/// An immutable snapshot of one sheet's cells, addressed by 0-based (row, column)
///
/// Rows are stored ragged with trailing empty cells dropped, the way sheet
/// APIs hand them back. Reads past the end of a row yield `CellValue::Empty`,
/// so the grid behaves as if it were rectangular.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// Sheet identifier (file name or sheet title)
    pub name: String,
    rows: Vec<Vec<CellValue>>,
    width: usize,
}

impl Grid {
    /// Build a grid from raw rows
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let rows: Vec<Vec<CellValue>> = rows
            .into_iter()
            .map(|mut row| {
                while row.last().is_some_and(CellValue::is_empty) {
                    row.pop();
                }
                row
            })
            .collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);

        Self {
            name: name.into(),
            rows,
            width,
        }
    }

    /// Build a grid from string cells, detecting numbers (handy for fixtures)
    pub fn from_text_rows<R, S>(name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|s| CellValue::parse(s.as_ref())).collect())
            .collect();
        Self::new(name, rows)
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (width of the widest row)
    pub fn column_count(&self) -> usize {
        self.width
    }

    /// True when no cell holds data
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|r| r.iter().all(CellValue::is_empty))
    }

    /// Get a cell, treating anything out of range as empty
    pub fn get(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    /// Trimmed text of a cell
    pub fn text(&self, row: usize, col: usize) -> String {
        self.get(row, col).text()
    }

    /// Populated width of a single row (last non-empty cell + 1)
    pub fn row_width(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    /// Raw cells of a row
    pub fn row(&self, row: usize) -> &[CellValue] {
        self.rows.get(row).map_or(&[], Vec::as_slice)
    }

    /// Number of non-empty cells in a row
    pub fn populated_in_row(&self, row: usize) -> usize {
        self.row(row).iter().filter(|c| !c.is_empty()).count()
    }

    /// Copy out a rectangular region, clipped to the populated part of the grid
    ///
    /// Row `i` of the result is row `rows.start + i` of this grid.
    pub fn region(&self, rows: Range<usize>, cols: Range<usize>) -> Grid {
        let rows = clamp(rows, self.rows.len());
        let cols = clamp(cols, self.width);
        let cells = rows
            .map(|r| cols.clone().map(|c| self.get(r, c).clone()).collect())
            .collect();
        Grid::new(self.name.clone(), cells)
    }

    /// Swap rows and columns
    pub fn transposed(&self) -> Grid {
        let cells = (0..self.width)
            .map(|c| (0..self.rows.len()).map(|r| self.get(r, c).clone()).collect())
            .collect();
        Grid::new(self.name.clone(), cells)
    }
}

fn clamp(range: Range<usize>, len: usize) -> Range<usize> {
    let end = range.end.min(len);
    range.start.min(end)..end
}
