//! Structure detection: which axis of the sheet carries the teams

use crate::config::ParseConfig;
use crate::grid::{CellValue, Grid};
use crate::patterns;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Which way the board is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    /// Teams across a header row, entries running down the rows
    RowsAreEntriesColsAreTeams,
    /// Teams down a header column, entries running across the columns
    ColsAreEntriesRowsAreTeams,
    /// Nothing to work with
    Undetected,
}

/// How much the detector trusts its decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    None,
    Low,
    Medium,
    High,
}

/// Outcome of structure detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    pub orientation: Orientation,
    pub confidence: Confidence,
    /// Row (or column, when transposed) holding team names
    pub team_row: usize,
    /// First row (or column) after the team row
    pub data_start: usize,
}

impl Detection {
    fn undetected() -> Self {
        Self {
            orientation: Orientation::Undetected,
            confidence: Confidence::None,
            team_row: 0,
            data_start: 0,
        }
    }

    fn found(orientation: Orientation, confidence: Confidence, team_row: usize) -> Self {
        Self {
            orientation,
            confidence,
            team_row,
            data_start: team_row + 1,
        }
    }

    /// True unless the board was left undetected
    pub fn is_valid(&self) -> bool {
        self.orientation != Orientation::Undetected
    }
}

/// Decide the board's orientation from a window at the top-left of the grid
///
/// Tries teams-across first, then the transpose, then a lenient fallback
/// that only needs some row past the first to hold more than one value.
/// The fallback is reported with `Confidence::Low`.
pub fn detect_structure(grid: &Grid, config: &ParseConfig) -> Detection {
    let window = grid.region(0..config.max_rows, 0..config.max_cols);

    let col_has_rounds = column_has_round_markers(&window, 0, config);
    let row_has_teams = row_has_team_names(&window, 0, config);

    if row_has_teams {
        let confidence = if col_has_rounds {
            Confidence::High
        } else {
            Confidence::Medium
        };
        debug!(
            "{}: team names across row 0 (round column: {})",
            grid.name, col_has_rounds
        );
        return Detection::found(Orientation::RowsAreEntriesColsAreTeams, confidence, 0);
    }

    let row_has_rounds = row_has_round_markers(&window, 0, config);
    let col_has_teams = column_has_team_names(&window, 0, config);

    if row_has_rounds && col_has_teams {
        debug!("{}: team names down column 0", grid.name);
        return Detection::found(Orientation::ColsAreEntriesRowsAreTeams, Confidence::High, 0);
    }

    warn!(
        "{}: could not detect grid structure (row 0 rounds={}, column 0 teams={}), trying lenient fallback",
        grid.name, row_has_rounds, col_has_teams
    );

    // Prefer a row near the top, but any row past the first will do
    let lenient_rows = window.row_count().min(config.lenient_scan_rows);
    let team_row = (1..lenient_rows)
        .chain(lenient_rows.max(1)..window.row_count())
        .find(|&r| window.populated_in_row(r) > 1);
    match team_row {
        Some(team_row) => {
            warn!(
                "{}: assuming teams across row {} (low confidence)",
                grid.name, team_row
            );
            Detection::found(Orientation::RowsAreEntriesColsAreTeams, Confidence::Low, team_row)
        }
        None => {
            warn!("{}: lenient detection failed, no data rows found", grid.name);
            Detection::undetected()
        }
    }
}

fn column_has_round_markers(grid: &Grid, col: usize, config: &ParseConfig) -> bool {
    let rows = grid.row_count().min(config.sample_window);
    let hits = (1..rows)
        .filter(|&r| patterns::is_round_marker(&grid.text(r, col)))
        .count();
    hits >= config.min_probe_hits
}

fn row_has_round_markers(grid: &Grid, row: usize, config: &ParseConfig) -> bool {
    let cols = grid.row_width(row).min(config.sample_window);
    let hits = (1..cols)
        .filter(|&c| patterns::is_round_marker(&grid.text(row, c)))
        .count();
    hits >= config.min_probe_hits
}

fn row_has_team_names(grid: &Grid, row: usize, config: &ParseConfig) -> bool {
    let cols = grid.row_width(row).min(config.sample_window);
    let hits = (1..cols)
        .filter(|&c| looks_like_team_name(grid.get(row, c)))
        .count();
    hits >= config.min_probe_hits
}

fn column_has_team_names(grid: &Grid, col: usize, config: &ParseConfig) -> bool {
    let rows = grid.row_count().min(config.sample_window);
    let hits = (1..rows)
        .filter(|&r| looks_like_team_name(grid.get(r, col)))
        .count();
    hits >= config.min_probe_hits
}

fn looks_like_team_name(cell: &CellValue) -> bool {
    if cell.is_numeric() {
        return false;
    }
    let text = cell.text();
    let len = text.chars().count();
    !text.is_empty() && !patterns::is_pure_integer(&text) && (2..50).contains(&len)
}
