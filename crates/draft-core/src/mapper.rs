//! Team column mapping from "N Points" value headers

use crate::config::ParseConfig;
use crate::grid::Grid;
use crate::patterns;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// One drafting team, identified by the value header above its column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamColumn {
    /// Column holding this team's entries (one right of the header cell)
    pub column_index: usize,
    /// Points announced by the header
    pub value: i64,
    /// Provisional name derived from the value
    pub label: String,
}

impl TeamColumn {
    /// Create a team column with its value-derived label
    pub fn new(column_index: usize, value: i64) -> Self {
        Self {
            column_index,
            value,
            label: format!("Team {} Points", value),
        }
    }
}

/// Scan the header row for `N Points` cells and map each to a team column
///
/// Entries sit one column to the right of the header that announces them.
/// The result is sorted by value, highest first; equal values keep sheet
/// order. An empty result means no teams were identified.
pub fn map_team_columns(grid: &Grid, config: &ParseConfig) -> Vec<TeamColumn> {
    let row = config.header_row;
    let width = grid.row_width(row).min(config.header_scan_cols);

    if width == 0 {
        warn!("{}: header row {} is empty", grid.name, row + 1);
        return Vec::new();
    }

    let mut teams: Vec<TeamColumn> = (0..width)
        .filter_map(|col| {
            let text = grid.text(row, col);
            let value = patterns::points_value(&text)?;
            debug!(
                "{}: header '{}' at row {} col {}, entries in col {}",
                grid.name,
                text,
                row + 1,
                col,
                col + 1
            );
            Some(TeamColumn::new(col + 1, value))
        })
        .collect();

    teams.sort_by(|a, b| b.value.cmp(&a.value));

    info!("{}: mapped {} team columns", grid.name, teams.len());
    teams
}
