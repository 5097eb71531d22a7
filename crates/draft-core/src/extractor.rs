//! Entry extraction from team columns
//!
//! One walker serves two readings of the board:
//! - [`ExtractMode::Picks`]: every valid name under a team column is a pick
//!   that team has made, in top-to-bottom order.
//! - [`ExtractMode::Pool`]: every valid name is a pool entry worth the
//!   column's value; struck-out names are kept but flagged unavailable.
//!
//! Blank cells are skipped in both modes. On a live board a blanked cell
//! means the entry was taken, so absence is expected and not an error.

use crate::config::ParseConfig;
use crate::grid::Grid;
use crate::mapper::TeamColumn;
use crate::patterns;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::ops::{Range, RangeInclusive};

/// Which reading of the board to extract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractMode {
    /// Names record picks already made
    Picks,
    /// Names record entries still in the pool
    Pool,
}

/// A validated name found under a team column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPick {
    pub team: TeamColumn,
    pub entry_name: String,
    pub row: usize,
    pub column: usize,
}

/// A draftable entry and its cost
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEntry {
    pub name: String,
    pub value: i64,
    pub row: usize,
    pub column: usize,
    /// False when the cell carries a strike-out marker
    pub available: bool,
}

/// Why a non-empty cell was not accepted as an entry name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    Length,
    Integer,
    PointsLabel,
    BanMarker,
    NotCapitalized,
}

/// Aggregate counters for one extraction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractStats {
    /// Non-empty cells inspected
    pub cells_scanned: usize,
    /// Blank cells skipped
    pub cells_blank: usize,
    /// Cells past the end of their row
    pub cells_out_of_bounds: usize,
    /// Cells that failed the validity predicate
    pub cells_rejected: usize,
    /// Entries emitted
    pub entries: usize,
}

/// Check a candidate entry name, returning why it was rejected
pub fn reject_reason(name: &str) -> Option<Rejection> {
    let len = name.chars().count();
    if !(3..=30).contains(&len) {
        return Some(Rejection::Length);
    }
    if patterns::is_pure_integer(name) {
        return Some(Rejection::Integer);
    }
    if patterns::is_points_label(name) {
        return Some(Rejection::PointsLabel);
    }
    if patterns::is_ban_marker(name) {
        return Some(Rejection::BanMarker);
    }
    // Caseless leads such as '(' or '*' pass; only a lowercase letter fails
    if name.chars().next().is_some_and(char::is_lowercase) {
        return Some(Rejection::NotCapitalized);
    }
    None
}

const STRIKE_MARKERS: &[&str] = &["~~", "--", "\u{2014}"];

/// Remove strike-out markers, reporting whether any were present
fn strip_strike_markers(text: &str) -> (String, bool) {
    let struck = STRIKE_MARKERS.iter().any(|m| text.contains(m));
    if !struck {
        return (text.to_string(), false);
    }
    let cleaned = STRIKE_MARKERS
        .iter()
        .fold(text.to_string(), |acc, m| acc.replace(m, ""));
    (cleaned.trim().to_string(), true)
}

/// Row range an extraction walks
pub fn data_rows(config: &ParseConfig) -> Range<usize> {
    config.data_start_row..config.data_end_row
}

/// Accepted cell handed from the walker to the mode-specific emitter
struct Accepted<'a> {
    team: &'a TeamColumn,
    name: String,
    row: usize,
    struck: bool,
}

/// Walk rows top to bottom and, within a row, teams in the given order
fn walk<'a, F>(
    grid: &Grid,
    teams: &'a [TeamColumn],
    rows: Range<usize>,
    mode: ExtractMode,
    mut emit: F,
) -> ExtractStats
where
    F: FnMut(Accepted<'a>),
{
    let mut stats = ExtractStats::default();
    let end = rows.end.min(grid.row_count());
    let start = rows.start;

    for row in start..end {
        for team in teams {
            if team.column_index >= grid.row_width(row) {
                stats.cells_out_of_bounds += 1;
                continue;
            }

            let text = grid.text(row, team.column_index);
            if text.is_empty() {
                stats.cells_blank += 1;
                continue;
            }
            stats.cells_scanned += 1;

            let (name, struck) = match mode {
                ExtractMode::Picks => (text, false),
                ExtractMode::Pool => strip_strike_markers(&text),
            };

            if let Some(reason) = reject_reason(&name) {
                stats.cells_rejected += 1;
                if row < start + 3 {
                    debug!(
                        "{}: rejected '{}' at row {} col {} ({:?})",
                        grid.name,
                        name,
                        row + 1,
                        team.column_index,
                        reason
                    );
                }
                continue;
            }

            stats.entries += 1;
            emit(Accepted {
                team,
                name,
                row,
                struck,
            });
        }
    }

    stats
}

/// Extract picks in row-major order
pub fn extract_picks(
    grid: &Grid,
    teams: &[TeamColumn],
    rows: Range<usize>,
) -> (Vec<RawPick>, ExtractStats) {
    let mut picks = Vec::new();
    let stats = walk(grid, teams, rows, ExtractMode::Picks, |cell| {
        debug!(
            "{}: pick '{}' -> {} at row {}",
            grid.name,
            cell.name,
            cell.team.label,
            cell.row + 1
        );
        picks.push(RawPick {
            team: cell.team.clone(),
            entry_name: cell.name,
            row: cell.row,
            column: cell.team.column_index,
        });
    });

    info!(
        "{}: extracted {} picks from {} team columns ({} cells rejected)",
        grid.name,
        picks.len(),
        teams.len(),
        stats.cells_rejected
    );
    (picks, stats)
}

/// Extract the draft pool, restricted to columns valued within `values`
pub fn extract_pool(
    grid: &Grid,
    teams: &[TeamColumn],
    rows: Range<usize>,
    values: RangeInclusive<i64>,
) -> (Vec<PoolEntry>, ExtractStats) {
    let columns: Vec<TeamColumn> = teams
        .iter()
        .filter(|t| values.contains(&t.value))
        .cloned()
        .collect();

    let mut pool = Vec::new();
    let stats = walk(grid, &columns, rows, ExtractMode::Pool, |cell| {
        pool.push(PoolEntry {
            name: cell.name,
            value: cell.team.value,
            row: cell.row,
            column: cell.team.column_index,
            available: !cell.struck,
        });
    });

    let available = pool.iter().filter(|e| e.available).count();
    info!(
        "{}: extracted {} pool entries ({} available)",
        grid.name,
        pool.len(),
        available
    );
    (pool, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: Vec<Vec<&str>>) -> Grid {
        Grid::from_text_rows("board", rows)
    }

    #[test]
    fn test_validity_predicate() {
        assert_eq!(None, reject_reason("Aerodactyl"));
        assert_eq!(None, reject_reason("Mr. Mime"));
        assert_eq!(reject_reason("Mu"), Some(Rejection::Length));
        assert_eq!(
            reject_reason("Abcdefghijklmnopqrstuvwxyzabcde"),
            Some(Rejection::Length)
        );
        assert_eq!(reject_reason("120"), Some(Rejection::Integer));
        assert_eq!(reject_reason("12 Points"), Some(Rejection::PointsLabel));
        assert_eq!(reject_reason("Banned Mon"), Some(Rejection::BanMarker));
        assert_eq!(reject_reason("Tera Banned"), Some(Rejection::BanMarker));
        assert_eq!(reject_reason("see notes"), Some(Rejection::NotCapitalized));
    }

    #[test]
    fn test_caseless_first_character_is_accepted() {
        assert_eq!(None, reject_reason("*Landorus"));
        assert_eq!(None, reject_reason("(Tera) Kingambit"));
        assert_eq!(None, reject_reason("~~Onix~~"));
        assert_eq!(reject_reason("landorus"), Some(Rejection::NotCapitalized));
    }

    #[test]
    fn test_predicate_excludes_regardless_of_context() {
        for noise in ["7", "2024", "5 points", "3 Point", "BANNED", "Unbanned Pick"] {
            assert!(reject_reason(noise).is_some(), "{noise} should be rejected");
        }
    }

    #[test]
    fn test_extract_picks_skips_blank_and_noise() {
        let g = grid(vec![
            vec!["", "Snorlax"],
            vec!["", "20"],
            vec!["", ""],
            vec!["", "Gengar"],
        ]);
        let team = TeamColumn::new(1, 18);
        let (picks, stats) = extract_picks(&g, &[team.clone()], 0..10);

        let names: Vec<&str> = picks.iter().map(|p| p.entry_name.as_str()).collect();
        assert_eq!(names, vec!["Snorlax", "Gengar"]);
        assert_eq!(picks[1].row, 3);
        assert_eq!(picks[1].column, team.column_index);
        assert_eq!(stats.cells_rejected, 1);
        assert_eq!(stats.cells_out_of_bounds, 1);
        assert_eq!(stats.entries, 2);
    }

    #[test]
    fn test_extract_is_row_major_in_team_order() {
        let g = grid(vec![vec!["", "Abra", "Onix"], vec!["", "Eevee", "Mew"]]);
        let teams = vec![TeamColumn::new(2, 20), TeamColumn::new(1, 19)];
        let (picks, _) = extract_picks(&g, &teams, 0..2);

        let names: Vec<&str> = picks.iter().map(|p| p.entry_name.as_str()).collect();
        assert_eq!(names, vec!["Onix", "Abra", "Mew", "Eevee"]);
    }

    #[test]
    fn test_rows_outside_range_ignored() {
        let g = grid(vec![vec!["", "Abra"], vec!["", "Onix"], vec!["", "Mew"]]);
        let (picks, _) = extract_picks(&g, &[TeamColumn::new(1, 5)], 1..2);
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].entry_name, "Onix");
    }

    #[test]
    fn test_pool_flags_struck_entries() {
        let g = grid(vec![
            vec!["", "Abra", "", "Zapdos"],
            vec!["", "~~Onix~~", "", "Moltres"],
        ]);
        let teams = vec![TeamColumn::new(1, 5), TeamColumn::new(3, 25)];
        let (pool, stats) = extract_pool(&g, &teams, 0..2, 2..=20);

        assert_eq!(pool.len(), 2);
        assert_eq!(pool[0].name, "Abra");
        assert!(pool[0].available);
        assert_eq!(pool[1].name, "Onix");
        assert!(!pool[1].available);
        assert_eq!(pool[1].value, 5);
        assert_eq!(stats.entries, 2);
    }
}
