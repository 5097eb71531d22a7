//! End-to-end parse of one draft board sheet
//!
//! Stages run strictly in order over one immutable grid:
//! detect -> resolve names -> map teams -> extract -> sequence -> refine names.
//! Every data problem short-circuits to an empty report rather than an error.

use crate::config::ParseConfig;
use crate::detector::{detect_structure, Confidence, Detection, Orientation};
use crate::error::Result;
use crate::extractor::{data_rows, extract_picks, extract_pool, ExtractStats, PoolEntry};
use crate::grid::Grid;
use crate::mapper::{map_team_columns, TeamColumn};
use crate::resolver::{refine_mapping, resolve_team_names, TeamNameMapping};
use crate::sequencer::{sequence, SequencedPick};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Full result of parsing a draft board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseReport {
    /// Sheet identifier
    pub sheet: String,
    /// Orientation decision and its confidence
    pub detection: Detection,
    /// Team columns, highest value first
    pub teams: Vec<TeamColumn>,
    /// Picks in overall order
    pub picks: Vec<SequencedPick>,
    /// Value -> resolved team name (may be empty)
    pub team_names: TeamNameMapping,
    /// Cell counters from extraction
    pub stats: ExtractStats,
}

/// One pick flattened for storage or export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRecord {
    pub overall_pick: u32,
    pub round: u32,
    pub pick_order: u32,
    pub team_name: String,
    pub team_label: String,
    pub team_value: i64,
    pub entry_name: String,
    pub row: usize,
    pub column: usize,
}

impl ParseReport {
    fn empty(sheet: &str, detection: Detection) -> Self {
        Self {
            sheet: sheet.to_string(),
            detection,
            teams: Vec::new(),
            picks: Vec::new(),
            team_names: TeamNameMapping::new(),
            stats: ExtractStats::default(),
        }
    }

    /// Count line for user-facing output
    pub fn summary(&self) -> String {
        let mut line = format!(
            "{}: matched {} teams, extracted {} picks ({} cells rejected)",
            self.sheet,
            self.teams.len(),
            self.picks.len(),
            self.stats.cells_rejected
        );
        if self.detection.confidence == Confidence::Low {
            line.push_str(" [low-confidence layout]");
        }
        line
    }

    /// True when the layout was guessed by the lenient fallback or not found
    pub fn is_low_confidence(&self) -> bool {
        self.detection.confidence <= Confidence::Low
    }

    /// Resolved team name for a pick
    pub fn team_name<'a>(&'a self, pick: &'a SequencedPick) -> &'a str {
        self.team_names.name_for(&pick.pick.team)
    }

    /// Number of rounds with at least one pick
    pub fn round_count(&self) -> u32 {
        self.picks.iter().map(|p| p.round).max().unwrap_or(0)
    }

    /// Flattened records in overall order
    pub fn records(&self) -> Vec<DraftRecord> {
        self.picks
            .iter()
            .map(|p| DraftRecord {
                overall_pick: p.overall_pick,
                round: p.round,
                pick_order: p.pick_order_in_round,
                team_name: self.team_name(p).to_string(),
                team_label: p.pick.team.label.clone(),
                team_value: p.pick.team.value,
                entry_name: p.pick.entry_name.clone(),
                row: p.pick.row,
                column: p.pick.column,
            })
            .collect()
    }

    /// Picks made by one team column, in round order
    pub fn picks_for(&self, column_index: usize) -> Vec<&SequencedPick> {
        let mut picks: Vec<&SequencedPick> = self
            .picks
            .iter()
            .filter(|p| p.pick.team.column_index == column_index)
            .collect();
        picks.sort_by_key(|p| p.round);
        picks
    }
}

/// Result of reading the available pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolReport {
    pub sheet: String,
    pub detection: Detection,
    pub entries: Vec<PoolEntry>,
    pub stats: ExtractStats,
}

impl PoolReport {
    /// Count line for user-facing output
    pub fn summary(&self) -> String {
        let available = self.entries.iter().filter(|e| e.available).count();
        format!(
            "{}: {} pool entries, {} available",
            self.sheet,
            self.entries.len(),
            available
        )
    }
}

/// Detect the layout and return a grid with teams running across columns
fn oriented<'a>(grid: &'a Grid, config: &ParseConfig) -> (Detection, Option<Cow<'a, Grid>>) {
    let detection = detect_structure(grid, config);
    let working = match detection.orientation {
        Orientation::Undetected => None,
        Orientation::RowsAreEntriesColsAreTeams => Some(Cow::Borrowed(grid)),
        Orientation::ColsAreEntriesRowsAreTeams => Some(Cow::Owned(grid.transposed())),
    };
    (detection, working)
}

/// Parse a draft board into sequenced picks
pub fn parse_board(grid: &Grid, config: &ParseConfig) -> Result<ParseReport> {
    info!("parsing draft board from sheet '{}'", grid.name);

    let (detection, working) = oriented(grid, config);
    let Some(working) = working else {
        warn!("{}: no draft board structure detected", grid.name);
        return Ok(ParseReport::empty(&grid.name, detection));
    };

    // The results table sits below the board as laid out in the sheet
    let provisional = if config.resolve_team_names {
        resolve_team_names(grid, config)
    } else {
        TeamNameMapping::new()
    };

    let teams = map_team_columns(&working, config);
    if teams.is_empty() {
        warn!("{}: could not identify team columns with point values", grid.name);
        let mut report = ParseReport::empty(&grid.name, detection);
        report.team_names = provisional;
        return Ok(report);
    }

    let (raw, stats) = extract_picks(&working, &teams, data_rows(config));
    if raw.is_empty() {
        warn!("{}: no draft picks found in grid", grid.name);
    }

    let picks = sequence(&raw, teams.len())?;
    let team_names = refine_mapping(&provisional, &teams);

    let report = ParseReport {
        sheet: grid.name.clone(),
        detection,
        teams,
        picks,
        team_names,
        stats,
    };
    info!("{}", report.summary());
    Ok(report)
}

/// Parse a draft board as an available pool
pub fn parse_pool(grid: &Grid, config: &ParseConfig) -> PoolReport {
    let (detection, working) = oriented(grid, config);
    let Some(working) = working else {
        warn!("{}: no draft board structure detected", grid.name);
        return PoolReport {
            sheet: grid.name.clone(),
            detection,
            entries: Vec::new(),
            stats: ExtractStats::default(),
        };
    };

    let teams = map_team_columns(&working, config);
    let (entries, stats) = extract_pool(
        &working,
        &teams,
        data_rows(config),
        config.pool_min_value..=config.pool_max_value,
    );

    let report = PoolReport {
        sheet: grid.name.clone(),
        detection,
        entries,
        stats,
    };
    info!("{}", report.summary());
    report
}
