//! Reference persistence adapter for sequenced picks
//!
//! The engine itself never stores anything. `RosterSink` is the seam an
//! embedding application implements; `MemoryRoster` is a file-backed
//! implementation used by the CLI's `ingest` command and by tests.

use crate::board::{DraftRecord, ParseReport};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// What an upsert did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// New (team, entry) pair; budget charged
    Inserted { over_budget: bool },
    /// Existing pair; draft position refreshed, budget untouched
    Updated,
}

/// Destination for sequenced picks, keyed by (team, entry)
pub trait RosterSink {
    /// Insert or refresh one pick
    fn upsert_pick(&mut self, record: &DraftRecord) -> Result<UpsertOutcome>;
}

/// Points a team may spend and has spent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub total: i64,
    pub spent: i64,
}

impl Budget {
    pub fn remaining(&self) -> i64 {
        self.total - self.spent
    }
}

/// Stored draft position of one entry on a team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub round: u32,
    pub pick_order: u32,
    pub overall_pick: u32,
    pub points: i64,
}

/// One team's roster and ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRoster {
    pub budget: Budget,
    /// Entries keyed by name
    pub entries: BTreeMap<String, RosterEntry>,
}

/// In-memory roster with JSON snapshots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRoster {
    /// Budget given to teams seen for the first time
    pub default_budget: i64,
    /// Rosters keyed by resolved team name
    pub teams: BTreeMap<String, TeamRoster>,
    /// Last time a pick was written
    pub updated_at: Option<DateTime<Utc>>,
}

impl MemoryRoster {
    /// Create an empty roster
    pub fn new(default_budget: i64) -> Self {
        Self {
            default_budget,
            teams: BTreeMap::new(),
            updated_at: None,
        }
    }

    /// Load a roster from a file, or create empty if not exists
    pub fn load<P: AsRef<Path>>(path: P, default_budget: i64) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new(default_budget));
        }

        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(Error::Json)
    }

    /// Save the roster to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Roster for a team
    pub fn team(&self, name: &str) -> Option<&TeamRoster> {
        self.teams.get(name)
    }

    /// Total number of stored entries
    pub fn total_entries(&self) -> usize {
        self.teams.values().map(|t| t.entries.len()).sum()
    }
}

impl RosterSink for MemoryRoster {
    fn upsert_pick(&mut self, record: &DraftRecord) -> Result<UpsertOutcome> {
        let default_budget = self.default_budget;
        let team = self
            .teams
            .entry(record.team_name.clone())
            .or_insert_with(|| TeamRoster {
                budget: Budget {
                    total: default_budget,
                    spent: 0,
                },
                entries: BTreeMap::new(),
            });

        let entry = RosterEntry {
            round: record.round,
            pick_order: record.pick_order,
            overall_pick: record.overall_pick,
            points: record.team_value,
        };

        let outcome = match team.entries.insert(record.entry_name.clone(), entry) {
            Some(_) => UpsertOutcome::Updated,
            None => {
                let over_budget = record.team_value > team.budget.remaining();
                if over_budget {
                    warn!(
                        "pick '{}' ({} pts) exceeds budget for {}: {} pts remaining",
                        record.entry_name,
                        record.team_value,
                        record.team_name,
                        team.budget.remaining()
                    );
                }
                team.budget.spent += record.team_value;
                UpsertOutcome::Inserted { over_budget }
            }
        };

        self.updated_at = Some(Utc::now());
        Ok(outcome)
    }
}

/// Counters from one ingest run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub inserted: usize,
    pub updated: usize,
    pub over_budget: usize,
}

/// Push every pick of a report into a sink
pub fn ingest<S: RosterSink>(report: &ParseReport, sink: &mut S) -> Result<IngestStats> {
    let mut stats = IngestStats::default();

    for record in report.records() {
        match sink.upsert_pick(&record)? {
            UpsertOutcome::Inserted { over_budget } => {
                stats.inserted += 1;
                if over_budget {
                    stats.over_budget += 1;
                }
            }
            UpsertOutcome::Updated => stats.updated += 1,
        }
    }

    info!(
        "{}: {} picks inserted, {} updated",
        report.sheet, stats.inserted, stats.updated
    );
    Ok(stats)
}
