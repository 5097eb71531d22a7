//! draft-core: reconstruct snake-draft history from free-form draft board sheets
//!
//! This library provides functionality to:
//! - Load a sheet export (CSV or JSON values array) into an immutable grid
//! - Detect whether teams run across columns or down rows
//! - Map "N Points" value headers to team columns
//! - Resolve anonymous team labels against a results table
//! - Extract picks (or the available pool) while filtering annotation noise
//! - Sequence picks with snake draft ordering
//! - Hand sequenced picks to a persistence adapter

pub mod board;
pub mod config;
pub mod detector;
pub mod error;
pub mod extractor;
pub mod grid;
pub mod loader;
pub mod mapper;
pub mod patterns;
pub mod resolver;
pub mod roster;
pub mod scanner;
pub mod sequencer;

pub use board::{parse_board, parse_pool, DraftRecord, ParseReport, PoolReport};
pub use config::ParseConfig;
pub use detector::{detect_structure, Confidence, Detection, Orientation};
pub use error::{Error, Result};
pub use extractor::{extract_picks, extract_pool, ExtractMode, ExtractStats, PoolEntry, RawPick};
pub use grid::{CellValue, Grid};
pub use loader::{load_grid, parse_csv_grid_str, parse_json_grid_str, SheetFormat};
pub use mapper::{map_team_columns, TeamColumn};
pub use resolver::{refine_mapping, resolve_team_names, TeamNameMapping};
pub use roster::{ingest, IngestStats, MemoryRoster, RosterSink, UpsertOutcome};
pub use scanner::{scan_directory, ScanResult, SheetFile};
pub use sequencer::{sequence, SequencedPick};
