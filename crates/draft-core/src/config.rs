//! Parse configuration
//!
//! Every bound the pipeline uses lives here. The defaults describe the
//! draft boards the league actually maintains; a JSON file can override any
//! subset of them.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunable bounds for one parse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Height of the window the structure detector looks at
    pub max_rows: usize,
    /// Width of the window the structure detector looks at
    pub max_cols: usize,
    /// Cells sampled per probe (index 0 is the label cell and is skipped)
    pub sample_window: usize,
    /// Matching cells a probe needs before it fires
    pub min_probe_hits: usize,
    /// Rows searched for a team row by the lenient fallback
    pub lenient_scan_rows: usize,

    /// Row holding the "N Points" value headers
    pub header_row: usize,
    /// Columns scanned in the header row
    pub header_scan_cols: usize,

    /// First row that can hold an entry
    pub data_start_row: usize,
    /// Exclusive upper row bound for entries
    pub data_end_row: usize,

    /// Whether to look for a results table with real team names
    pub resolve_team_names: bool,
    /// First row of the results region
    pub results_start_row: usize,
    /// Exclusive end row of the results region
    pub results_end_row: usize,
    /// Width of the results region
    pub results_scan_cols: usize,
    /// Rows of the results region searched for its header
    pub results_header_search_rows: usize,
    /// Value assigned to the first results-table team
    pub max_team_value: i64,

    /// Smallest header value accepted in pool mode
    pub pool_min_value: i64,
    /// Largest header value accepted in pool mode
    pub pool_max_value: i64,

    /// Starting budget for teams in the reference roster
    pub default_budget: i64,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_rows: 200,
            max_cols: 35,
            sample_window: 20,
            min_probe_hits: 3,
            lenient_scan_rows: 10,
            header_row: 2,
            header_scan_cols: 75,
            data_start_row: 4,
            data_end_row: 421,
            resolve_team_names: true,
            results_start_row: 84,
            results_end_row: 105,
            results_scan_cols: 26,
            results_header_search_rows: 20,
            max_team_value: 20,
            pool_min_value: 2,
            pool_max_value: 20,
            default_budget: 120,
        }
    }
}

impl ParseConfig {
    /// Load a config file from JSON; missing fields keep their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| Error::FileRead {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        let config: ParseConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the config to JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject bounds that cannot describe a board
    pub fn validate(&self) -> Result<()> {
        if self.data_start_row >= self.data_end_row {
            return Err(Error::InvalidConfig(format!(
                "data_start_row ({}) must be below data_end_row ({})",
                self.data_start_row, self.data_end_row
            )));
        }
        if self.header_row >= self.data_start_row {
            return Err(Error::InvalidConfig(format!(
                "header_row ({}) must come before data_start_row ({})",
                self.header_row, self.data_start_row
            )));
        }
        if self.results_start_row > self.results_end_row {
            return Err(Error::InvalidConfig(format!(
                "results_start_row ({}) is past results_end_row ({})",
                self.results_start_row, self.results_end_row
            )));
        }
        if self.pool_min_value > self.pool_max_value {
            return Err(Error::InvalidConfig(format!(
                "pool value range {}..={} is empty",
                self.pool_min_value, self.pool_max_value
            )));
        }
        if self.min_probe_hits == 0 {
            return Err(Error::InvalidConfig(
                "min_probe_hits must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
