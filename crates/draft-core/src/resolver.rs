//! Team name resolution from a "Draft Results" table
//!
//! The value headers only give anonymous "Team 20 Points" labels. Some
//! boards carry a results table further down listing the real team names
//! left to right. The resolver rank-matches those names against the team
//! values, highest value first. This is a best-effort guess: when it
//! misaligns, or finds nothing, picks keep their value-derived labels.

use crate::config::ParseConfig;
use crate::grid::Grid;
use crate::mapper::TeamColumn;
use crate::patterns;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Team names found in the results region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsTable {
    /// Row of the results header, in sheet coordinates
    pub header_row: usize,
    /// Team names in sheet order
    pub names: Vec<String>,
}

/// Lookup from team value to resolved team name, built fresh per parse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamNameMapping {
    names: BTreeMap<i64, String>,
}

impl TeamNameMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Zip names against a descending run of values starting at `max_value`
    pub fn provisional(names: &[String], max_value: i64) -> Self {
        let names = names
            .iter()
            .enumerate()
            .map(|(i, name)| (max_value - i as i64, name.clone()))
            .collect();
        Self { names }
    }

    /// Zip names against the actual team values, highest first
    pub fn ranked(names: &[String], teams: &[TeamColumn]) -> Self {
        let mut values: Vec<i64> = teams.iter().map(|t| t.value).collect();
        values.sort_by(|a, b| b.cmp(a));

        let names = values
            .into_iter()
            .zip(names.iter().cloned())
            .collect();
        Self { names }
    }

    /// Resolved name for a value, if any
    pub fn get(&self, value: i64) -> Option<&str> {
        self.names.get(&value).map(String::as_str)
    }

    /// Resolved name for a team, falling back to its label
    pub fn name_for<'a>(&'a self, team: &'a TeamColumn) -> &'a str {
        self.get(team.value).unwrap_or(&team.label)
    }

    /// Number of mapped values
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when nothing was resolved
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over `(value, name)` pairs, lowest value first
    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> {
        self.names.iter().map(|(v, n)| (*v, n.as_str()))
    }
}

/// Locate the results table and read its team names
pub fn find_results_table(grid: &Grid, config: &ParseConfig) -> Option<ResultsTable> {
    let region = grid.region(
        config.results_start_row..config.results_end_row,
        0..config.results_scan_cols,
    );
    if region.is_empty() {
        debug!("{}: no results region, keeping point-based names", grid.name);
        return None;
    }

    let search_rows = region.row_count().min(config.results_header_search_rows);
    let header = (0..search_rows).find(|&r| is_results_header(&region, r))?;

    // Names usually sit under the header, sometimes on it or one row lower
    let mut names: Vec<String> = Vec::new();
    for candidate in [header + 1, header, header + 2] {
        let found = team_names_in_row(&region, candidate);
        if found.len() > names.len() {
            names = found;
        }
    }

    if names.is_empty() {
        debug!("{}: results header found but no team names", grid.name);
        return None;
    }

    info!(
        "{}: found {} team names in results table",
        grid.name,
        names.len()
    );
    Some(ResultsTable {
        header_row: config.results_start_row + header,
        names,
    })
}

/// Build the provisional mapping from the configured maximum value
pub fn resolve_team_names(grid: &Grid, config: &ParseConfig) -> TeamNameMapping {
    match find_results_table(grid, config) {
        Some(table) => TeamNameMapping::provisional(&table.names, config.max_team_value),
        None => TeamNameMapping::new(),
    }
}

/// Re-key a provisional mapping against the mapped team values
///
/// Names are taken in their original sheet order, which is also descending
/// provisional value order.
pub fn refine_mapping(mapping: &TeamNameMapping, teams: &[TeamColumn]) -> TeamNameMapping {
    if mapping.is_empty() || teams.is_empty() {
        return mapping.clone();
    }

    let names: Vec<String> = mapping
        .names
        .values()
        .rev()
        .cloned()
        .collect();
    let refined = TeamNameMapping::ranked(&names, teams);
    info!("refined team name mapping: {} teams matched to values", refined.len());
    refined
}

fn is_results_header(region: &Grid, row: usize) -> bool {
    (0..3).any(|col| {
        let text = region.text(row, col).to_lowercase();
        text.contains("results") || (col == 0 && text == "round")
    })
}

fn team_names_in_row(region: &Grid, row: usize) -> Vec<String> {
    (1..region.row_width(row))
        .map(|col| region.text(row, col))
        .filter(|name| is_team_name(name))
        .collect()
}

fn is_team_name(name: &str) -> bool {
    let len = name.chars().count();
    len > 2
        && len < 50
        && !patterns::is_pure_integer(name)
        && !name.eq_ignore_ascii_case("round")
        && !patterns::is_team_placeholder(name)
        && !patterns::is_points_label(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ParseConfig {
        ParseConfig {
            results_start_row: 2,
            results_end_row: 8,
            ..ParseConfig::default()
        }
    }

    fn board_with_results(rows: Vec<Vec<&str>>) -> Grid {
        let mut all = vec![vec!["Draft Board"], vec![]];
        all.extend(rows);
        Grid::from_text_rows("board", all)
    }

    #[test]
    fn test_reads_names_under_results_header() {
        let grid = board_with_results(vec![
            vec!["Draft Results"],
            vec!["Round", "Sharks", "Jets", "Team 3", "Owls"],
            vec!["1", "Gengar", "", "Mew"],
        ]);
        let table = find_results_table(&grid, &config()).unwrap();
        assert_eq!(table.header_row, 2);
        assert_eq!(table.names, vec!["Sharks", "Jets", "Owls"]);
    }

    #[test]
    fn test_round_header_in_first_column() {
        let grid = board_with_results(vec![vec!["round", "Sharks", "Jets"], vec![]]);
        let table = find_results_table(&grid, &config()).unwrap();
        assert_eq!(table.names, vec!["Sharks", "Jets"]);
    }

    #[test]
    fn test_provisional_mapping_counts_down_from_max() {
        let names = vec!["Sharks".to_string(), "Jets".to_string()];
        let mapping = TeamNameMapping::provisional(&names, 20);
        assert_eq!(mapping.get(20), Some("Sharks"));
        assert_eq!(mapping.get(19), Some("Jets"));
        assert_eq!(mapping.get(18), None);
    }

    #[test]
    fn test_refine_rekeys_against_actual_values() {
        let names = vec!["Sharks".to_string(), "Jets".to_string(), "Owls".to_string()];
        let mapping = TeamNameMapping::provisional(&names, 20);
        let teams = vec![TeamColumn::new(9, 18), TeamColumn::new(12, 12)];

        let refined = refine_mapping(&mapping, &teams);
        assert_eq!(refined.len(), 2);
        assert_eq!(refined.get(18), Some("Sharks"));
        assert_eq!(refined.get(12), Some("Jets"));
    }

    #[test]
    fn test_missing_table_falls_back_to_labels() {
        let grid = board_with_results(vec![vec!["Standings"], vec!["A", "B"]]);
        let mapping = resolve_team_names(&grid, &config());
        assert!(mapping.is_empty());

        let team = TeamColumn::new(9, 20);
        assert_eq!(mapping.name_for(&team), "Team 20 Points");
    }
}
