use draft_core::{
    detect_structure, parse_board, parse_csv_grid_str, parse_pool, Confidence, Grid,
    Orientation, ParseConfig, SequencedPick,
};
use std::collections::{BTreeMap, BTreeSet};

/// Build one CSV line with `cells` placed at their column indexes
///
/// Lines are at least two fields wide; the csv reader skips truly blank lines.
fn csv_line(cells: &[(usize, &str)]) -> String {
    let width = cells.iter().map(|(c, _)| c + 1).max().unwrap_or(0).max(2);
    let mut row = vec![String::new(); width];
    for (col, text) in cells {
        row[*col] = text.to_string();
    }
    row.join(",")
}

fn csv(lines: &[Vec<(usize, &str)>]) -> String {
    lines
        .iter()
        .map(|cells| csv_line(cells))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The worked example: two teams, one banned marker, one stray number
fn example_board() -> Grid {
    let content = csv(&[
        vec![(0, "Season 4 Draft Board")],
        vec![],
        vec![(8, "20 Points"), (11, "18 Points")],
        vec![],
        vec![(9, "Aerodactyl"), (12, "Snorlax")],
        vec![(9, "Banned Mon"), (12, "20")],
        vec![(9, ""), (12, "Gengar")],
    ]);
    parse_csv_grid_str(&content, "example").unwrap()
}

/// Four teams with uneven pick counts
fn league_board() -> Grid {
    let names: [[&str; 4]; 5] = [
        ["Abra", "Onix", "Eevee", "Mew"],
        ["Zubat", "Ditto", "Pidgey", "Lapras"],
        ["Gengar", "", "Snorlax", "Tera Banned"],
        ["", "Jolteon", "", ""],
        ["Machop", "", "", ""],
    ];
    let headers = [(2, "20 Points"), (5, "19 Points"), (8, "18 Points"), (11, "17 Points")];

    let mut lines: Vec<Vec<(usize, &str)>> = vec![vec![(0, "Draft")], vec![], headers.to_vec(), vec![]];
    for row in names.iter() {
        let cells: Vec<(usize, &str)> = headers
            .iter()
            .zip(row.iter())
            .map(|((col, _), name)| (col + 1, *name))
            .collect();
        lines.push(cells);
    }
    parse_csv_grid_str(&csv(&lines), "league").unwrap()
}

#[test]
fn example_scenario_extracts_and_sequences() {
    let report = parse_board(&example_board(), &ParseConfig::default()).unwrap();

    assert_eq!(report.teams.len(), 2);
    assert_eq!(report.teams[0].column_index, 9);
    assert_eq!(report.teams[0].value, 20);
    assert_eq!(report.teams[1].column_index, 12);
    assert_eq!(report.teams[1].value, 18);

    let seq: Vec<(&str, i64, u32, u32, u32)> = report
        .picks
        .iter()
        .map(|p| {
            (
                p.pick.entry_name.as_str(),
                p.pick.team.value,
                p.round,
                p.pick_order_in_round,
                p.overall_pick,
            )
        })
        .collect();
    assert_eq!(
        seq,
        vec![
            ("Aerodactyl", 20, 1, 1, 1),
            ("Snorlax", 18, 1, 2, 2),
            ("Gengar", 18, 2, 1, 3),
        ]
    );
    assert_eq!(report.stats.cells_rejected, 2);
    assert_eq!(report.picks[0].pick.row, 4);
    assert!(report.team_names.is_empty());
    assert_eq!(report.records()[0].team_name, "Team 20 Points");
}

#[test]
fn example_board_is_flagged_low_confidence() {
    let report = parse_board(&example_board(), &ParseConfig::default()).unwrap();
    assert_eq!(report.detection.orientation, Orientation::RowsAreEntriesColsAreTeams);
    assert_eq!(report.detection.confidence, Confidence::Low);
    assert!(report.summary().contains("matched 2 teams, extracted 3 picks"));
}

fn rounds_by_team(picks: &[SequencedPick]) -> BTreeMap<usize, Vec<u32>> {
    let mut out: BTreeMap<usize, Vec<u32>> = BTreeMap::new();
    for p in picks {
        out.entry(p.pick.team.column_index).or_default().push(p.round);
    }
    out
}

#[test]
fn rounds_are_dense_per_team() {
    let report = parse_board(&league_board(), &ParseConfig::default()).unwrap();

    for (column, mut rounds) in rounds_by_team(&report.picks) {
        rounds.sort();
        let expected: Vec<u32> = (1..=rounds.len() as u32).collect();
        assert_eq!(rounds, expected, "column {column} has gaps");
    }
}

#[test]
fn snake_order_is_a_permutation_and_reverses_on_even_rounds() {
    let report = parse_board(&league_board(), &ParseConfig::default()).unwrap();

    let mut by_round: BTreeMap<u32, Vec<&SequencedPick>> = BTreeMap::new();
    for p in &report.picks {
        by_round.entry(p.round).or_default().push(p);
    }

    for (round, picks) in by_round {
        let orders: BTreeSet<u32> = picks.iter().map(|p| p.pick_order_in_round).collect();
        let expected: BTreeSet<u32> = (1..=picks.len() as u32).collect();
        assert_eq!(orders, expected, "round {round} is not a permutation");

        let leftmost = picks.iter().min_by_key(|p| p.pick.team.column_index).unwrap();
        if round % 2 == 0 {
            assert_eq!(leftmost.pick_order_in_round, picks.len() as u32);
        } else {
            assert_eq!(leftmost.pick_order_in_round, 1);
        }
    }
}

#[test]
fn overall_pick_increases_with_round_and_order() {
    let report = parse_board(&league_board(), &ParseConfig::default()).unwrap();

    let mut picks = report.picks.clone();
    picks.sort_by_key(|p| (p.round, p.pick_order_in_round));
    let overall: Vec<u32> = picks.iter().map(|p| p.overall_pick).collect();
    let expected: Vec<u32> = (1..=picks.len() as u32).collect();
    assert_eq!(overall, expected);
}

#[test]
fn league_board_counts() {
    let report = parse_board(&league_board(), &ParseConfig::default()).unwrap();

    // 4 + 4 + 2 + 1 + 1 valid names; "Tera Banned" is dropped
    assert_eq!(report.picks.len(), 12);
    assert_eq!(report.round_count(), 4);

    let round3: Vec<&str> = report
        .picks
        .iter()
        .filter(|p| p.round == 3)
        .map(|p| p.pick.entry_name.as_str())
        .collect();
    assert_eq!(round3, vec!["Gengar", "Jolteon", "Snorlax"]);

    let team20: Vec<&str> = report
        .picks_for(3)
        .iter()
        .map(|p| p.pick.entry_name.as_str())
        .collect();
    assert_eq!(team20, vec!["Abra", "Zubat", "Gengar", "Machop"]);
}

#[test]
fn detection_is_idempotent() {
    let grid = league_board();
    let config = ParseConfig::default();
    assert_eq!(detect_structure(&grid, &config), detect_structure(&grid, &config));
}

#[test]
fn sideways_board_is_transposed_before_mapping() {
    // Rounds run across row 0, teams down column 0; each team's value
    // header sits in column 2 and its picks follow on the next row
    let content = csv(&[
        vec![(1, "1"), (2, "2"), (3, "3"), (4, "4"), (5, "5")],
        vec![(0, "Sharks"), (2, "20 Points")],
        vec![(0, "Sharks roster"), (4, "Abra"), (5, "Zubat")],
        vec![(0, "Jets"), (2, "19 Points")],
        vec![(0, "Jets roster"), (4, "Onix")],
    ]);
    let grid = parse_csv_grid_str(&content, "sideways").unwrap();
    let report = parse_board(&grid, &ParseConfig::default()).unwrap();

    assert_eq!(report.detection.orientation, Orientation::ColsAreEntriesRowsAreTeams);
    assert_eq!(report.detection.confidence, Confidence::High);

    let seq: Vec<(&str, u32, u32, u32)> = report
        .picks
        .iter()
        .map(|p| (p.pick.entry_name.as_str(), p.round, p.pick_order_in_round, p.overall_pick))
        .collect();
    assert_eq!(
        seq,
        vec![("Abra", 1, 1, 1), ("Onix", 1, 2, 2), ("Zubat", 2, 1, 3)]
    );
}

#[test]
fn pool_mode_reads_every_valid_name() {
    let report = parse_pool(&league_board(), &ParseConfig::default());
    assert_eq!(report.entries.len(), 12);
    assert!(report.entries.iter().all(|e| e.available));
    assert!(report.entries.iter().any(|e| e.name == "Lapras" && e.value == 17));
}

#[test]
fn results_table_names_replace_labels() {
    let mut content = csv(&[
        vec![(0, "Draft")],
        vec![],
        vec![(0, "20 Points"), (2, "19 Points")],
        vec![],
        vec![(1, "Abra"), (3, "Onix")],
        vec![(1, "Zubat"), (3, "Ditto")],
    ]);
    content.push('\n');
    content.push_str(&csv(&[
        vec![(0, "Draft Results")],
        vec![(0, "Round"), (1, "Sharks"), (2, "Jets")],
    ]));
    let grid = parse_csv_grid_str(&content, "named").unwrap();
    let config = ParseConfig {
        data_end_row: 6,
        results_start_row: 6,
        results_end_row: 10,
        ..ParseConfig::default()
    };

    let report = parse_board(&grid, &config).unwrap();
    let names: Vec<(String, String)> = report
        .records()
        .into_iter()
        .map(|r| (r.entry_name, r.team_name))
        .collect();
    assert_eq!(
        names,
        vec![
            ("Abra".to_string(), "Sharks".to_string()),
            ("Onix".to_string(), "Jets".to_string()),
            ("Ditto".to_string(), "Jets".to_string()),
            ("Zubat".to_string(), "Sharks".to_string()),
        ]
    );
}
