//! Snake draft sequencing
//!
//! A team's n-th pick (top to bottom in its column) belongs to round n.
//! Within a round teams pick left to right in odd rounds and right to left
//! in even rounds. A round where only some teams have picked so far is
//! numbered over just those teams.

use crate::error::{Error, Result};
use crate::extractor::RawPick;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// A pick placed in the draft order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencedPick {
    #[serde(flatten)]
    pub pick: RawPick,
    pub round: u32,
    pub pick_order_in_round: u32,
    pub overall_pick: u32,
}

/// Assign round, in-round order and overall pick number to every pick
///
/// The only failure is a caller bug: `team_count` smaller than the number
/// of distinct team columns the picks reference. The output is sorted by
/// `overall_pick`.
pub fn sequence(raw_picks: &[RawPick], team_count: usize) -> Result<Vec<SequencedPick>> {
    let teams: HashSet<usize> = raw_picks.iter().map(|p| p.team.column_index).collect();
    if teams.len() > team_count {
        return Err(Error::InvalidTeamCount {
            team_count,
            teams: teams.len(),
        });
    }

    // Round = how many picks this team had made so far, plus one
    let mut made: HashMap<usize, u32> = HashMap::new();
    let mut rounds: BTreeMap<u32, Vec<&RawPick>> = BTreeMap::new();
    for pick in raw_picks {
        let count = made.entry(pick.team.column_index).or_insert(0);
        *count += 1;
        rounds.entry(*count).or_default().push(pick);
    }

    let mut sequenced = Vec::with_capacity(raw_picks.len());
    let mut overall = 0;

    for (round, mut picks) in rounds {
        picks.sort_by_key(|p| p.team.column_index);
        let count = picks.len() as u32;

        let mut ordered: Vec<(u32, &RawPick)> = picks
            .into_iter()
            .enumerate()
            .map(|(position, pick)| {
                let position = position as u32;
                let order = if round % 2 == 1 {
                    position + 1
                } else {
                    count - position
                };
                (order, pick)
            })
            .collect();
        ordered.sort_by_key(|(order, _)| *order);

        for (order, pick) in ordered {
            overall += 1;
            sequenced.push(SequencedPick {
                pick: pick.clone(),
                round,
                pick_order_in_round: order,
                overall_pick: overall,
            });
        }
    }

    Ok(sequenced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::TeamColumn;

    fn pick(column: usize, value: i64, name: &str, row: usize) -> RawPick {
        RawPick {
            team: TeamColumn::new(column, value),
            entry_name: name.to_string(),
            row,
            column,
        }
    }

    fn summary(picks: &[SequencedPick]) -> Vec<(&str, u32, u32, u32)> {
        picks
            .iter()
            .map(|p| {
                (
                    p.pick.entry_name.as_str(),
                    p.round,
                    p.pick_order_in_round,
                    p.overall_pick,
                )
            })
            .collect()
    }

    #[test]
    fn test_full_snake_three_teams() {
        let raw = vec![
            pick(1, 20, "A1", 4),
            pick(4, 19, "B1", 4),
            pick(7, 18, "C1", 4),
            pick(1, 20, "A2", 5),
            pick(4, 19, "B2", 5),
            pick(7, 18, "C2", 5),
        ];
        let seq = sequence(&raw, 3).unwrap();
        assert_eq!(
            summary(&seq),
            vec![
                ("A1", 1, 1, 1),
                ("B1", 1, 2, 2),
                ("C1", 1, 3, 3),
                ("C2", 2, 1, 4),
                ("B2", 2, 2, 5),
                ("A2", 2, 3, 6),
            ]
        );
    }

    #[test]
    fn test_short_round_numbered_over_present_teams() {
        let raw = vec![
            pick(9, 20, "Aerodactyl", 4),
            pick(12, 18, "Snorlax", 4),
            pick(12, 18, "Gengar", 6),
        ];
        let seq = sequence(&raw, 2).unwrap();
        assert_eq!(
            summary(&seq),
            vec![
                ("Aerodactyl", 1, 1, 1),
                ("Snorlax", 1, 2, 2),
                ("Gengar", 2, 1, 3),
            ]
        );
    }

    #[test]
    fn test_rounds_follow_encounter_order_not_rows() {
        // A team's second pick is round 2 even when rows are far apart
        let raw = vec![pick(1, 10, "First", 4), pick(1, 10, "Second", 90)];
        let seq = sequence(&raw, 1).unwrap();
        assert_eq!(seq[0].round, 1);
        assert_eq!(seq[1].round, 2);
        assert_eq!(seq[1].pick_order_in_round, 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(sequence(&[], 0).unwrap().is_empty());
    }

    #[test]
    fn test_team_count_too_small_is_contract_violation() {
        let raw = vec![pick(1, 20, "A1", 4), pick(4, 19, "B1", 4)];
        let err = sequence(&raw, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTeamCount {
                team_count: 1,
                teams: 2
            }
        ));
    }
}
