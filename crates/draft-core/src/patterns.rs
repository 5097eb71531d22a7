//! Cell text patterns shared by the pipeline stages

use regex::Regex;

lazy_static::lazy_static! {
    static ref PURE_INTEGER: Regex = Regex::new(r"^\d+$").unwrap();
    // Unanchored: headers like "Tier 20 Points" still announce a value
    static ref POINTS: Regex = Regex::new(r"(?i)(\d+)\s*points?").unwrap();
    static ref ROUND_LABEL: Regex = Regex::new(r"(?i)^(round|r)\s*\d+$").unwrap();
    static ref BAN_MARKER: Regex = Regex::new(r"(?i)(tera\s*)?banned|restricted").unwrap();
    static ref TEAM_PLACEHOLDER: Regex = Regex::new(r"(?i)^team\s*\d+$").unwrap();
}

/// `^\d+$`
pub fn is_pure_integer(s: &str) -> bool {
    PURE_INTEGER.is_match(s)
}

/// Contains `<integer> point(s)` anywhere
pub fn is_points_label(s: &str) -> bool {
    POINTS.is_match(s)
}

/// Integer announced by a `<integer> point(s)` label
pub fn points_value(s: &str) -> Option<i64> {
    POINTS
        .captures(s)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// "Round 3", "R3", or a bare round number in 1..50
pub fn is_round_marker(s: &str) -> bool {
    if ROUND_LABEL.is_match(s) {
        return true;
    }
    is_pure_integer(s) && s.parse::<u32>().is_ok_and(|n| n > 0 && n < 50)
}

/// Banned / tera banned / restricted annotations
pub fn is_ban_marker(s: &str) -> bool {
    BAN_MARKER.is_match(s)
}

/// Generic "Team 4" placeholder headings
pub fn is_team_placeholder(s: &str) -> bool {
    TEAM_PLACEHOLDER.is_match(s)
}
