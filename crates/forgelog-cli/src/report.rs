//! Report rendering: box-drawn text tables or JSON.
//!
//! The text report prints a banner, a match table (one row per player, with
//! match-wide values on the Player 1 row) and a player statistics table.

use std::fmt::Write;

use forgelog_types::{GameState, PlayerStats, Slot};

use crate::config::OutputFormat;
use crate::error::CliError;

/// Title printed above the text report.
pub const TITLE: &str = "Keyforge Crucible Log Parser";

/// Shown in the Winner column when the transcript never names one.
pub const NO_WINNER: &str = "Not Listed";

const MATCH_HEADERS: [&str; 6] = [
    "Player #",
    "Userid",
    "Archon",
    "First Player",
    "Number of Turns",
    "Winner",
];

const PLAYER_HEADERS: [&str; 12] = [
    "Name",
    "Shuffles",
    "Forges",
    "Paid",
    "Checks",
    "Reaps",
    "Steals",
    "# Stolen",
    "Caps",
    "# Capd",
    "Aember Gained",
    "Lost",
];

/// Render `state` in the requested format. `source` names the transcript.
///
/// # Errors
///
/// Returns [`CliError::Serde`] if JSON serialization fails.
pub fn render(state: &GameState, source: &str, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => Ok(render_tables(state, source)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(state)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Render the banner and both text tables.
pub fn render_tables(state: &GameState, source: &str) -> String {
    let mut out = String::new();
    out.push_str(&boxed_title(TITLE));
    let _ = writeln!(out, "Parsing for {source}\n");
    out.push_str(&Table::new(&MATCH_HEADERS, match_rows(state)).render());
    out.push('\n');
    out.push_str(&Table::new(&PLAYER_HEADERS, player_rows(state)).render());

    let flagged = state.diagnostics.len();
    if flagged > 0 {
        let _ = writeln!(
            out,
            "\n{flagged} line(s) produced diagnostics; rerun with --debug for details"
        );
    }
    out
}

fn match_rows(state: &GameState) -> Vec<Vec<String>> {
    Slot::BOTH
        .iter()
        .map(|&slot| {
            let archon = state.archons.get(slot).clone().unwrap_or_default();
            let mut row = vec![slot.to_string(), state.player(slot).name.clone(), archon];
            if slot == Slot::One {
                row.push(state.first_player.clone().unwrap_or_default());
                row.push(state.turn.to_string());
                row.push(state.winner.clone().unwrap_or_else(|| NO_WINNER.to_owned()));
            } else {
                row.extend([String::new(), String::new(), String::new()]);
            }
            row
        })
        .collect()
}

fn player_rows(state: &GameState) -> Vec<Vec<String>> {
    state
        .players
        .iter()
        .map(|(_, player)| player_row(player))
        .collect()
}

fn player_row(stats: &PlayerStats) -> Vec<String> {
    let counts = [
        stats.shuffles,
        stats.forges,
        stats.aember_paid,
        stats.checks,
        stats.reaps,
        stats.steals,
        stats.aember_stolen,
        stats.captures,
        stats.aember_captured,
        stats.aember_gained,
        stats.aember_lost,
    ];
    core::iter::once(stats.name.clone())
        .chain(counts.iter().map(ToString::to_string))
        .collect()
}

fn boxed_title(title: &str) -> String {
    let width = title.chars().count().saturating_add(2);
    let border = format!("+{}+\n", "-".repeat(width));
    format!("{border}| {title} |\n{border}")
}

/// A simple text table with `+---+` borders.
struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(headers: &[&str], rows: Vec<Vec<String>>) -> Self {
        Self {
            headers: headers.iter().map(|h| (*h).to_owned()).collect(),
            rows,
        }
    }

    /// Column widths: the widest cell in each column, header included.
    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.chars().count())
                    .fold(header.chars().count(), usize::max)
            })
            .collect()
    }

    fn render(&self) -> String {
        let widths = self.widths();
        let border = border_line(&widths);
        let mut out = String::new();
        out.push_str(&border);
        out.push_str(&row_line(&self.headers, &widths));
        out.push_str(&border);
        for row in &self.rows {
            out.push_str(&row_line(row, &widths));
        }
        out.push_str(&border);
        out
    }
}

fn border_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width.saturating_add(2)));
        line.push('+');
    }
    line.push('\n');
    line
}

fn row_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (col, width) in widths.iter().enumerate() {
        let cell = cells.get(col).map_or("", String::as_str);
        let _ = write!(line, " {cell:<width$} |");
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use forgelog_core::{FoldOptions, parse_lines};

    use super::*;

    fn sample_state() -> GameState {
        parse_lines(
            [
                "Alice is shuffling their deck",
                "Bob is shuffling their deck",
                "Alice is playing as the Archon: Brother Tarl",
                "Bob forges a key, paying 6 Æmber",
                "Alice uses Dodger to steal 1 Æmber from Bob",
                "Turn 3 - Bob",
            ],
            FoldOptions::default(),
        )
    }

    #[test]
    fn table_report_has_banner_and_headers() {
        let report = render_tables(&sample_state(), "game.txt");
        assert!(report.contains(&format!("| {TITLE} |")));
        assert!(report.contains("Parsing for game.txt"));
        for header in MATCH_HEADERS.iter().chain(PLAYER_HEADERS.iter()) {
            assert!(report.contains(header), "missing header {header}");
        }
    }

    #[test]
    fn match_values_sit_on_player_one_row() {
        let report = render_tables(&sample_state(), "game.txt");
        let one = report.lines().find(|l| l.starts_with("| Player 1 "));
        let two = report.lines().find(|l| l.starts_with("| Player 2 "));
        assert!(one.is_some_and(|l| l.contains("Alice")
            && l.contains("Brother Tarl")
            && l.contains(" 3 ")
            && l.contains(NO_WINNER)));
        assert!(two.is_some_and(|l| l.contains("Bob") && !l.contains(NO_WINNER)));
    }

    #[test]
    fn player_rows_carry_counters() {
        let rows = player_rows(&sample_state());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.first().map(Vec::len), Some(PLAYER_HEADERS.len()));
        // Bob forged once, paying 6.
        assert_eq!(
            rows.get(1).map(|r| r.iter().take(4).cloned().collect::<Vec<_>>()),
            Some(vec!["Bob".to_owned(), "1".to_owned(), "1".to_owned(), "6".to_owned()])
        );
    }

    #[test]
    fn every_table_line_is_aligned() {
        let report = render_tables(&sample_state(), "game.txt");
        // Title box, then two tables: each table's lines share one width.
        let mut groups: Vec<Vec<usize>> = Vec::new();
        let mut current = Vec::new();
        for line in report.lines() {
            if line.starts_with('+') || line.starts_with('|') {
                current.push(line.chars().count());
            } else if !current.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            groups.push(current);
        }
        assert_eq!(groups.len(), 3);
        for group in &groups {
            assert!(group.windows(2).all(|w| w.first() == w.last()));
        }
    }

    #[test]
    fn winner_is_shown_when_known() {
        let mut state = sample_state();
        state.winner = Some("Bob".to_owned());
        let report = render_tables(&state, "game.txt");
        assert!(!report.contains(NO_WINNER));
    }

    #[test]
    fn diagnostics_add_a_footer() {
        let mut state = sample_state();
        assert!(!render_tables(&state, "g").contains("produced diagnostics"));

        let more = parse_lines(
            [
                "Alice is shuffling their deck",
                "Bob is shuffling their deck",
                " Mallory declares Check!",
            ],
            FoldOptions::default(),
        );
        state.diagnostics = more.diagnostics;
        assert!(render_tables(&state, "g").contains("1 line(s) produced diagnostics"));
    }

    #[test]
    fn json_report_round_trips_state() {
        let state = sample_state();
        let json = render(&state, "game.txt", OutputFormat::Json).unwrap_or_default();
        let back: Result<GameState, _> = serde_json::from_str(&json);
        assert!(matches!(back, Ok(ref s) if *s == state));
    }
}
