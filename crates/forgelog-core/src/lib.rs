//! Line classification and aember reconciliation for Forgelog.
//!
//! A Crucible game transcript is a narration with no schema. This crate
//! turns it into per-player statistics in two stages:
//!
//! ```text
//! lines --> classify --> Event --> GameStateAggregator (fold) --> GameState
//! ```
//!
//! - [`classify`] -- stateless recognizers, one [`Event`] per line at most.
//! - [`aggregate`] -- the ordered fold that attributes events to players.
//! - [`reconcile`] -- pool ceilings and snapshot reconciliation arithmetic.
//!
//! Attribution problems never abort a fold; they are recorded as
//! diagnostics on the resulting [`GameState`]. The only fatal condition is
//! failing to read the input.
//!
//! # Usage
//!
//! ```
//! use forgelog_core::{parse_lines, FoldOptions};
//!
//! let transcript = [
//!     "Alice is shuffling their deck",
//!     "Bob is shuffling their deck",
//!     "Turn 1",
//!     "Alice: 2  Bob: 0",
//! ];
//! let state = parse_lines(transcript, FoldOptions::default());
//! assert_eq!(state.players.one.name, "Alice");
//! assert_eq!(state.players.one.aember_gained, 2);
//! ```

pub mod aggregate;
pub mod classify;
pub mod reconcile;

use std::io::BufRead;

pub use aggregate::{FoldOptions, GameStateAggregator};
pub use classify::classify;
pub use forgelog_types::{Event, GameState};

/// Errors that abort a fold.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The transcript could not be read.
    #[error("failed to read transcript at line {line}: {source}")]
    Io {
        /// 1-based number of the line that failed.
        line: u64,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Fold an in-memory sequence of lines.
pub fn parse_lines<I, S>(lines: I, options: FoldOptions) -> GameState
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut aggregator = GameStateAggregator::new(options);
    for line in lines {
        aggregator.feed_line(line.as_ref());
    }
    aggregator.finish()
}

/// Fold a transcript from a buffered reader.
///
/// # Errors
///
/// Returns [`ParseError::Io`] if a line cannot be read (including invalid
/// UTF-8). Lines already folded are discarded with the partial state.
pub fn parse_reader<R: BufRead>(reader: R, options: FoldOptions) -> Result<GameState, ParseError> {
    let mut aggregator = GameStateAggregator::new(options);
    for line in reader.lines() {
        let line = line.map_err(|source| ParseError::Io {
            line: aggregator.state().lines_read.saturating_add(1),
            source,
        })?;
        aggregator.feed_line(&line);
    }
    Ok(aggregator.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_and_lines_agree() {
        let text = "Alice is shuffling their deck\nBob is shuffling their deck\nTurn 2\n";
        let from_reader = parse_reader(text.as_bytes(), FoldOptions::default());
        let from_lines = parse_lines(text.lines(), FoldOptions::default());
        assert!(matches!(from_reader, Ok(ref state) if *state == from_lines));
        assert_eq!(from_lines.lines_read, 3);
        assert_eq!(from_lines.events_applied, 3);
    }

    #[test]
    fn invalid_utf8_is_fatal_for_reader() {
        let bytes: &[u8] = b"Turn 1\n\xff\xfe broken\n";
        let result = parse_reader(bytes, FoldOptions::default());
        assert!(matches!(result, Err(ParseError::Io { line: 2, .. })));
    }
}
