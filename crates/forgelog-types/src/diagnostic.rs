//! Non-fatal problems found while folding a transcript.
//!
//! None of these stop processing. They are logged as they happen and kept
//! on the final [`GameState`](crate::GameState) so callers can inspect them.

use serde::{Deserialize, Serialize};

use crate::enums::EventKind;

/// A recoverable problem with a single classified line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Diagnostic {
    /// The event's actor or subject matched neither player slot.
    #[error("{kind} did not match a known player: {name:?}")]
    ClassificationMismatch {
        /// The kind of event that could not be attributed.
        kind: EventKind,
        /// The unmatched name text.
        name: String,
    },

    /// An archon was announced after both archon slots were filled.
    #[error("both archon slots are taken, ignoring {archon:?}")]
    ArchonSlotsFull {
        /// The archon that had nowhere to go.
        archon: String,
    },

    /// A numeric field was present but could not be read as a count.
    #[error("{kind} carried an unreadable amount: {raw:?}")]
    MalformedAmount {
        /// The kind of event carrying the field.
        kind: EventKind,
        /// The raw field text.
        raw: String,
    },
}

/// A [`Diagnostic`] tagged with the 1-based transcript line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDiagnostic {
    /// 1-based line number in the transcript.
    pub line: u64,
    /// What went wrong.
    pub diagnostic: Diagnostic,
}

impl core::fmt::Display for LineDiagnostic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "line {}: {}", self.line, self.diagnostic)
    }
}
