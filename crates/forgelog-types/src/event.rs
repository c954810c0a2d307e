//! The typed event produced for a recognized transcript line.

use serde::{Deserialize, Serialize};

use crate::enums::{EventKind, LossAmount, Quantity};

/// A single classified transcript line.
///
/// Names are kept exactly as they appear in the text; resolving them to a
/// player slot is the aggregator's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// `<actor> is shuffling their deck`
    Shuffle {
        /// Name of the shuffling player.
        actor: String,
    },
    /// `<actor> is playing as the Archon: <archon>`
    ArchonSelected {
        /// Name text preceding the marker. Not used for attribution.
        actor: String,
        /// The archon's display name.
        archon: String,
    },
    /// `<actor> forges a key, paying <amount>`
    KeyForged {
        /// Name of the forging player.
        actor: String,
        /// Aember paid for the key.
        amount_paid: Quantity,
    },
    /// ` <actor> declares Check!`
    CheckDeclared {
        /// Name of the declaring player.
        actor: String,
    },
    /// `<actor> to reap with`
    ReapDeclared {
        /// Player name, possibly followed by descriptive text.
        actor: String,
    },
    /// `<actor> to steal <amount?>`
    StealDeclared {
        /// Text naming the stealing player.
        actor: String,
        /// Stated amount, if any.
        amount: Quantity,
    },
    /// `<actor> to capture <amount?>`
    CaptureDeclared {
        /// Text naming the capturing player.
        actor: String,
        /// Stated amount, if any.
        amount: Quantity,
    },
    /// `Key phase - <name>`
    FirstPlayerAnnounced {
        /// Text following the marker.
        name: String,
    },
    /// `Turn <n>`
    TurnAdvanced {
        /// The literal turn number.
        turn: Quantity,
    },
    /// ` <winner> has won the game`
    GameWon {
        /// The winner label as written.
        winner: String,
    },
    /// `<a>: <n>  <b>: <m>`
    ///
    /// Totals are positional: the first belongs to slot one, the second to
    /// slot two. The labels are informational.
    AemberSnapshot {
        /// Label preceding the first total.
        first_label: String,
        /// Slot one's authoritative total.
        first_total: Quantity,
        /// Label preceding the second total.
        second_label: String,
        /// Slot two's authoritative total.
        second_total: Quantity,
    },
    /// `<subject> lose <amount>`
    LossDeclared {
        /// Text naming who loses; contains "players" for a symmetric loss.
        subject: String,
        /// The amount text after the marker.
        amount: LossAmount,
    },
}

impl Event {
    /// The payload-free kind of this event.
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Shuffle { .. } => EventKind::Shuffle,
            Self::ArchonSelected { .. } => EventKind::ArchonSelected,
            Self::KeyForged { .. } => EventKind::KeyForged,
            Self::CheckDeclared { .. } => EventKind::CheckDeclared,
            Self::ReapDeclared { .. } => EventKind::ReapDeclared,
            Self::StealDeclared { .. } => EventKind::StealDeclared,
            Self::CaptureDeclared { .. } => EventKind::CaptureDeclared,
            Self::FirstPlayerAnnounced { .. } => EventKind::FirstPlayerAnnounced,
            Self::TurnAdvanced { .. } => EventKind::TurnAdvanced,
            Self::GameWon { .. } => EventKind::GameWon,
            Self::AemberSnapshot { .. } => EventKind::AemberSnapshot,
            Self::LossDeclared { .. } => EventKind::LossDeclared,
        }
    }
}
