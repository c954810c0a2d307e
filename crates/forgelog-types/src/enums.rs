//! Enumeration types for the Forgelog data model.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Player slots
// ---------------------------------------------------------------------------

/// One of the two player identity slots of a match.
///
/// Slot one belongs to the first distinct name seen shuffling, slot two to
/// the second. There is never a third.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Slot {
    /// The first player to appear in the transcript.
    One,
    /// The second player to appear in the transcript.
    Two,
}

impl Slot {
    /// Both slots, in display order.
    pub const BOTH: [Self; 2] = [Self::One, Self::Two];

    /// The other player's slot.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// One-based player number used in reports.
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

impl core::fmt::Display for Slot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

// ---------------------------------------------------------------------------
// Event kinds
// ---------------------------------------------------------------------------

/// The kind of a recognized transcript line, without its payload.
///
/// Declared in canonical classifier order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A player shuffled their deck.
    Shuffle,
    /// A player announced their archon.
    ArchonSelected,
    /// A player forged a key.
    KeyForged,
    /// A player declared check.
    CheckDeclared,
    /// A creature reaped.
    ReapDeclared,
    /// A player stole aember.
    StealDeclared,
    /// A creature captured aember.
    CaptureDeclared,
    /// The first key phase named the starting player.
    FirstPlayerAnnounced,
    /// A new turn started.
    TurnAdvanced,
    /// A player won the match.
    GameWon,
    /// Both players' running aember totals were reported.
    AemberSnapshot,
    /// A player (or both) lost aember.
    LossDeclared,
}

impl EventKind {
    /// Short lowercase label used in logs and diagnostics.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Shuffle => "shuffle",
            Self::ArchonSelected => "archon",
            Self::KeyForged => "forge",
            Self::CheckDeclared => "check",
            Self::ReapDeclared => "reap",
            Self::StealDeclared => "steal",
            Self::CaptureDeclared => "capture",
            Self::FirstPlayerAnnounced => "first player",
            Self::TurnAdvanced => "turn",
            Self::GameWon => "winner",
            Self::AemberSnapshot => "aember snapshot",
            Self::LossDeclared => "loss",
        }
    }
}

impl core::fmt::Display for EventKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Amounts
// ---------------------------------------------------------------------------

/// A numeric field captured from a transcript line.
///
/// "Not written" and "written but unreadable" are kept apart: the aggregator
/// applies a default to the former and reports the latter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantity {
    /// The line carried no digits for this field.
    Unspecified,
    /// The line stated this value.
    Stated(u32),
    /// The line carried digits that do not fit the counter type.
    Malformed(String),
}

impl Quantity {
    /// Interpret a run of ASCII digits. An empty run is [`Quantity::Unspecified`].
    pub fn from_digits(digits: &str) -> Self {
        if digits.is_empty() {
            return Self::Unspecified;
        }
        digits
            .parse::<u32>()
            .map_or_else(|_| Self::Malformed(digits.to_owned()), Self::Stated)
    }

    /// The stated value, or `default` when the field was absent.
    ///
    /// Returns the raw text as the error for a malformed field.
    pub fn or_default(&self, default: u32) -> Result<u32, &str> {
        match self {
            Self::Unspecified => Ok(default),
            Self::Stated(value) => Ok(*value),
            Self::Malformed(raw) => Err(raw),
        }
    }
}

/// The amount text following " lose " in a loss line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LossAmount {
    /// A leading count, e.g. "lose 2 aember".
    Count(u32),
    /// The half marker, e.g. "lose half their aember".
    Half,
    /// Anything else, kept verbatim.
    Unparsed(String),
}

impl LossAmount {
    /// Interpret the text after " lose ".
    pub fn parse(text: &str) -> Self {
        let digits_len = text.bytes().take_while(u8::is_ascii_digit).count();
        if digits_len > 0
            && let Some(Ok(count)) = text.get(..digits_len).map(str::parse::<u32>)
        {
            return Self::Count(count);
        }
        if text.trim_start().to_ascii_lowercase().starts_with("half") {
            return Self::Half;
        }
        Self::Unparsed(text.to_owned())
    }
}
