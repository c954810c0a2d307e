//! Per-player statistics, reconciliation deltas and the folded game state.

use serde::{Deserialize, Serialize};

use crate::diagnostic::LineDiagnostic;
use crate::enums::Slot;

// ---------------------------------------------------------------------------
// PerSlot
// ---------------------------------------------------------------------------

/// One value for each of the two player slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerSlot<T> {
    /// Slot one's value.
    pub one: T,
    /// Slot two's value.
    pub two: T,
}

impl<T> PerSlot<T> {
    /// Borrow the value for `slot`.
    pub const fn get(&self, slot: Slot) -> &T {
        match slot {
            Slot::One => &self.one,
            Slot::Two => &self.two,
        }
    }

    /// Mutably borrow the value for `slot`.
    pub const fn get_mut(&mut self, slot: Slot) -> &mut T {
        match slot {
            Slot::One => &mut self.one,
            Slot::Two => &mut self.two,
        }
    }

    /// Iterate `(slot, value)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &T)> {
        [(Slot::One, &self.one), (Slot::Two, &self.two)].into_iter()
    }
}

// ---------------------------------------------------------------------------
// PlayerStats
// ---------------------------------------------------------------------------

/// Lifetime counters for one player.
///
/// Every field is unsigned and only ever grows through saturating
/// arithmetic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// The player's name as it appeared when shuffling. Empty until seen.
    pub name: String,
    /// Deck shuffles.
    pub shuffles: u32,
    /// Keys forged.
    pub forges: u32,
    /// Aember paid across all forges. Reporting only.
    pub aember_paid: u32,
    /// Checks declared.
    pub checks: u32,
    /// Reaps.
    pub reaps: u32,
    /// Steals that moved at least one aember.
    pub steals: u32,
    /// Aember stolen from the opponent.
    pub aember_stolen: u32,
    /// Captures that moved at least one aember.
    pub captures: u32,
    /// Aember captured from the opponent.
    pub aember_captured: u32,
    /// Running total of aember gained, reconciled at each snapshot.
    pub aember_gained: u32,
    /// Aember lost.
    pub aember_lost: u32,
}

impl PlayerStats {
    /// Whether a player name has been assigned to this slot.
    pub const fn is_assigned(&self) -> bool {
        !self.name.is_empty()
    }
}

// ---------------------------------------------------------------------------
// PendingDeltas
// ---------------------------------------------------------------------------

/// Amounts attributed to a player since the last aember snapshot.
///
/// Reset to zero every time a snapshot is reconciled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDeltas {
    /// Aember paid to forge this cycle.
    pub forge: u32,
    /// Aember this player stole this cycle.
    pub steal: u32,
    /// Aember this player captured this cycle.
    pub capture: u32,
    /// Aember this player lost this cycle.
    pub loss: u32,
}

// ---------------------------------------------------------------------------
// GameState
// ---------------------------------------------------------------------------

/// Everything known about a match after folding its transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Per-player lifetime counters.
    pub players: PerSlot<PlayerStats>,
    /// Archon names, assigned positionally in order of appearance.
    pub archons: PerSlot<Option<String>>,
    /// The first player named by a key phase line.
    pub first_player: Option<String>,
    /// The last turn number reported.
    pub turn: u32,
    /// The winner label, if the match reported one.
    pub winner: Option<String>,
    /// Totals from the most recent aember snapshot.
    pub snapshot_totals: PerSlot<u32>,
    /// Deltas accumulated since the most recent snapshot.
    pub pending: PerSlot<PendingDeltas>,
    /// Transcript lines read.
    pub lines_read: u64,
    /// Lines that classified into an event.
    pub events_applied: u64,
    /// Non-fatal problems, in transcript order.
    pub diagnostics: Vec<LineDiagnostic>,
}

impl GameState {
    /// Create an empty state: no players, turn 0, no winner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow a player's counters.
    pub const fn player(&self, slot: Slot) -> &PlayerStats {
        self.players.get(slot)
    }

    /// The slot whose assigned name equals `name` exactly.
    pub fn slot_named(&self, name: &str) -> Option<Slot> {
        self.players
            .iter()
            .find(|(_, stats)| stats.is_assigned() && stats.name == name)
            .map(|(slot, _)| slot)
    }

    /// The first slot (in slot order) whose assigned name occurs in `text`.
    pub fn slot_mentioned_in(&self, text: &str) -> Option<Slot> {
        self.players
            .iter()
            .find(|(_, stats)| stats.is_assigned() && text.contains(stats.name.as_str()))
            .map(|(slot, _)| slot)
    }
}
