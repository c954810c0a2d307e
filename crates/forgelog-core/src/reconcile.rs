//! Pool-availability ceilings and snapshot reconciliation.
//!
//! Between two aember snapshots the transcript names draining actions
//! (steals, captures, losses) whose effective amounts are often overstated.
//! An action can never take more than the target pool held at the last
//! snapshot, minus what other draining categories already took from it this
//! cycle.
//!
//! # Ceilings
//!
//! For an actor `S` and its opponent `O`:
//!
//! ```text
//! steal   by S: snapshot(O) - pending(S).capture - pending(O).loss
//! capture by S: snapshot(O) - pending(S).steal   - pending(O).loss
//! loss    of S: snapshot(O) - pending(S).capture - pending(S).steal
//! ```
//!
//! Each ceiling leaves out the actor's own category, so several drains of
//! the same category within one cycle are each checked against the same
//! ceiling. That is a known approximation.
//!
//! All subtraction saturates at zero.

use forgelog_types::{GameState, PerSlot, Slot};

/// Upper bound for a steal by `thief` this cycle.
pub const fn steal_ceiling(state: &GameState, thief: Slot) -> u32 {
    let victim = thief.opponent();
    state
        .snapshot_totals
        .get(victim)
        .saturating_sub(state.pending.get(thief).capture)
        .saturating_sub(state.pending.get(victim).loss)
}

/// Upper bound for a capture by `capturer` this cycle.
pub const fn capture_ceiling(state: &GameState, capturer: Slot) -> u32 {
    let victim = capturer.opponent();
    state
        .snapshot_totals
        .get(victim)
        .saturating_sub(state.pending.get(capturer).steal)
        .saturating_sub(state.pending.get(victim).loss)
}

/// Upper bound for the cumulative loss of `loser` this cycle.
pub const fn loss_ceiling(state: &GameState, loser: Slot) -> u32 {
    let pending = state.pending.get(loser);
    state
        .snapshot_totals
        .get(loser.opponent())
        .saturating_sub(pending.capture)
        .saturating_sub(pending.steal)
}

/// Half of `slot`'s last snapshot total net of aember already paid to forge
/// this cycle, rounded down.
pub const fn half_pool(state: &GameState, slot: Slot) -> u32 {
    state
        .snapshot_totals
        .get(slot)
        .saturating_sub(state.pending.get(slot).forge)
        / 2
}

/// The amount to add to `slot`'s running total when a snapshot reports
/// `new_total`.
///
/// The raw snapshot difference is net of everything that happened this
/// cycle. Adding back the slot's own forge payment and losses, and what the
/// opponent stole or captured from it, yields the aember the slot actually
/// gained. A negative result contributes nothing.
pub fn snapshot_gain(state: &GameState, slot: Slot, new_total: u32) -> i64 {
    let own = state.pending.get(slot);
    let opponent = state.pending.get(slot.opponent());
    i64::from(new_total)
        .saturating_sub(i64::from(*state.snapshot_totals.get(slot)))
        .saturating_add(i64::from(own.forge))
        .saturating_add(i64::from(opponent.steal))
        .saturating_add(i64::from(opponent.capture))
        .saturating_add(i64::from(own.loss))
}

/// Apply a snapshot: fold each slot's gain into its running total, adopt the
/// new totals as authoritative and clear every pending delta.
///
/// Returns the per-slot gain that was applied.
pub fn apply_snapshot(state: &mut GameState, new_totals: PerSlot<u32>) -> PerSlot<i64> {
    let gains = PerSlot {
        one: snapshot_gain(state, Slot::One, new_totals.one),
        two: snapshot_gain(state, Slot::Two, new_totals.two),
    };

    for slot in Slot::BOTH {
        let player = state.players.get_mut(slot);
        player.aember_gained = add_signed(player.aember_gained, *gains.get(slot));
    }

    state.snapshot_totals = new_totals;
    state.pending = PerSlot::default();
    gains
}

/// Add a signed delta to an unsigned total, clamping to the `u32` range.
fn add_signed(total: u32, delta: i64) -> u32 {
    let sum = i64::from(total).saturating_add(delta);
    u32::try_from(sum.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_totals(one: u32, two: u32) -> GameState {
        let mut state = GameState::new();
        state.snapshot_totals = PerSlot { one, two };
        state
    }

    #[test]
    fn steal_ceiling_is_opponent_pool() {
        let state = state_with_totals(2, 5);
        assert_eq!(steal_ceiling(&state, Slot::One), 5);
        assert_eq!(steal_ceiling(&state, Slot::Two), 2);
    }

    #[test]
    fn steal_ceiling_excludes_other_categories_only() {
        let mut state = state_with_totals(0, 6);
        state.pending.one.capture = 2;
        state.pending.two.loss = 1;
        state.pending.one.steal = 3;
        // Prior steals are not subtracted from the steal ceiling.
        assert_eq!(steal_ceiling(&state, Slot::One), 3);
        assert_eq!(capture_ceiling(&state, Slot::One), 2);
    }

    #[test]
    fn ceilings_saturate_at_zero() {
        let mut state = state_with_totals(0, 1);
        state.pending.one.capture = 4;
        assert_eq!(steal_ceiling(&state, Slot::One), 0);
        assert_eq!(loss_ceiling(&state, Slot::One), 0);
    }

    #[test]
    fn half_pool_rounds_down_after_forge() {
        let mut state = state_with_totals(7, 9);
        state.pending.two.forge = 6;
        assert_eq!(half_pool(&state, Slot::One), 3);
        assert_eq!(half_pool(&state, Slot::Two), 1);
    }

    #[test]
    fn plain_snapshot_gain_is_the_difference() {
        let mut state = state_with_totals(1, 2);
        let gains = apply_snapshot(&mut state, PerSlot { one: 4, two: 2 });
        assert_eq!(gains, PerSlot { one: 3, two: 0 });
        assert_eq!(state.players.one.aember_gained, 3);
        assert_eq!(state.snapshot_totals, PerSlot { one: 4, two: 2 });
    }

    #[test]
    fn snapshot_adds_back_forge_and_drains() {
        let mut state = state_with_totals(6, 3);
        state.pending.one.forge = 6;
        state.pending.two.steal = 1;
        state.pending.one.loss = 2;
        // Slot one: 0 - 6 + 6 + 1 + 0 + 2
        let gains = apply_snapshot(&mut state, PerSlot { one: 0, two: 4 });
        assert_eq!(gains.one, 3);
        assert_eq!(gains.two, 1);
        assert_eq!(state.pending, PerSlot::default());
    }

    #[test]
    fn negative_gain_never_drops_total_below_zero() {
        let mut state = state_with_totals(5, 0);
        let gains = apply_snapshot(&mut state, PerSlot { one: 0, two: 0 });
        assert_eq!(gains.one, -5);
        assert_eq!(state.players.one.aember_gained, 0);
    }
}
