//! The game state aggregator: folds classified events into a [`GameState`].
//!
//! Events must arrive in transcript order. Reconciliation is order
//! sensitive, so the aggregator is a plain single-owner fold with no
//! interior mutability. [`GameStateAggregator::finish`] consumes it, after
//! which the state can no longer change.
//!
//! Attribution rules per event kind:
//!
//! | Event | Resolution |
//! |-------|------------|
//! | Shuffle | exact name, else first free slot |
//! | Archon | positional (first free archon slot) |
//! | Forge, Check | exact name |
//! | Reap, Steal, Capture, Loss | name contained in the actor text |
//!
//! Anything that cannot be attributed becomes a [`Diagnostic`] and the
//! event is otherwise ignored.

use tracing::{debug, warn};

use forgelog_types::{
    Diagnostic, Event, EventKind, GameState, LineDiagnostic, LossAmount, PerSlot, Quantity, Slot,
};

use crate::classify::classify;
use crate::reconcile;

/// Default steal amount when the line does not state one.
pub const DEFAULT_STEAL: u32 = 1;

/// Default capture amount when the line does not state one.
pub const DEFAULT_CAPTURE: u32 = 0;

/// Substring marking a loss that applies to both players at once.
const BOTH_PLAYERS: &str = "players";

/// Knobs for a fold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoldOptions {
    /// Emit a `debug` record for every applied event.
    ///
    /// Observability only; totals are identical either way.
    pub trace: bool,
}

/// Streaming fold from transcript lines (or events) to a [`GameState`].
#[derive(Debug, Default)]
pub struct GameStateAggregator {
    state: GameState,
    options: FoldOptions,
}

impl GameStateAggregator {
    /// Create an aggregator over an empty game state.
    pub fn new(options: FoldOptions) -> Self {
        Self {
            state: GameState::new(),
            options,
        }
    }

    /// Read-only view of the state so far.
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Finish the fold and hand over the final state.
    pub fn finish(self) -> GameState {
        self.state
    }

    /// Count, classify and apply one transcript line.
    pub fn feed_line(&mut self, line: &str) {
        self.state.lines_read = self.state.lines_read.saturating_add(1);
        if let Some(event) = classify(line) {
            self.apply(&event);
        }
    }

    /// Apply one classified event.
    ///
    /// Diagnostics are tagged with the number of lines fed so far.
    pub fn apply(&mut self, event: &Event) {
        self.state.events_applied = self.state.events_applied.saturating_add(1);
        match event {
            Event::Shuffle { actor } => self.on_shuffle(actor),
            Event::ArchonSelected { archon, .. } => self.on_archon(archon),
            Event::KeyForged { actor, amount_paid } => self.on_forge(actor, amount_paid),
            Event::CheckDeclared { actor } => self.on_check(actor),
            Event::ReapDeclared { actor } => self.on_reap(actor),
            Event::StealDeclared { actor, amount } => self.on_steal(actor, amount),
            Event::CaptureDeclared { actor, amount } => self.on_capture(actor, amount),
            Event::FirstPlayerAnnounced { name } => self.on_first_player(name),
            Event::TurnAdvanced { turn } => self.on_turn(turn),
            Event::GameWon { winner } => self.on_winner(winner),
            Event::AemberSnapshot {
                first_total,
                second_total,
                ..
            } => self.on_snapshot(first_total, second_total),
            Event::LossDeclared { subject, amount } => self.on_loss(subject, amount),
        }
    }

    // -----------------------------------------------------------------------
    // Handlers
    // -----------------------------------------------------------------------

    fn on_shuffle(&mut self, actor: &str) {
        let Some(slot) = self
            .state
            .slot_named(actor)
            .or_else(|| self.claim_free_slot(actor))
        else {
            self.mismatch(EventKind::Shuffle, actor);
            return;
        };

        let stats = self.state.players.get_mut(slot);
        stats.shuffles = stats.shuffles.saturating_add(1);
        let shuffles = stats.shuffles;
        self.trace(|| debug!(%slot, shuffles, "shuffle recorded"));
    }

    /// Give `actor` the first unnamed slot, if any is left.
    fn claim_free_slot(&mut self, actor: &str) -> Option<Slot> {
        let free = Slot::BOTH
            .into_iter()
            .find(|slot| !self.state.player(*slot).is_assigned())?;
        actor.clone_into(&mut self.state.players.get_mut(free).name);
        self.trace(|| debug!(slot = %free, name = actor, "player created"));
        Some(free)
    }

    fn on_archon(&mut self, archon: &str) {
        let Some(slot) = Slot::BOTH
            .into_iter()
            .find(|slot| self.state.archons.get(*slot).is_none())
        else {
            self.record(Diagnostic::ArchonSlotsFull {
                archon: archon.to_owned(),
            });
            return;
        };
        *self.state.archons.get_mut(slot) = Some(archon.to_owned());
        self.trace(|| debug!(%slot, archon, "archon assigned"));
    }

    fn on_forge(&mut self, actor: &str, amount_paid: &Quantity) {
        let Some(paid) = self.amount(EventKind::KeyForged, amount_paid, 0) else {
            return;
        };
        let Some(slot) = self.state.slot_named(actor) else {
            self.mismatch(EventKind::KeyForged, actor);
            return;
        };

        let stats = self.state.players.get_mut(slot);
        stats.forges = stats.forges.saturating_add(1);
        stats.aember_paid = stats.aember_paid.saturating_add(paid);
        let forges = stats.forges;
        let pending = self.state.pending.get_mut(slot);
        pending.forge = pending.forge.saturating_add(paid);
        self.trace(|| debug!(%slot, paid, forges, "key forged"));
    }

    fn on_check(&mut self, actor: &str) {
        let Some(slot) = self.state.slot_named(actor) else {
            self.mismatch(EventKind::CheckDeclared, actor);
            return;
        };
        let stats = self.state.players.get_mut(slot);
        stats.checks = stats.checks.saturating_add(1);
        let checks = stats.checks;
        self.trace(|| debug!(%slot, checks, "check recorded"));
    }

    fn on_reap(&mut self, actor: &str) {
        let Some(slot) = self.state.slot_mentioned_in(actor) else {
            self.mismatch(EventKind::ReapDeclared, actor);
            return;
        };
        let stats = self.state.players.get_mut(slot);
        stats.reaps = stats.reaps.saturating_add(1);
        let reaps = stats.reaps;
        self.trace(|| debug!(%slot, reaps, "reap recorded"));
    }

    fn on_steal(&mut self, actor: &str, amount: &Quantity) {
        let Some(stated) = self.amount(EventKind::StealDeclared, amount, DEFAULT_STEAL) else {
            return;
        };
        let Some(slot) = self.state.slot_mentioned_in(actor) else {
            self.mismatch(EventKind::StealDeclared, actor);
            return;
        };

        let ceiling = reconcile::steal_ceiling(&self.state, slot);
        let stolen = stated.min(ceiling);

        let stats = self.state.players.get_mut(slot);
        if stolen != 0 {
            stats.steals = stats.steals.saturating_add(1);
        }
        stats.aember_stolen = stats.aember_stolen.saturating_add(stolen);
        let pending = self.state.pending.get_mut(slot);
        pending.steal = pending.steal.saturating_add(stolen);

        self.trace(|| {
            debug!(
                %slot,
                stated,
                stolen,
                pool_before = ceiling,
                pool_after = ceiling.saturating_sub(stolen),
                "steal recorded"
            );
        });
    }

    fn on_capture(&mut self, actor: &str, amount: &Quantity) {
        let Some(stated) = self.amount(EventKind::CaptureDeclared, amount, DEFAULT_CAPTURE) else {
            return;
        };
        let Some(slot) = self.state.slot_mentioned_in(actor) else {
            self.mismatch(EventKind::CaptureDeclared, actor);
            return;
        };

        let ceiling = reconcile::capture_ceiling(&self.state, slot);
        let captured = stated.min(ceiling);

        let stats = self.state.players.get_mut(slot);
        if captured != 0 {
            stats.captures = stats.captures.saturating_add(1);
        }
        stats.aember_captured = stats.aember_captured.saturating_add(captured);
        let pending = self.state.pending.get_mut(slot);
        pending.capture = pending.capture.saturating_add(captured);

        self.trace(|| {
            debug!(
                %slot,
                stated,
                captured,
                pool_before = ceiling,
                pool_after = ceiling.saturating_sub(captured),
                "capture recorded"
            );
        });
    }

    fn on_first_player(&mut self, name: &str) {
        if self.state.first_player.is_none() {
            self.state.first_player = Some(name.to_owned());
            self.trace(|| debug!(name, "first player identified"));
        }
    }

    fn on_turn(&mut self, turn: &Quantity) {
        match turn {
            Quantity::Stated(number) => {
                self.state.turn = *number;
                self.trace(|| debug!(turn = number, "turn identified"));
            }
            Quantity::Malformed(raw) => self.malformed(EventKind::TurnAdvanced, raw),
            Quantity::Unspecified => {}
        }
    }

    fn on_winner(&mut self, winner: &str) {
        if self.state.winner.is_none() {
            self.state.winner = Some(winner.to_owned());
            self.trace(|| debug!(winner, "winner identified"));
        }
    }

    fn on_snapshot(&mut self, first_total: &Quantity, second_total: &Quantity) {
        let (Some(one), Some(two)) = (
            self.amount(EventKind::AemberSnapshot, first_total, 0),
            self.amount(EventKind::AemberSnapshot, second_total, 0),
        ) else {
            return;
        };

        let new_totals = PerSlot { one, two };
        let before = PerSlot {
            one: self.state.players.one.aember_gained,
            two: self.state.players.two.aember_gained,
        };
        let previous = self.state.snapshot_totals;
        let gains = reconcile::apply_snapshot(&mut self.state, new_totals);

        self.trace(|| {
            for slot in Slot::BOTH {
                debug!(
                    %slot,
                    previous_total = previous.get(slot),
                    new_total = new_totals.get(slot),
                    gain = gains.get(slot),
                    aember_before = before.get(slot),
                    aember_after = self.state.player(slot).aember_gained,
                    "aember snapshot reconciled"
                );
            }
        });
    }

    fn on_loss(&mut self, subject: &str, amount: &LossAmount) {
        if subject.contains(BOTH_PLAYERS) {
            self.on_shared_loss();
            return;
        }

        let Some(slot) = self.state.slot_mentioned_in(subject) else {
            self.mismatch(EventKind::LossDeclared, subject);
            return;
        };
        let stated = match amount {
            LossAmount::Count(count) => *count,
            LossAmount::Half => reconcile::half_pool(&self.state, slot),
            LossAmount::Unparsed(raw) => {
                self.malformed(EventKind::LossDeclared, raw);
                return;
            }
        };

        let ceiling = reconcile::loss_ceiling(&self.state, slot);
        let available = ceiling.saturating_sub(self.state.pending.get(slot).loss);
        let lost = stated.min(available);

        let pending = self.state.pending.get_mut(slot);
        pending.loss = pending.loss.saturating_add(lost);
        let stats = self.state.players.get_mut(slot);
        stats.aember_lost = stats.aember_lost.saturating_add(lost);
        let total_lost = stats.aember_lost;

        self.trace(|| {
            debug!(
                %slot,
                stated,
                lost,
                total_lost,
                pool_before = available,
                pool_after = available.saturating_sub(lost),
                "loss recorded"
            );
        });
    }

    /// Both players lose half their pool at the same moment.
    fn on_shared_loss(&mut self) {
        let shares = PerSlot {
            one: reconcile::half_pool(&self.state, Slot::One),
            two: reconcile::half_pool(&self.state, Slot::Two),
        };
        for slot in Slot::BOTH {
            let share = *shares.get(slot);
            let pending = self.state.pending.get_mut(slot);
            pending.loss = pending.loss.saturating_add(share);
            let stats = self.state.players.get_mut(slot);
            stats.aember_lost = stats.aember_lost.saturating_add(share);
        }
        self.trace(|| debug!(one = shares.one, two = shares.two, "both players lose half"));
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Resolve a quantity, recording a diagnostic when it is malformed.
    fn amount(&mut self, kind: EventKind, quantity: &Quantity, default: u32) -> Option<u32> {
        match quantity.or_default(default) {
            Ok(value) => Some(value),
            Err(raw) => {
                self.malformed(kind, raw);
                None
            }
        }
    }

    fn mismatch(&mut self, kind: EventKind, name: &str) {
        self.record(Diagnostic::ClassificationMismatch {
            kind,
            name: name.to_owned(),
        });
    }

    fn malformed(&mut self, kind: EventKind, raw: &str) {
        self.record(Diagnostic::MalformedAmount {
            kind,
            raw: raw.to_owned(),
        });
    }

    fn record(&mut self, diagnostic: Diagnostic) {
        let entry = LineDiagnostic {
            line: self.state.lines_read,
            diagnostic,
        };
        warn!(line = entry.line, "{}", entry.diagnostic);
        self.state.diagnostics.push(entry);
    }

    fn trace(&self, emit: impl FnOnce()) {
        if self.options.trace {
            emit();
        }
    }
}
