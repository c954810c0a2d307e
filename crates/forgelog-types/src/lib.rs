//! Shared type definitions for the Forgelog transcript parser.
//!
//! This crate is the single source of truth for the data that flows between
//! the line classifier, the game state aggregator and the report renderer.
//!
//! # Modules
//!
//! - [`enums`] -- Player slots, event kinds and the textual amount variants
//! - [`event`] -- The typed [`Event`] produced for every recognized line
//! - [`structs`] -- Per-player statistics, reconciliation deltas and [`GameState`]
//! - [`diagnostic`] -- Non-fatal problems recorded while folding a transcript

pub mod diagnostic;
pub mod enums;
pub mod event;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use diagnostic::{Diagnostic, LineDiagnostic};
pub use enums::{EventKind, LossAmount, Quantity, Slot};
pub use event::Event;
pub use structs::{GameState, PendingDeltas, PerSlot, PlayerStats};
