//! Line classification: one transcript line in, at most one [`Event`] out.
//!
//! Each recognizer reproduces a leftmost search for a pattern of the shape
//! `<prefix> MARKER <suffix>`, where the prefix capture is greedy. A greedy
//! prefix means the *last* usable occurrence of the marker wins, so a name
//! containing marker-like text still captures as much as possible.
//!
//! Recognizers run in a fixed order and the first hit wins. Several markers
//! can appear inside other lines' free text, so the order is part of the
//! grammar.

use forgelog_types::{Event, EventKind, LossAmount, Quantity};

/// A recognizer for one line shape.
type Recognizer = fn(&str) -> Option<Event>;

/// All recognizers, in canonical match order.
pub const RECOGNIZERS: [(EventKind, Recognizer); 12] = [
    (EventKind::Shuffle, shuffle),
    (EventKind::ArchonSelected, archon_selected),
    (EventKind::KeyForged, key_forged),
    (EventKind::CheckDeclared, check_declared),
    (EventKind::ReapDeclared, reap_declared),
    (EventKind::StealDeclared, steal_declared),
    (EventKind::CaptureDeclared, capture_declared),
    (EventKind::FirstPlayerAnnounced, first_player_announced),
    (EventKind::TurnAdvanced, turn_advanced),
    (EventKind::GameWon, game_won),
    (EventKind::AemberSnapshot, aember_snapshot),
    (EventKind::LossDeclared, loss_declared),
];

const SHUFFLE: &str = " is shuffling their deck";
const ARCHON: &str = " is playing as the Archon: ";
const FORGE: &str = " forges a key, paying ";
const CHECK: &str = " declares Check!";
const REAP: &str = " to reap with";
const STEAL: &str = " to steal ";
const CAPTURE: &str = " to capture ";
const FIRST_PLAYER: &str = "Key phase - ";
const TURN: &str = "Turn ";
const WINNER: &str = " has won the game";
const SNAPSHOT_PAIR: &str = ": ";
const SNAPSHOT_GAP: &str = "  ";
const LOSS: &str = " lose ";

/// Classify a single transcript line.
///
/// Trailing line terminators are ignored. Returns `None` when no pattern
/// matches; such lines carry nothing the aggregator uses.
pub fn classify(line: &str) -> Option<Event> {
    let line = line.trim_end_matches(['\r', '\n']);
    RECOGNIZERS
        .iter()
        .find_map(|(_, recognize)| recognize(line))
}

// ---------------------------------------------------------------------------
// Recognizers
// ---------------------------------------------------------------------------

fn shuffle(line: &str) -> Option<Event> {
    let (actor, _) = split_last(line, SHUFFLE)?;
    Some(Event::Shuffle {
        actor: actor.to_owned(),
    })
}

fn archon_selected(line: &str) -> Option<Event> {
    let (actor, archon) = split_last(line, ARCHON)?;
    Some(Event::ArchonSelected {
        actor: actor.to_owned(),
        archon: archon.to_owned(),
    })
}

fn key_forged(line: &str) -> Option<Event> {
    let (actor, digits) = split_last_with_digits(line, FORGE)?;
    Some(Event::KeyForged {
        actor: actor.to_owned(),
        amount_paid: Quantity::from_digits(digits),
    })
}

fn check_declared(line: &str) -> Option<Event> {
    let actor = after_first_space_before_last(line, CHECK)?;
    Some(Event::CheckDeclared {
        actor: actor.to_owned(),
    })
}

fn reap_declared(line: &str) -> Option<Event> {
    let (actor, _) = split_last(line, REAP)?;
    Some(Event::ReapDeclared {
        actor: actor.to_owned(),
    })
}

fn steal_declared(line: &str) -> Option<Event> {
    let (actor, rest) = split_last(line, STEAL)?;
    Some(Event::StealDeclared {
        actor: actor.to_owned(),
        amount: Quantity::from_digits(leading_digits(rest)),
    })
}

fn capture_declared(line: &str) -> Option<Event> {
    let (actor, rest) = split_last(line, CAPTURE)?;
    Some(Event::CaptureDeclared {
        actor: actor.to_owned(),
        amount: Quantity::from_digits(leading_digits(rest)),
    })
}

fn first_player_announced(line: &str) -> Option<Event> {
    let (_, name) = line.split_once(FIRST_PLAYER)?;
    Some(Event::FirstPlayerAnnounced {
        name: name.to_owned(),
    })
}

fn turn_advanced(line: &str) -> Option<Event> {
    line.match_indices(TURN).find_map(|(pos, _)| {
        let digits = leading_digits(line.get(pos..)?.strip_prefix(TURN)?);
        (!digits.is_empty()).then(|| Event::TurnAdvanced {
            turn: Quantity::from_digits(digits),
        })
    })
}

fn game_won(line: &str) -> Option<Event> {
    let winner = after_first_space_before_last(line, WINNER)?;
    Some(Event::GameWon {
        winner: winner.to_owned(),
    })
}

/// `<a>: <digits>  <b>: <digits>`, greedy on both labels.
fn aember_snapshot(line: &str) -> Option<Event> {
    line.rmatch_indices(SNAPSHOT_PAIR).find_map(|(pos, _)| {
        let (first_label, tail) = line.split_at_checked(pos)?;
        let tail = tail.strip_prefix(SNAPSHOT_PAIR)?;
        let first_digits = leading_digits(tail);
        if first_digits.is_empty() {
            return None;
        }
        let rest = tail.get(first_digits.len()..)?.strip_prefix(SNAPSHOT_GAP)?;
        let (second_label, second_digits) = split_last_with_digits(rest, SNAPSHOT_PAIR)?;
        Some(Event::AemberSnapshot {
            first_label: first_label.to_owned(),
            first_total: Quantity::from_digits(first_digits),
            second_label: second_label.to_owned(),
            second_total: Quantity::from_digits(second_digits),
        })
    })
}

fn loss_declared(line: &str) -> Option<Event> {
    line.rmatch_indices(LOSS).find_map(|(pos, _)| {
        let (subject, tail) = line.split_at_checked(pos)?;
        let amount = tail.strip_prefix(LOSS)?;
        (!amount.is_empty()).then(|| Event::LossDeclared {
            subject: subject.to_owned(),
            amount: LossAmount::parse(amount),
        })
    })
}

// ---------------------------------------------------------------------------
// Scanning helpers
// ---------------------------------------------------------------------------

/// Split around the last occurrence of `marker`.
fn split_last<'a>(line: &'a str, marker: &str) -> Option<(&'a str, &'a str)> {
    let pos = line.rfind(marker)?;
    let (head, tail) = line.split_at_checked(pos)?;
    Some((head, tail.strip_prefix(marker)?))
}

/// Split around the last occurrence of `marker` that is followed by at
/// least one digit, returning the head and that digit run.
fn split_last_with_digits<'a>(line: &'a str, marker: &str) -> Option<(&'a str, &'a str)> {
    line.rmatch_indices(marker).find_map(|(pos, _)| {
        let (head, tail) = line.split_at_checked(pos)?;
        let digits = leading_digits(tail.strip_prefix(marker)?);
        (!digits.is_empty()).then_some((head, digits))
    })
}

/// Text between the first space of the line and the last `marker`.
///
/// `marker` starts with a space, so a match needs a space strictly before
/// the marker.
fn after_first_space_before_last<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let (_, after_space) = line.split_once(' ')?;
    let pos = after_space.rfind(marker)?;
    after_space.get(..pos)
}

/// The run of ASCII digits at the start of `text` (possibly empty).
fn leading_digits(text: &str) -> &str {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text.get(..end).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(line: &str) -> Option<EventKind> {
        classify(line).map(|event| event.kind())
    }

    #[test]
    fn shuffle_captures_actor() {
        assert_eq!(
            classify("Alice is shuffling their deck"),
            Some(Event::Shuffle {
                actor: "Alice".to_owned()
            })
        );
    }

    #[test]
    fn archon_captures_rest_of_line() {
        assert_eq!(
            classify("Bob is playing as the Archon: Brother Tarl, the Unsparing\r\n"),
            Some(Event::ArchonSelected {
                actor: "Bob".to_owned(),
                archon: "Brother Tarl, the Unsparing".to_owned(),
            })
        );
    }

    #[test]
    fn forge_requires_digits() {
        assert_eq!(
            classify("Alice forges a key, paying 6 aember"),
            Some(Event::KeyForged {
                actor: "Alice".to_owned(),
                amount_paid: Quantity::Stated(6),
            })
        );
        assert_eq!(kind_of("Alice forges a key, paying nothing"), None);
    }

    #[test]
    fn check_needs_leading_space() {
        assert_eq!(
            classify(" Bob declares Check!"),
            Some(Event::CheckDeclared {
                actor: "Bob".to_owned()
            })
        );
        assert_eq!(kind_of("Bob declares Check!"), None);
    }

    #[test]
    fn check_capture_starts_after_first_space() {
        assert_eq!(
            classify("12:01 Bob declares Check!"),
            Some(Event::CheckDeclared {
                actor: "Bob".to_owned()
            })
        );
    }

    #[test]
    fn reap_keeps_trailing_description() {
        assert_eq!(
            classify("Alice uses Dust Pixie to reap with Dust Pixie"),
            Some(Event::ReapDeclared {
                actor: "Alice uses Dust Pixie".to_owned()
            })
        );
    }

    #[test]
    fn steal_amount_may_be_absent() {
        assert_eq!(
            classify("Bob uses Urchin to steal 1 amber"),
            Some(Event::StealDeclared {
                actor: "Bob uses Urchin".to_owned(),
                amount: Quantity::Stated(1),
            })
        );
        assert_eq!(
            classify("Bob uses Ghostly Hand to steal an amber"),
            Some(Event::StealDeclared {
                actor: "Bob uses Ghostly Hand".to_owned(),
                amount: Quantity::Unspecified,
            })
        );
    }

    #[test]
    fn capture_amount_may_be_absent() {
        assert_eq!(
            classify("Alice uses Bad Penny to capture amber"),
            Some(Event::CaptureDeclared {
                actor: "Alice uses Bad Penny".to_owned(),
                amount: Quantity::Unspecified,
            })
        );
    }

    #[test]
    fn first_player_and_turn() {
        assert_eq!(
            classify("Key phase - Alice"),
            Some(Event::FirstPlayerAnnounced {
                name: "Alice".to_owned()
            })
        );
        assert_eq!(
            classify("Turn 12 - Bob"),
            Some(Event::TurnAdvanced {
                turn: Quantity::Stated(12)
            })
        );
        assert_eq!(kind_of("Turn over"), None);
    }

    #[test]
    fn winner_announcement() {
        assert_eq!(
            classify(" Alice has won the game"),
            Some(Event::GameWon {
                winner: "Alice".to_owned()
            })
        );
        assert_eq!(kind_of("Alice has won the game"), None);
    }

    #[test]
    fn snapshot_captures_both_totals() {
        assert_eq!(
            classify("Alice: 4  Bob: 11"),
            Some(Event::AemberSnapshot {
                first_label: "Alice".to_owned(),
                first_total: Quantity::Stated(4),
                second_label: "Bob".to_owned(),
                second_total: Quantity::Stated(11),
            })
        );
    }

    #[test]
    fn snapshot_needs_double_space() {
        assert_eq!(kind_of("Alice: 4 Bob: 11"), None);
    }

    #[test]
    fn loss_keeps_amount_text() {
        assert_eq!(
            classify("Both players lose half their amber"),
            Some(Event::LossDeclared {
                subject: "Both players".to_owned(),
                amount: LossAmount::Half,
            })
        );
        assert_eq!(
            classify("Bob uses Tocsin to make Alice lose 1 amber"),
            Some(Event::LossDeclared {
                subject: "Bob uses Tocsin to make Alice".to_owned(),
                amount: LossAmount::Count(1),
            })
        );
    }

    #[test]
    fn reap_wins_over_later_patterns() {
        assert_eq!(
            kind_of("Alice uses Troll to reap with Troll to steal 1"),
            Some(EventKind::ReapDeclared)
        );
    }

    #[test]
    fn unrecognized_lines_are_discarded() {
        assert_eq!(classify(""), None);
        assert_eq!(classify("Alice draws 6 cards"), None);
    }

    #[test]
    fn recognizer_order_is_canonical() {
        let kinds: Vec<EventKind> = RECOGNIZERS.iter().map(|(kind, _)| *kind).collect();
        let mut sorted = kinds.clone();
        sorted.sort();
        assert_eq!(kinds, sorted);
    }
}
