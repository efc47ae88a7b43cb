//! Card strength under the manilha rule: trump face, trump check, comparison

use std::cmp::Ordering;

use super::cards_types::{Card, Face};

/// Face that is manilha this round: the successor of the turned card's face.
/// `None` until a card has been turned.
pub fn trump_face(vira: Option<Card>) -> Option<Face> {
    vira.map(|c| c.face.successor())
}

pub fn is_trump(card: Card, vira: Option<Card>) -> bool {
    trump_face(vira) == Some(card.face)
}

/// Manilha sub-rank, 1 (Diamonds) through 4 (Clubs), when the card is trump.
pub fn trump_rank(card: Card, vira: Option<Card>) -> Option<u8> {
    is_trump(card, vira).then_some(card.suit as u8 + 1)
}

/// Strict total order over the 40 cards for a given turned card.
///
/// Trump beats non-trump. Two trumps compare by suit. Two non-trumps compare
/// by face strength, suit breaking equal faces, so distinct cards never tie.
pub fn compare(a: Card, b: Card, vira: Option<Card>) -> Ordering {
    match (is_trump(a, vira), is_trump(b, vira)) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => a.suit.cmp(&b.suit),
        (false, false) => a.face.cmp(&b.face).then_with(|| a.suit.cmp(&b.suit)),
    }
}

pub fn card_beats(a: Card, b: Card, vira: Option<Card>) -> bool {
    compare(a, b, vira) == Ordering::Greater
}
