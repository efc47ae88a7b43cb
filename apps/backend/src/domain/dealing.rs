//! Deck construction, shuffling and dealing.

use rand::Rng;

use crate::domain::rules::HAND_SIZE;
use crate::domain::{Card, Face, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

pub const DECK_SIZE: usize = 40;

/// The 40-card deck (4 suits × 10 faces) in a fixed order.
pub fn build_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for face in Face::ALL {
            deck.push(Card { suit, face });
        }
    }
    deck
}

/// Fisher-Yates shuffle.
pub fn shuffle<R: Rng + ?Sized>(deck: &mut [Card], rng: &mut R) {
    for i in (1..deck.len()).rev() {
        let j = rng.random_range(0..=i);
        deck.swap(i, j);
    }
}

/// Cards for one round: the turned card plus one sorted hand per seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub vira: Card,
    pub hands: Vec<Vec<Card>>,
}

/// Shuffle a fresh deck, deal three cards to each seat, then turn the vira.
pub fn deal_cards<R: Rng + ?Sized>(seat_count: usize, rng: &mut R) -> Result<Deal, DomainError> {
    if seat_count != 2 && seat_count != 4 {
        return Err(DomainError::validation(
            ValidationKind::MatchNotFull,
            format!("Cannot deal to {seat_count} seats"),
        ));
    }

    let mut deck = build_deck();
    shuffle(&mut deck, rng);

    let mut cards = deck.into_iter();
    let mut hands = Vec::with_capacity(seat_count);
    for _ in 0..seat_count {
        let mut hand: Vec<Card> = cards.by_ref().take(HAND_SIZE).collect();
        hand.sort();
        hands.push(hand);
    }
    let vira = cards
        .next()
        .ok_or_else(|| DomainError::validation_other("Deck exhausted before turning the vira"))?;

    Ok(Deal { vira, hands })
}
