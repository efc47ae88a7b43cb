//! Card tokens: two characters, face then suit (e.g. "5H", "QC", "3S").
//!
//! Faces: `4 5 6 7 Q J K A 2 3`. Suits: `C H S D`.
//! The token is the card's stable identifier on the wire.

use std::fmt;
use std::str::FromStr;

use super::cards_types::{Card, Face, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

impl Face {
    pub const fn symbol(self) -> char {
        match self {
            Face::Four => '4',
            Face::Five => '5',
            Face::Six => '6',
            Face::Seven => '7',
            Face::Queen => 'Q',
            Face::Jack => 'J',
            Face::King => 'K',
            Face::Ace => 'A',
            Face::Two => '2',
            Face::Three => '3',
        }
    }

    fn from_symbol(ch: char) -> Option<Face> {
        Face::ALL.into_iter().find(|f| f.symbol() == ch)
    }
}

impl Suit {
    pub const fn symbol(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
            Suit::Diamonds => 'D',
        }
    }

    fn from_symbol(ch: char) -> Option<Suit> {
        Suit::ALL.into_iter().find(|s| s.symbol() == ch)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face.symbol(), self.suit.symbol())
    }
}

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || DomainError::validation(ValidationKind::ParseCard, format!("Parse card: {s}"));
        let mut chars = s.chars();
        let (Some(face_ch), Some(suit_ch), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(err());
        };
        let face = Face::from_symbol(face_ch.to_ascii_uppercase()).ok_or_else(err)?;
        let suit = Suit::from_symbol(suit_ch.to_ascii_uppercase()).ok_or_else(err)?;
        Ok(Card { suit, face })
    }
}
