//! Core card-related types: Card, Face, Suit

/// Suits in ascending manilha order: Diamonds (pica-fumo) < Spades (espadilha)
/// < Hearts (copas) < Clubs (zap).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Diamonds,
    Spades,
    Hearts,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Diamonds, Suit::Spades, Suit::Hearts, Suit::Clubs];
}

/// Face values in ascending strength: 4 < 5 < 6 < 7 < Q < J < K < A < 2 < 3.
/// The 40-card deck has no 8, 9 or 10.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Face {
    Four,
    Five,
    Six,
    Seven,
    Queen,
    Jack,
    King,
    Ace,
    Two,
    Three,
}

impl Face {
    pub const ALL: [Face; 10] = [
        Face::Four,
        Face::Five,
        Face::Six,
        Face::Seven,
        Face::Queen,
        Face::Jack,
        Face::King,
        Face::Ace,
        Face::Two,
        Face::Three,
    ];

    /// Next face in the strength cycle; Three wraps back to Four.
    pub fn successor(self) -> Face {
        let idx = Face::ALL
            .iter()
            .position(|f| *f == self)
            .unwrap_or_default();
        Face::ALL[(idx + 1) % Face::ALL.len()]
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub face: Face,
}

impl Card {
    pub const fn new(face: Face, suit: Suit) -> Self {
        Self { suit, face }
    }
}

// Ord on Card sorts hands by face strength, suit breaking ties. It ignores the
// manilha; use `cards_logic::compare` for anything that decides a trick.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.face
            .cmp(&other.face)
            .then_with(|| self.suit.cmp(&other.suit))
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
