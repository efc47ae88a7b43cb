//! Domain layer: pure match logic types and transitions.
//!
//! Every transition takes a committed `&MatchState` and returns a new one, or
//! a `DomainError` that leaves the original untouched.

pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod lifecycle;
pub mod match_transition;
pub mod rules;
pub mod scoring;
pub mod seats;
pub mod snapshot;
pub mod state;
pub mod tricks;
pub mod truco;

#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_lifecycle;
#[cfg(test)]
mod tests_match_transition;
#[cfg(test)]
mod tests_scoring;
#[cfg(test)]
mod tests_snapshot;

// Re-exports for ergonomics
pub use cards_logic::{card_beats, compare, is_trump, trump_face};
pub use cards_types::{Card, Face, Suit};
pub use dealing::{build_deck, shuffle};
pub use rules::{has_won, next_stake, Stake};
pub use snapshot::{snapshot, MatchSnapshot};
pub use state::{ConnectionId, MatchState, Mode, Phase, SeatIndex, Team};
pub use tricks::trick_winner;
