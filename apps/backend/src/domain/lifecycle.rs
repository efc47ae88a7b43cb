//! Match lifecycle transitions: start, deal, next round, rematch.

use rand::Rng;

use crate::domain::dealing::deal_cards;
use crate::domain::state::{
    require_phase, round_start_seat, MatchState, Phase, RoundState,
};
use crate::errors::domain::{DomainError, ValidationKind};

/// `WaitingForSeats` → `Dealing`. Every seat must be occupied and ready.
pub fn begin_match(state: &MatchState) -> Result<MatchState, DomainError> {
    require_phase(state, Phase::WaitingForSeats, "begin_match")?;
    if !state.is_full() {
        return Err(DomainError::validation(
            ValidationKind::MatchNotFull,
            format!(
                "{} of {} seats occupied",
                state.occupancy(),
                state.seat_count()
            ),
        ));
    }
    if state.occupied().any(|(_, seat)| !seat.ready) {
        return Err(DomainError::validation(
            ValidationKind::SeatsNotReady,
            "Every player must be ready",
        ));
    }

    let mut next = state.clone();
    next.phase = Phase::Dealing;
    next.dealer = 0;
    next.scores = [0; 2];
    next.round_no = 0;
    next.winner = None;
    next.last_round = None;
    next.round = RoundState::empty();
    Ok(next)
}

/// `RoundOver` → `Dealing`, stake back to one and no pending raise.
pub fn begin_next_round(state: &MatchState) -> Result<MatchState, DomainError> {
    require_phase(state, Phase::RoundOver, "begin_next_round")?;
    let mut next = state.clone();
    next.phase = Phase::Dealing;
    next.round = RoundState::empty();
    next.turn = None;
    Ok(next)
}

/// `Dealing` → `Playing`: fresh shuffled deck, three cards per seat, turned
/// card, turn to the seat after the dealer.
pub fn deal<R: Rng + ?Sized>(state: &MatchState, rng: &mut R) -> Result<MatchState, DomainError> {
    require_phase(state, Phase::Dealing, "deal")?;
    if !state.is_full() {
        return Err(DomainError::validation(
            ValidationKind::MatchNotFull,
            "Partial matches cannot deal",
        ));
    }

    let deal = deal_cards(state.seat_count(), rng)?;
    let mut next = state.clone();
    for (slot, hand) in next.seats.iter_mut().zip(deal.hands) {
        if let Some(seat) = slot.as_mut() {
            seat.hand = hand;
        }
    }

    let first = round_start_seat(next.dealer, next.seat_count());
    next.round = RoundState {
        vira: Some(deal.vira),
        leader: Some(first),
        ..RoundState::empty()
    };
    next.round_no += 1;
    next.turn = Some(first);
    next.phase = Phase::Playing;
    Ok(next)
}

/// `GameOver` → `WaitingForSeats`, keeping the seated players.
pub fn rematch(state: &MatchState) -> Result<MatchState, DomainError> {
    require_phase(state, Phase::GameOver, "rematch")?;
    let mut next = state.clone();
    reset_to_waiting(&mut next);
    Ok(next)
}

/// Clear everything but the seat assignments and return to the lobby.
/// Seats still disconnected are freed: a lobby keeps no absent players.
pub(crate) fn reset_to_waiting(next: &mut MatchState) {
    for slot in next.seats.iter_mut() {
        if slot.as_ref().is_some_and(|seat| !seat.connected) {
            *slot = None;
        }
    }
    next.phase = Phase::WaitingForSeats;
    next.dealer = 0;
    next.turn = None;
    next.scores = [0; 2];
    next.round_no = 0;
    next.round = RoundState::empty();
    next.winner = None;
    next.last_round = None;
    for seat in next.seats.iter_mut().flatten() {
        seat.hand.clear();
        seat.ready = false;
    }
}
