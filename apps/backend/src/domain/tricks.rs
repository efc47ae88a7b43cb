use time::OffsetDateTime;

use crate::domain::cards_logic::compare;
use crate::domain::scoring::{apply_round_result, round_decided, round_winner};
use crate::domain::state::{
    next_seat, require_phase, require_seat, require_turn, MatchState, Phase, RoundEnd, SeatIndex,
    Team, TrickPlay, TrickResult,
};
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of playing a card, describing what changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCardOutcome {
    /// Whether this play completed a trick.
    pub trick_completed: bool,
    /// Winner of the completed trick, if one was completed.
    pub trick_winner: Option<SeatIndex>,
    /// Team that took the round, if the play ended it.
    pub round_winner: Option<Team>,
}

/// Seat whose card is highest under `compare`. Collection order is irrelevant.
pub fn trick_winner(plays: &[TrickPlay], vira: Option<Card>) -> Result<SeatIndex, DomainError> {
    plays
        .iter()
        .max_by(|a, b| compare(a.card, b.card, vira))
        .map(|p| p.seat)
        .ok_or_else(|| DomainError::validation(ValidationKind::EmptyTrick, "Trick has no plays"))
}

/// Cards `who` may play right now: the whole hand when they hold the turn and
/// no raise is pending, nothing otherwise.
pub fn playable_cards(state: &MatchState, who: SeatIndex) -> Vec<Card> {
    if state.phase != Phase::Playing
        || state.turn != Some(who)
        || state.round.truco.is_some()
    {
        return Vec::new();
    }
    state.seat(who).map(|s| s.hand.clone()).unwrap_or_default()
}

/// Play a card into the current trick.
///
/// Enforces phase, turn, card ownership, and blocks while a truco request is
/// waiting for an answer.
pub fn play_card(
    state: &MatchState,
    who: SeatIndex,
    card: Card,
) -> Result<(MatchState, PlayCardOutcome), DomainError> {
    require_phase(state, Phase::Playing, "play_card")?;
    let seat = require_seat(state, who)?;

    if state.round.truco.is_some() {
        return Err(DomainError::validation(
            ValidationKind::EscalationPending,
            "A stake increase is awaiting an answer",
        ));
    }

    let turn = require_turn(state, "play_card")?;
    if turn != who {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            "Out of turn",
        ));
    }

    let Some(pos) = seat.hand.iter().position(|&c| c == card) else {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            format!("Card {card} not in hand"),
        ));
    };

    let mut next = state.clone();
    let seat_count = next.seat_count();

    if next.round.trick.is_empty() {
        next.round.leader = Some(who);
    }
    if let Some(seat) = next.seat_mut(who) {
        seat.hand.remove(pos);
    }
    next.round.trick.push(TrickPlay {
        seat: who,
        card,
        at: OffsetDateTime::now_utc(),
    });

    let mut outcome = PlayCardOutcome {
        trick_completed: false,
        trick_winner: None,
        round_winner: None,
    };

    if next.round.trick.len() < seat_count {
        next.turn = Some(next_seat(who, seat_count));
        return Ok((next, outcome));
    }

    // Trick complete
    let winner = trick_winner(&next.round.trick, next.round.vira)?;
    let team = require_seat(&next, winner)?.team;
    let plays = std::mem::take(&mut next.round.trick);
    next.round.history.push(TrickResult {
        plays,
        winner,
        team,
    });
    outcome.trick_completed = true;
    outcome.trick_winner = Some(winner);

    if round_decided(&next.round.history) {
        let round_team = round_winner(&next.round.history, next.dealer_team());
        apply_round_result(&mut next, round_team, RoundEnd::Tricks);
        outcome.round_winner = Some(round_team);
        return Ok((next, outcome));
    }

    next.round.leader = Some(winner);
    next.turn = Some(winner);
    Ok((next, outcome))
}
