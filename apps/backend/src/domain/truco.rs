//! Truco: the stake escalation overlay on `Playing`.
//!
//! `None → Requested → (Accepted | Declined)`. Only one request may be
//! outstanding; card play is blocked for every seat until it is answered.

use crate::domain::rules::require_next_stake;
use crate::domain::scoring::apply_round_result;
use crate::domain::state::{
    require_phase, require_seat, MatchState, Phase, RoundEnd, SeatIndex, TrucoRequest,
};
use crate::errors::domain::{DomainError, ValidationKind};

/// Ask the opposing team to raise the round to the next stake.
pub fn request_truco(state: &MatchState, who: SeatIndex) -> Result<MatchState, DomainError> {
    require_phase(state, Phase::Playing, "request_truco")?;
    let team = require_seat(state, who)?.team;
    if state.round.truco.is_some() {
        return Err(DomainError::validation(
            ValidationKind::EscalationPending,
            "A stake increase is already awaiting an answer",
        ));
    }
    let proposed = require_next_stake(state.round.stake)?;

    let mut next = state.clone();
    next.round.truco = Some(TrucoRequest {
        by: who,
        team,
        proposed,
    });
    Ok(next)
}

/// Accept the pending raise: the stake moves up one rung.
pub fn accept_truco(state: &MatchState, who: SeatIndex) -> Result<MatchState, DomainError> {
    let request = require_responder(state, who, "accept_truco")?;
    let mut next = state.clone();
    next.round.stake = request.proposed;
    next.round.truco = None;
    Ok(next)
}

/// Decline ("run from") the pending raise: the requesting team takes the round
/// at the stake it was worth before the request.
pub fn decline_truco(state: &MatchState, who: SeatIndex) -> Result<MatchState, DomainError> {
    let request = require_responder(state, who, "decline_truco")?;
    let mut next = state.clone();
    next.round.truco = None;
    apply_round_result(&mut next, request.team, RoundEnd::Declined);
    Ok(next)
}

fn require_responder(
    state: &MatchState,
    who: SeatIndex,
    ctx: &'static str,
) -> Result<TrucoRequest, DomainError> {
    require_phase(state, Phase::Playing, ctx)?;
    let team = require_seat(state, who)?.team;
    let Some(request) = state.round.truco else {
        return Err(DomainError::validation(
            ValidationKind::NoEscalationPending,
            "No stake increase to answer",
        ));
    };
    if team == request.team {
        return Err(DomainError::validation(
            ValidationKind::OwnTeamResponse,
            "Only the opposing team may answer",
        ));
    }
    Ok(request)
}
