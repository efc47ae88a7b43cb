//! Round tally and scoring.

use crate::domain::rules::{has_won, points_for, TRICKS_PER_ROUND, TRICKS_TO_WIN};
use crate::domain::state::{
    next_seat, require_phase, MatchState, Phase, RoundEnd, RoundState, RoundSummary, Team,
    TrickResult,
};
use crate::errors::domain::{DomainError, ValidationKind};

/// Trick wins per team, indexed by `Team::index`.
pub fn tally_tricks(history: &[TrickResult]) -> [u8; 2] {
    let mut wins = [0u8; 2];
    for trick in history {
        wins[trick.team.index()] += 1;
    }
    wins
}

/// A round ends once a team holds two tricks or all three are played.
pub fn round_decided(history: &[TrickResult]) -> bool {
    let wins = tally_tricks(history);
    wins.iter().any(|w| *w >= TRICKS_TO_WIN) || history.len() >= TRICKS_PER_ROUND
}

/// Team with more trick wins; the dealer's team takes an even split.
pub fn round_winner(history: &[TrickResult], dealer_team: Team) -> Team {
    let [a, b] = tally_tricks(history);
    match a.cmp(&b) {
        std::cmp::Ordering::Greater => Team::A,
        std::cmp::Ordering::Less => Team::B,
        std::cmp::Ordering::Equal => dealer_team,
    }
}

/// Finish the current round from its trick history.
///
/// Requires `Playing` and a decided round.
pub fn finish_round(state: &MatchState) -> Result<MatchState, DomainError> {
    require_phase(state, Phase::Playing, "finish_round")?;
    if !round_decided(&state.round.history) {
        return Err(DomainError::validation(
            ValidationKind::RoundNotDecided,
            "Round has no winner yet",
        ));
    }
    let winner = round_winner(&state.round.history, state.dealer_team());
    let mut next = state.clone();
    apply_round_result(&mut next, winner, RoundEnd::Tricks);
    Ok(next)
}

/// Award the round to `winner` at the current stake and close the round.
///
/// Moves to `GameOver` when the winner reaches the threshold, otherwise
/// `RoundOver`. The dealer advances and hands are cleared either way.
pub(crate) fn apply_round_result(next: &mut MatchState, winner: Team, ended_by: RoundEnd) {
    let points = points_for(next.round.stake);
    let score = &mut next.scores[winner.index()];
    *score = score.saturating_add(points);
    let won = has_won(*score);

    next.last_round = Some(RoundSummary {
        round_no: next.round_no,
        winner,
        points,
        ended_by,
        trick_winners: next.round.history.iter().map(|t| t.team).collect(),
    });

    if won {
        next.phase = Phase::GameOver;
        next.winner = Some(winner);
    } else {
        next.phase = Phase::RoundOver;
    }

    next.dealer = next_seat(next.dealer, next.seat_count());
    next.turn = None;
    next.round = RoundState::empty();
    for seat in next.seats.iter_mut().flatten() {
        seat.hand.clear();
    }
}
