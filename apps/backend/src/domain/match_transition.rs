//! Edge-triggered facts derived from a before/after pair of committed states.
//!
//! The registry logs these and turns `TurnBecame` into a `your_turn` hint.

use crate::domain::seats::all_disconnected;
use crate::domain::state::{MatchState, Phase, SeatIndex, Team};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchTransition {
    /// The turn moved to a specific seat.
    TurnBecame { seat: SeatIndex },
    /// WaitingForSeats -> anything dealt.
    MatchStarted,
    /// A round was scored.
    RoundEnded { round_no: u32, winner: Team },
    /// A team reached the win threshold.
    GameEnded { winner: Team },
    /// Active match sent back to the lobby (rematch or a departure).
    ReturnedToLobby,
    /// Every seated player lost their connection.
    AllDisconnected,
    /// At least one player is back after everyone was gone.
    SomeoneReconnected,
}

/// Derive transitions from before/after state.
pub fn derive_match_transitions(before: &MatchState, after: &MatchState) -> Vec<MatchTransition> {
    let mut transitions = Vec::new();

    if let Some(seat) = after.turn {
        if before.turn != Some(seat) {
            transitions.push(MatchTransition::TurnBecame { seat });
        }
    }

    if before.phase == Phase::WaitingForSeats && after.phase != Phase::WaitingForSeats {
        transitions.push(MatchTransition::MatchStarted);
    }

    if after.last_round != before.last_round {
        if let Some(summary) = &after.last_round {
            transitions.push(MatchTransition::RoundEnded {
                round_no: summary.round_no,
                winner: summary.winner,
            });
        }
    }

    if before.phase != Phase::GameOver && after.phase == Phase::GameOver {
        if let Some(winner) = after.winner {
            transitions.push(MatchTransition::GameEnded { winner });
        }
    }

    if before.phase != Phase::WaitingForSeats && after.phase == Phase::WaitingForSeats {
        transitions.push(MatchTransition::ReturnedToLobby);
    }

    match (all_disconnected(before), all_disconnected(after)) {
        (false, true) => transitions.push(MatchTransition::AllDisconnected),
        (true, false) if after.occupancy() > 0 => {
            transitions.push(MatchTransition::SomeoneReconnected)
        }
        _ => {}
    }

    transitions
}
