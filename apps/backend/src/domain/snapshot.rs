//! Public snapshot API for observing match state without exposing internals.
//!
//! Every field a client renders comes from here. The snapshot is built from a
//! committed `MatchState` and is immutable once built.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::cards_logic::{is_trump, trump_face};
use crate::domain::rules::Stake;
use crate::domain::state::{MatchState, Mode, Phase, RoundSummary, SeatIndex, Team};
use crate::domain::tricks::playable_cards;
use crate::domain::{Card, Face};

/// A card in hand with its manilha flag for this round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandCard {
    pub card: Card,
    pub manilha: bool,
}

/// Public info about a single seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatPublic {
    pub seat: SeatIndex,
    pub display_name: Option<String>,
    pub team: Team,
    pub connected: bool,
    pub ready: bool,
    pub is_dealer: bool,
    pub has_turn: bool,
    pub cards_left: usize,
    pub hand: Vec<HandCard>,
    pub playable: Vec<Card>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayPublic {
    pub seat: SeatIndex,
    pub card: Card,
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickPublic {
    pub plays: Vec<PlayPublic>,
    pub winner: SeatIndex,
    pub team: Team,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTruco {
    pub seat: SeatIndex,
    pub team: Team,
    pub proposed: Stake,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScores {
    pub a: u8,
    pub b: u8,
}

/// Full immutable view of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub mode: Mode,
    pub phase: Phase,
    pub round_no: u32,
    pub seats: Vec<SeatPublic>,
    pub dealer: SeatIndex,
    pub turn: Option<SeatIndex>,
    pub vira: Option<Card>,
    pub manilha: Option<Face>,
    pub stake: Stake,
    pub scores: TeamScores,
    pub current_trick: Vec<PlayPublic>,
    pub tricks: Vec<TrickPublic>,
    pub pending_truco: Option<PendingTruco>,
    pub winner: Option<Team>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_round: Option<RoundSummary>,
}

impl MatchSnapshot {
    /// What one seat may see: its own hand and playable cards, only counts for
    /// everyone else. `None` is a spectator and sees no hand at all.
    pub fn for_viewer(&self, viewer: Option<SeatIndex>) -> MatchSnapshot {
        let mut view = self.clone();
        for seat in view.seats.iter_mut().filter(|s| Some(s.seat) != viewer) {
            seat.hand.clear();
            seat.playable.clear();
        }
        view
    }
}

/// Entry point: produce a snapshot of the current match state.
/// Never panics; empty seats render with no name and no cards.
pub fn snapshot(state: &MatchState) -> MatchSnapshot {
    let vira = state.round.vira;
    let seats = state
        .seats
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let idx = i as SeatIndex;
            let hand: Vec<HandCard> = slot
                .as_ref()
                .map(|seat| {
                    seat.hand
                        .iter()
                        .map(|&card| HandCard {
                            card,
                            manilha: is_trump(card, vira),
                        })
                        .collect()
                })
                .unwrap_or_default();
            SeatPublic {
                seat: idx,
                display_name: slot.as_ref().map(|s| s.display_name.clone()),
                team: Team::for_seat(idx),
                connected: slot.as_ref().is_some_and(|s| s.connected),
                ready: slot.as_ref().is_some_and(|s| s.ready),
                is_dealer: state.phase != Phase::WaitingForSeats && state.dealer == idx,
                has_turn: state.turn == Some(idx),
                cards_left: hand.len(),
                hand,
                playable: playable_cards(state, idx),
            }
        })
        .collect();

    let play = |p: &crate::domain::state::TrickPlay| PlayPublic {
        seat: p.seat,
        card: p.card,
        at: p.at,
    };

    MatchSnapshot {
        mode: state.mode,
        phase: state.phase,
        round_no: state.round_no,
        seats,
        dealer: state.dealer,
        turn: state.turn,
        vira,
        manilha: trump_face(vira),
        stake: state.round.stake,
        scores: TeamScores {
            a: state.score(Team::A),
            b: state.score(Team::B),
        },
        current_trick: state.round.trick.iter().map(play).collect(),
        tricks: state
            .round
            .history
            .iter()
            .map(|t| TrickPublic {
                plays: t.plays.iter().map(play).collect(),
                winner: t.winner,
                team: t.team,
            })
            .collect(),
        pending_truco: state.round.truco.map(|r| PendingTruco {
            seat: r.by,
            team: r.team,
            proposed: r.proposed,
        }),
        winner: state.winner,
        last_round: state.last_round.clone(),
    }
}
