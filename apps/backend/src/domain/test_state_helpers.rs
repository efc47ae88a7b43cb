//! Test-only builders for match states.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use uuid::Uuid;

use crate::domain::lifecycle::{begin_match, deal};
use crate::domain::seats::{join, mark_ready};
use crate::domain::state::{ConnectionId, MatchState, Mode, Phase, RoundState, SeatIndex};
use crate::domain::Card;

pub const NAMES: [&str; 4] = ["Ana", "Bruno", "Carla", "Davi"];

pub fn card(token: &str) -> Card {
    token.parse().expect("hardcoded valid card token")
}

pub fn cards(tokens: &[&str]) -> Vec<Card> {
    tokens.iter().map(|t| card(t)).collect()
}

/// A full, ready lobby plus the connection id of every seat in order.
pub fn seated_lobby(mode: Mode) -> (MatchState, Vec<ConnectionId>) {
    let mut state = MatchState::new(mode);
    let mut conns = Vec::new();
    for name in NAMES.iter().take(mode.seat_count()) {
        let conn = Uuid::new_v4();
        state = join(&state, conn, name).expect("join").0;
        state = mark_ready(&state, conn).expect("ready");
        conns.push(conn);
    }
    (state, conns)
}

/// A match dealt from a seeded deck, first round in `Playing`.
pub fn dealt_match(mode: Mode, seed: u64) -> (MatchState, Vec<ConnectionId>) {
    let (lobby, conns) = seated_lobby(mode);
    let dealing = begin_match(&lobby).expect("begin_match");
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    (deal(&dealing, &mut rng).expect("deal"), conns)
}

/// A `Playing` match with explicit hands, vira and dealer.
pub fn playing_with_hands(
    mode: Mode,
    hands: &[&[&str]],
    vira: &str,
    dealer: SeatIndex,
) -> (MatchState, Vec<ConnectionId>) {
    let (mut state, conns) = seated_lobby(mode);
    for (slot, hand) in state.seats.iter_mut().zip(hands) {
        if let Some(seat) = slot.as_mut() {
            seat.hand = cards(hand);
        }
    }
    let first = (dealer + 1) % mode.seat_count() as SeatIndex;
    state.phase = Phase::Playing;
    state.dealer = dealer;
    state.turn = Some(first);
    state.round_no = 1;
    state.round = RoundState {
        vira: Some(card(vira)),
        leader: Some(first),
        ..RoundState::empty()
    };
    (state, conns)
}

/// Play whatever the turn holder has first in hand until the round ends.
pub fn play_out_round(mut state: MatchState) -> MatchState {
    while state.phase == Phase::Playing {
        let turn = state.turn.expect("turn set while playing");
        let card = state.seat(turn).expect("seat").hand[0];
        state = crate::domain::tricks::play_card(&state, turn, card)
            .expect("legal play")
            .0;
    }
    state
}
