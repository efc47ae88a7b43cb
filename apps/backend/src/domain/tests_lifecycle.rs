use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use uuid::Uuid;

use crate::domain::lifecycle::{begin_match, begin_next_round, deal, rematch};
use crate::domain::rules::{Stake, HAND_SIZE};
use crate::domain::seats::{disconnect, join};
use crate::domain::state::{MatchState, Mode, Phase, Team};
use crate::domain::test_state_helpers::{dealt_match, play_out_round, seated_lobby};
use crate::errors::domain::{DomainError, ValidationKind};

fn validation_kind(err: DomainError) -> ValidationKind {
    match err {
        DomainError::Validation(kind, _) => kind,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn begin_match_needs_every_seat() {
    let (state, _) = join(&MatchState::new(Mode::OneVsOne), Uuid::new_v4(), "Ana").unwrap();
    let err = begin_match(&state).unwrap_err();
    assert_eq!(validation_kind(err), ValidationKind::MatchNotFull);
}

#[test]
fn begin_match_needs_every_seat_ready() {
    let mut state = MatchState::new(Mode::OneVsOne);
    for name in ["Ana", "Bruno"] {
        state = join(&state, Uuid::new_v4(), name).unwrap().0;
    }
    let err = begin_match(&state).unwrap_err();
    assert_eq!(validation_kind(err), ValidationKind::SeatsNotReady);
}

#[test]
fn begin_match_moves_to_dealing_with_dealer_zero() {
    let (lobby, _) = seated_lobby(Mode::TwoVsTwo);
    let state = begin_match(&lobby).unwrap();
    assert_eq!(state.phase, Phase::Dealing);
    assert_eq!(state.dealer, 0);
    assert_eq!(state.scores, [0, 0]);
    assert!(begin_match(&state).is_err());
}

#[test]
fn deal_hands_out_three_cards_and_a_distinct_vira() {
    for mode in [Mode::OneVsOne, Mode::TwoVsTwo] {
        let (state, _) = dealt_match(mode, 42);
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.round_no, 1);
        assert_eq!(state.round.stake, Stake::One);
        assert_eq!(state.turn, Some(1));
        assert_eq!(state.round.leader, Some(1));

        let vira = state.round.vira.expect("vira turned");
        let mut seen = HashSet::new();
        seen.insert(vira);
        for (_, seat) in state.occupied() {
            assert_eq!(seat.hand.len(), HAND_SIZE);
            for card in &seat.hand {
                assert!(seen.insert(*card), "{card} dealt twice");
            }
        }
        assert_eq!(seen.len(), mode.seat_count() * HAND_SIZE + 1);
    }
}

#[test]
fn deal_is_deterministic_for_a_seed() {
    let (a, _) = dealt_match(Mode::TwoVsTwo, 1234);
    let (b, _) = dealt_match(Mode::TwoVsTwo, 1234);
    assert_eq!(a.round.vira, b.round.vira);
    for (x, y) in a.seats.iter().zip(&b.seats) {
        assert_eq!(x.as_ref().unwrap().hand, y.as_ref().unwrap().hand);
    }
}

#[test]
fn deal_outside_dealing_is_rejected() {
    let (lobby, _) = seated_lobby(Mode::OneVsOne);
    let mut rng = ChaCha20Rng::seed_from_u64(0);
    let err = deal(&lobby, &mut rng).unwrap_err();
    assert_eq!(validation_kind(err), ValidationKind::PhaseMismatch);
}

#[test]
fn next_round_rotates_the_first_player() {
    let (state, _) = dealt_match(Mode::TwoVsTwo, 8);
    let state = play_out_round(state);
    assert_eq!(state.phase, Phase::RoundOver);
    assert_eq!(state.dealer, 1);

    let state = begin_next_round(&state).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(99);
    let state = deal(&state, &mut rng).unwrap();
    assert_eq!(state.round_no, 2);
    assert_eq!(state.turn, Some(2));
    assert!(state.occupied().all(|(_, s)| s.hand.len() == HAND_SIZE));
}

#[test]
fn begin_next_round_only_from_round_over() {
    let (state, _) = dealt_match(Mode::OneVsOne, 8);
    let err = begin_next_round(&state).unwrap_err();
    assert_eq!(validation_kind(err), ValidationKind::PhaseMismatch);
}

#[test]
fn game_over_accepts_no_more_rounds() {
    let (mut state, _) = dealt_match(Mode::OneVsOne, 21);
    state.scores = [11, 11];
    let state = play_out_round(state);
    assert_eq!(state.phase, Phase::GameOver);
    assert!(matches!(state.winner, Some(Team::A) | Some(Team::B)));
    assert!(begin_next_round(&state).is_err());
}

#[test]
fn rematch_returns_players_to_the_lobby() {
    let (mut state, _) = dealt_match(Mode::OneVsOne, 21);
    state.scores = [11, 11];
    let state = play_out_round(state);

    let state = rematch(&state).unwrap();
    assert_eq!(state.phase, Phase::WaitingForSeats);
    assert_eq!(state.scores, [0, 0]);
    assert_eq!(state.winner, None);
    assert_eq!(state.occupancy(), 2);
    assert!(state.occupied().all(|(_, s)| !s.ready));
}

#[test]
fn rematch_frees_disconnected_seats() {
    let (mut state, conns) = dealt_match(Mode::TwoVsTwo, 21);
    state.scores = [11, 11];
    let state = play_out_round(state);
    assert_eq!(state.phase, Phase::GameOver);
    let (state, _) = disconnect(&state, conns[2]).unwrap();
    assert!(state.seats[2].is_some());

    let state = rematch(&state).unwrap();
    assert!(state.seats[2].is_none());
    assert_eq!(state.occupancy(), 3);
    assert!(state.occupied().all(|(_, s)| s.connected));
}

#[test]
fn rematch_requires_game_over() {
    let (lobby, _) = seated_lobby(Mode::OneVsOne);
    let err = rematch(&lobby).unwrap_err();
    assert_eq!(validation_kind(err), ValidationKind::PhaseMismatch);
}
