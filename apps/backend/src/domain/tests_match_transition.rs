use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use uuid::Uuid;

use crate::domain::lifecycle::{begin_match, deal, rematch};
use crate::domain::match_transition::{derive_match_transitions, MatchTransition};
use crate::domain::seats::{disconnect, join, reconnect};
use crate::domain::state::{MatchState, Mode, Team};
use crate::domain::test_state_helpers::{
    card, dealt_match, play_out_round, playing_with_hands, seated_lobby,
};
use crate::domain::tricks::play_card;

#[test]
fn no_change_no_transitions() {
    let (state, _) = dealt_match(Mode::OneVsOne, 1);
    assert!(derive_match_transitions(&state, &state).is_empty());
}

#[test]
fn join_in_lobby_is_quiet() {
    let before = MatchState::new(Mode::OneVsOne);
    let (after, _) = join(&before, Uuid::new_v4(), "Ana").unwrap();
    assert!(derive_match_transitions(&before, &after).is_empty());
}

#[test]
fn start_and_deal_emit_started_and_turn() {
    let (lobby, _) = seated_lobby(Mode::TwoVsTwo);
    let dealing = begin_match(&lobby).unwrap();
    let playing = deal(&dealing, &mut ChaCha20Rng::seed_from_u64(3)).unwrap();
    let transitions = derive_match_transitions(&lobby, &playing);
    assert!(transitions.contains(&MatchTransition::MatchStarted));
    assert!(transitions.contains(&MatchTransition::TurnBecame { seat: 1 }));
}

#[test]
fn each_play_moves_the_turn() {
    let (state, _) = playing_with_hands(
        Mode::OneVsOne,
        &[&["5H", "KD", "6S"], &["3S", "2C", "7D"]],
        "4C",
        0,
    );
    let (next, _) = play_card(&state, 1, card("3S")).unwrap();
    assert_eq!(
        derive_match_transitions(&state, &next),
        vec![MatchTransition::TurnBecame { seat: 0 }]
    );
}

#[test]
fn round_and_game_end_are_reported() {
    let (mut state, _) = playing_with_hands(
        Mode::OneVsOne,
        &[&["3C", "3H", "4D"], &["4S", "6D", "7H"]],
        "KS",
        1,
    );
    state.scores = [11, 0];
    let after = play_out_round(state.clone());
    let transitions = derive_match_transitions(&state, &after);
    assert!(transitions.contains(&MatchTransition::RoundEnded {
        round_no: 1,
        winner: Team::A
    }));
    assert!(transitions.contains(&MatchTransition::GameEnded { winner: Team::A }));

    let lobby = rematch(&after).unwrap();
    assert!(derive_match_transitions(&after, &lobby).contains(&MatchTransition::ReturnedToLobby));
}

#[test]
fn everyone_gone_and_back() {
    let (state, conns) = dealt_match(Mode::OneVsOne, 4);
    let (one_gone, _) = disconnect(&state, conns[0]).unwrap();
    assert!(derive_match_transitions(&state, &one_gone).is_empty());

    let (all_gone, _) = disconnect(&one_gone, conns[1]).unwrap();
    assert_eq!(
        derive_match_transitions(&one_gone, &all_gone),
        vec![MatchTransition::AllDisconnected]
    );

    let (back, _) = reconnect(&all_gone, Uuid::new_v4(), "Bruno", None).unwrap();
    assert_eq!(
        derive_match_transitions(&all_gone, &back),
        vec![MatchTransition::SomeoneReconnected]
    );
}
