use serde_json::json;
use uuid::Uuid;

use crate::domain::seats::{disconnect, join};
use crate::domain::snapshot::snapshot;
use crate::domain::state::{MatchState, Mode, Phase};
use crate::domain::test_state_helpers::{card, playing_with_hands};
use crate::domain::tricks::play_card;
use crate::domain::truco::request_truco;
use crate::domain::{Face, Stake};

fn table() -> (MatchState, Vec<Uuid>) {
    playing_with_hands(
        Mode::OneVsOne,
        &[&["5H", "KD", "6S"], &["3S", "2C", "7D"]],
        "4C",
        0,
    )
}

#[test]
fn empty_lobby_renders_open_seats() {
    let (state, _) = join(&MatchState::new(Mode::TwoVsTwo), Uuid::new_v4(), "Ana").unwrap();
    let snap = snapshot(&state);
    assert_eq!(snap.phase, Phase::WaitingForSeats);
    assert_eq!(snap.seats.len(), 4);
    assert_eq!(snap.seats[0].display_name.as_deref(), Some("Ana"));
    assert!(snap.seats[1].display_name.is_none());
    assert!(!snap.seats[1].connected);
    assert!(!snap.seats[0].is_dealer);
    assert!(snap.vira.is_none());
    assert!(snap.manilha.is_none());
}

#[test]
fn playing_snapshot_flags_manilhas_and_turn() {
    let (state, _) = table();
    let snap = snapshot(&state);
    assert_eq!(snap.manilha, Some(Face::Five));
    assert_eq!(snap.turn, Some(1));
    assert!(snap.seats[0].is_dealer);
    assert!(snap.seats[1].has_turn);

    let flags: Vec<bool> = snap.seats[0].hand.iter().map(|h| h.manilha).collect();
    assert_eq!(flags, vec![true, false, false]);
    assert_eq!(snap.seats[1].playable.len(), 3);
    assert!(snap.seats[0].playable.is_empty());
}

#[test]
fn snapshot_tracks_trick_history_and_pending_raise() {
    let (state, _) = table();
    let (state, _) = play_card(&state, 1, card("3S")).unwrap();
    let snap = snapshot(&state);
    assert_eq!(snap.current_trick.len(), 1);
    assert_eq!(snap.current_trick[0].card, card("3S"));

    let (state, _) = play_card(&state, 0, card("5H")).unwrap();
    let state = request_truco(&state, 1).unwrap();
    let snap = snapshot(&state);
    assert!(snap.current_trick.is_empty());
    assert_eq!(snap.tricks.len(), 1);
    assert_eq!(snap.tricks[0].winner, 0);
    let pending = snap.pending_truco.unwrap();
    assert_eq!(pending.seat, 1);
    assert_eq!(pending.proposed, Stake::Three);
    assert!(snap.seats.iter().all(|s| s.playable.is_empty()));
}

#[test]
fn snapshot_shows_disconnected_seat() {
    let (state, conns) = table();
    let (state, _) = disconnect(&state, conns[0]).unwrap();
    let snap = snapshot(&state);
    assert!(!snap.seats[0].connected);
    assert_eq!(snap.seats[0].hand.len(), 3);
}

#[test]
fn viewer_sees_only_their_own_hand() {
    let (state, _) = table();
    let full = snapshot(&state);

    let view = full.for_viewer(Some(1));
    assert_eq!(view.seats[1].hand, full.seats[1].hand);
    assert_eq!(view.seats[1].playable.len(), 3);
    assert!(view.seats[0].hand.is_empty());
    assert_eq!(view.seats[0].cards_left, 3);
    assert_eq!(view.vira, full.vira);

    let spectator = full.for_viewer(None);
    assert!(spectator.seats.iter().all(|s| s.hand.is_empty() && s.playable.is_empty()));
    assert!(spectator.seats.iter().all(|s| s.cards_left == 3));
}

#[test]
fn snapshot_json_uses_wire_names() {
    let (state, _) = table();
    let value = serde_json::to_value(snapshot(&state)).unwrap();
    assert_eq!(value["mode"], json!("1v1"));
    assert_eq!(value["phase"], json!("PLAYING"));
    assert_eq!(value["vira"], json!("4C"));
    assert_eq!(value["manilha"], json!("5"));
    assert_eq!(value["stake"], json!(1));
    assert_eq!(value["scores"], json!({ "a": 0, "b": 0 }));
    assert_eq!(value["seats"][0]["hand"][0], json!({ "card": "5H", "manilha": true }));
    assert_eq!(value["seats"][1]["team"], json!("B"));
    assert_eq!(value["seats"][1]["cards_left"], json!(3));
    assert!(value.get("last_round").is_none());
}
