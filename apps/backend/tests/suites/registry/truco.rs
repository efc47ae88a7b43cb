use truco_backend::domain::{Mode, Phase, Stake};
use truco_backend::ErrorCode;

use crate::support::{registry, started, DEFAULT_GRACE};

#[tokio::test]
async fn raise_is_answered_by_the_other_team_only() {
    let registry = registry(DEFAULT_GRACE);
    let (id, clients) = started(&registry, Mode::TwoVsTwo);

    registry.request_truco(clients[1].conn, &id).unwrap();
    let err = registry.accept_truco(clients[3].conn, &id).unwrap_err();
    assert_eq!(err.code(), ErrorCode::OwnTeamResponse);

    let err = registry.request_truco(clients[0].conn, &id).unwrap_err();
    assert_eq!(err.code(), ErrorCode::EscalationPending);

    registry.accept_truco(clients[2].conn, &id).unwrap();
    let (_, snap) = registry.snapshot(&id).unwrap();
    assert_eq!(snap.stake, Stake::Three);
    assert!(snap.pending_truco.is_none());
}

#[tokio::test]
async fn cards_wait_for_the_answer() {
    let registry = registry(DEFAULT_GRACE);
    let (id, clients) = started(&registry, Mode::OneVsOne);
    let (_, snap) = registry.snapshot(&id).unwrap();
    let turn = snap.turn.unwrap() as usize;
    let card = snap.seats[turn].hand[0].card;

    registry.request_truco(clients[1 - turn].conn, &id).unwrap();
    let err = registry.play_card(clients[turn].conn, &id, card).unwrap_err();
    assert_eq!(err.code(), ErrorCode::EscalationPending);

    registry.accept_truco(clients[turn].conn, &id).unwrap();
    registry.play_card(clients[turn].conn, &id, card).unwrap();
}

#[tokio::test]
async fn decline_scores_the_old_stake_and_ends_the_round() {
    let registry = registry(DEFAULT_GRACE);
    let (id, clients) = started(&registry, Mode::OneVsOne);

    registry.request_truco(clients[0].conn, &id).unwrap();
    registry.accept_truco(clients[1].conn, &id).unwrap();
    registry.request_truco(clients[1].conn, &id).unwrap();
    registry.decline_truco(clients[0].conn, &id).unwrap();

    let (_, snap) = registry.snapshot(&id).unwrap();
    assert_eq!(snap.phase, Phase::RoundOver);
    assert_eq!((snap.scores.a, snap.scores.b), (0, 3));
    assert_eq!(snap.dealer, 1);
    let summary = snap.last_round.expect("round summary");
    assert_eq!(summary.points, 3);

    registry.start_next_round(clients[0].conn, &id).unwrap();
    let (_, snap) = registry.snapshot(&id).unwrap();
    assert_eq!(snap.stake, Stake::One);
    assert_eq!(snap.turn, Some(0));
}
