use time::OffsetDateTime;

use crate::domain::rules::Stake;
use crate::domain::scoring::{finish_round, round_decided, round_winner, tally_tricks};
use crate::domain::state::{Mode, Phase, RoundEnd, Team, TrickPlay, TrickResult};
use crate::domain::test_state_helpers::{card, play_out_round, playing_with_hands};
use crate::domain::tricks::play_card;
use crate::errors::domain::{DomainError, ValidationKind};

fn won_by(team: Team) -> TrickResult {
    let seat = team.index() as u8;
    TrickResult {
        plays: vec![TrickPlay {
            seat,
            card: card("4C"),
            at: OffsetDateTime::UNIX_EPOCH,
        }],
        winner: seat,
        team,
    }
}

/// Seat 0 (team A) holds both threes; seat 0 leads with dealer 1.
fn team_a_sweeps() -> crate::domain::MatchState {
    playing_with_hands(
        Mode::OneVsOne,
        &[&["3C", "3H", "4D"], &["4S", "6D", "7H"]],
        "KS",
        1,
    )
    .0
}

#[test]
fn tally_counts_per_team() {
    let history = vec![won_by(Team::A), won_by(Team::B), won_by(Team::A)];
    assert_eq!(tally_tricks(&history), [2, 1]);
    assert!(round_decided(&history));
}

#[test]
fn round_is_decided_at_two_wins_or_three_tricks() {
    assert!(!round_decided(&[]));
    assert!(!round_decided(&[won_by(Team::A)]));
    assert!(!round_decided(&[won_by(Team::A), won_by(Team::B)]));
    assert!(round_decided(&[won_by(Team::B), won_by(Team::B)]));
}

#[test]
fn even_split_goes_to_dealer_team() {
    let history = vec![won_by(Team::A), won_by(Team::B)];
    assert_eq!(round_winner(&history, Team::B), Team::B);
    assert_eq!(round_winner(&history, Team::A), Team::A);
    assert_eq!(round_winner(&[won_by(Team::B)], Team::A), Team::B);
}

#[test]
fn finish_round_requires_a_decided_round() {
    let state = team_a_sweeps();
    let err = finish_round(&state).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::RoundNotDecided, _)
    ));
}

#[test]
fn finish_round_awards_current_stake() {
    let mut state = team_a_sweeps();
    state.round.stake = Stake::Six;
    state.round.history = vec![won_by(Team::B), won_by(Team::B)];
    let next = finish_round(&state).unwrap();
    assert_eq!(next.phase, Phase::RoundOver);
    assert_eq!(next.scores, [0, 6]);
    let summary = next.last_round.unwrap();
    assert_eq!(summary.winner, Team::B);
    assert_eq!(summary.points, 6);
    assert_eq!(summary.ended_by, RoundEnd::Tricks);
}

#[test]
fn reaching_twelve_ends_the_game() {
    let mut state = team_a_sweeps();
    state.scores = [9, 4];
    state.round.stake = Stake::Three;

    let (state, _) = play_card(&state, 0, card("3C")).unwrap();
    let (state, _) = play_card(&state, 1, card("4S")).unwrap();
    let (state, _) = play_card(&state, 0, card("3H")).unwrap();
    let (state, outcome) = play_card(&state, 1, card("6D")).unwrap();

    assert_eq!(outcome.round_winner, Some(Team::A));
    assert_eq!(state.scores, [12, 4]);
    assert_eq!(state.phase, Phase::GameOver);
    assert_eq!(state.winner, Some(Team::A));
    assert_eq!(state.turn, None);
}

#[test]
fn overshoot_is_kept() {
    let mut state = team_a_sweeps();
    state.scores = [11, 0];
    state.round.stake = Stake::Six;
    let state = play_out_round(state);
    assert_eq!(state.phase, Phase::GameOver);
    assert_eq!(state.scores, [17, 0]);
}

#[test]
fn dealer_advances_after_a_round_and_wraps() {
    let state = team_a_sweeps();
    assert_eq!(state.dealer, 1);
    let state = play_out_round(state);
    assert_eq!(state.phase, Phase::RoundOver);
    assert_eq!(state.dealer, 0);

    let (state, _) = playing_with_hands(
        Mode::TwoVsTwo,
        &[
            &["4C", "5C", "6C"],
            &["3D", "QC", "JC"],
            &["7S", "KC", "AC"],
            &["2D", "2H", "2S"],
        ],
        "6D",
        3,
    );
    let state = play_out_round(state);
    assert_eq!(state.dealer, 0);
}

#[test]
fn round_end_clears_round_state() {
    let state = play_out_round(team_a_sweeps());
    assert_eq!(state.round.stake, Stake::One);
    assert!(state.round.vira.is_none());
    assert!(state.round.history.is_empty());
    assert!(state.round.trick.is_empty());
    assert!(state.round.truco.is_none());
}
