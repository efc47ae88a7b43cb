use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::rules::Stake;
use crate::domain::Card;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// Position at the table, 0-based, fixed for the life of a match.
pub type SeatIndex = u8;

/// Identity of a transport connection. Volatile: a reconnecting player
/// arrives with a new one.
pub type ConnectionId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[serde(rename = "1v1")]
    OneVsOne,
    #[serde(rename = "2v2")]
    TwoVsTwo,
}

impl Mode {
    pub const fn seat_count(self) -> usize {
        match self {
            Mode::OneVsOne => 2,
            Mode::TwoVsTwo => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl Team {
    /// Teams alternate around the table: even seats are A, odd seats are B.
    pub const fn for_seat(seat: SeatIndex) -> Team {
        if seat % 2 == 0 {
            Team::A
        } else {
            Team::B
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Team::A => 0,
            Team::B => 1,
        }
    }

    pub const fn opponent(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }
}

/// Match lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Seats are being filled; nothing is dealt.
    WaitingForSeats,
    /// Transient: a round is about to be dealt.
    Dealing,
    /// Tricks are being played; the truco overlay is live.
    Playing,
    /// Round scored; waiting for the next round to be started.
    RoundOver,
    /// A team reached the win threshold.
    GameOver,
}

impl Phase {
    /// Phases in which a dropped connection keeps its seat.
    pub const fn keeps_seats_on_disconnect(self) -> bool {
        !matches!(self, Phase::WaitingForSeats)
    }
}

/// A player's durable slot in a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub display_name: String,
    pub team: Team,
    /// Connection currently bound to the seat (last known when disconnected).
    pub conn: ConnectionId,
    /// Server-issued durable identity, handed to the player on join.
    pub token: Uuid,
    pub connected: bool,
    pub ready: bool,
    pub hand: Vec<Card>,
}

/// One card played into a trick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrickPlay {
    pub seat: SeatIndex,
    pub card: Card,
    pub at: OffsetDateTime,
}

/// A completed trick and who took it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrickResult {
    pub plays: Vec<TrickPlay>,
    pub winner: SeatIndex,
    pub team: Team,
}

/// Outstanding request to raise the stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrucoRequest {
    pub by: SeatIndex,
    pub team: Team,
    /// Stake the round will be worth if the request is accepted.
    pub proposed: Stake,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundEnd {
    /// Decided by trick wins.
    Tricks,
    /// The responding team declined a raise.
    Declined,
}

/// Outcome of the most recently finished round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round_no: u32,
    pub winner: Team,
    pub points: u8,
    pub ended_by: RoundEnd,
    pub trick_winners: Vec<Team>,
}

/// Per-round transient state; reset whenever a round finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    pub vira: Option<Card>,
    pub stake: Stake,
    /// Seat that led the current trick.
    pub leader: Option<SeatIndex>,
    /// Plays of the trick in progress, in table order from the leader.
    pub trick: Vec<TrickPlay>,
    /// Completed tricks of this round.
    pub history: Vec<TrickResult>,
    pub truco: Option<TrucoRequest>,
}

impl RoundState {
    pub fn empty() -> Self {
        Self {
            vira: None,
            stake: Stake::One,
            leader: None,
            trick: Vec::new(),
            history: Vec::new(),
            truco: None,
        }
    }
}

/// Entire match container. Transitions never mutate a committed value:
/// they clone, change the clone and hand it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    pub mode: Mode,
    pub phase: Phase,
    /// One slot per table position; `None` while unoccupied.
    pub seats: Vec<Option<Seat>>,
    /// Dealer seat for the current (or next) round.
    pub dealer: SeatIndex,
    /// Seat expected to play; `Some` only while `Playing`.
    pub turn: Option<SeatIndex>,
    /// Cumulative score per team, indexed by `Team::index`.
    pub scores: [u8; 2],
    /// 1-based number of the current round; 0 before the first deal.
    pub round_no: u32,
    pub round: RoundState,
    pub winner: Option<Team>,
    pub last_round: Option<RoundSummary>,
}

impl MatchState {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            phase: Phase::WaitingForSeats,
            seats: vec![None; mode.seat_count()],
            dealer: 0,
            turn: None,
            scores: [0; 2],
            round_no: 0,
            round: RoundState::empty(),
            winner: None,
            last_round: None,
        }
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    pub fn occupied(&self) -> impl Iterator<Item = (SeatIndex, &Seat)> {
        self.seats
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|seat| (i as SeatIndex, seat)))
    }

    pub fn occupancy(&self) -> usize {
        self.occupied().count()
    }

    pub fn is_full(&self) -> bool {
        self.seats.iter().all(Option::is_some)
    }

    pub fn seat(&self, idx: SeatIndex) -> Option<&Seat> {
        self.seats.get(idx as usize).and_then(Option::as_ref)
    }

    pub fn seat_mut(&mut self, idx: SeatIndex) -> Option<&mut Seat> {
        self.seats.get_mut(idx as usize).and_then(Option::as_mut)
    }

    /// Seat currently bound to `conn`, connected or not.
    pub fn seat_of(&self, conn: ConnectionId) -> Option<SeatIndex> {
        self.occupied()
            .find(|(_, seat)| seat.conn == conn)
            .map(|(idx, _)| idx)
    }

    pub fn seat_by_name(&self, display_name: &str) -> Option<SeatIndex> {
        self.occupied()
            .find(|(_, seat)| names_match(&seat.display_name, display_name))
            .map(|(idx, _)| idx)
    }

    pub fn team_of(&self, idx: SeatIndex) -> Option<Team> {
        self.seat(idx).map(|s| s.team)
    }

    pub fn dealer_team(&self) -> Team {
        Team::for_seat(self.dealer)
    }

    pub fn score(&self, team: Team) -> u8 {
        self.scores[team.index()]
    }
}

/// Display names compare trimmed and case-insensitively.
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Seat `delta` steps around a table of `seat_count` seats.
#[inline]
pub fn seat_offset(seat: SeatIndex, delta: i8, seat_count: usize) -> SeatIndex {
    let n = seat_count.max(1) as i16;
    ((seat as i16 + delta as i16).rem_euclid(n)) as SeatIndex
}

/// Next seat in table order, wrapping to seat 0 after the last.
#[inline]
pub fn next_seat(seat: SeatIndex, seat_count: usize) -> SeatIndex {
    seat_offset(seat, 1, seat_count)
}

/// Seat that acts first in a round: the one after the dealer.
#[inline]
pub fn round_start_seat(dealer: SeatIndex, seat_count: usize) -> SeatIndex {
    next_seat(dealer, seat_count)
}

pub fn require_phase(state: &MatchState, expected: Phase, ctx: &'static str) -> Result<(), DomainError> {
    if state.phase == expected {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("{ctx}: expected {expected:?}, match is {:?}", state.phase),
        ))
    }
}

pub fn require_seat(state: &MatchState, idx: SeatIndex) -> Result<&Seat, DomainError> {
    state.seat(idx).ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Seat, format!("No player in seat {idx}"))
    })
}

pub fn require_seat_of(state: &MatchState, conn: ConnectionId) -> Result<SeatIndex, DomainError> {
    state.seat_of(conn).ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Seat, "Connection holds no seat in this match")
    })
}

pub fn require_turn(state: &MatchState, ctx: &'static str) -> Result<SeatIndex, DomainError> {
    state.turn.ok_or_else(|| {
        DomainError::validation_other(format!("Invariant violated: turn must be set ({ctx})"))
    })
}
