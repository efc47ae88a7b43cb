//! Seat occupancy and connection binding.
//!
//! A seat is durable; the connection bound to it is not. These transitions
//! decide when a dropped connection keeps its seat and how a new connection
//! takes a disconnected seat back.

use uuid::Uuid;

use crate::domain::lifecycle::reset_to_waiting;
use crate::domain::state::{
    require_phase, require_seat_of, ConnectionId, MatchState, Phase, Seat, SeatIndex, Team,
};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};

pub const MAX_DISPLAY_NAME_LEN: usize = 32;

/// What a successful join hands back to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinReceipt {
    pub seat: SeatIndex,
    pub team: Team,
    pub token: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectOutcome {
    /// Seat freed; the match had not started.
    Vacated(SeatIndex),
    /// Seat kept for a later reconnect.
    Suspended(SeatIndex),
}

/// Bind `conn` to the first free seat.
pub fn join(
    state: &MatchState,
    conn: ConnectionId,
    display_name: &str,
) -> Result<(MatchState, JoinReceipt), DomainError> {
    let name = display_name.trim();
    if name.is_empty() || name.chars().count() > MAX_DISPLAY_NAME_LEN {
        return Err(DomainError::validation(
            ValidationKind::InvalidDisplayName,
            format!("Display name must be 1..={MAX_DISPLAY_NAME_LEN} characters"),
        ));
    }
    if state.phase != Phase::WaitingForSeats {
        return Err(DomainError::conflict(
            ConflictKind::MatchInProgress,
            "Seats are fixed once a match starts",
        ));
    }
    if state.seat_of(conn).is_some() {
        return Err(DomainError::conflict(
            ConflictKind::AlreadySeated,
            "Connection already holds a seat",
        ));
    }
    if state.seat_by_name(name).is_some() {
        return Err(DomainError::conflict(
            ConflictKind::DuplicateDisplayName,
            format!("{name} is already seated in this match"),
        ));
    }
    let Some(free) = state.seats.iter().position(Option::is_none) else {
        return Err(DomainError::conflict(
            ConflictKind::MatchFull,
            "Every seat is taken",
        ));
    };

    let seat_idx = free as SeatIndex;
    let receipt = JoinReceipt {
        seat: seat_idx,
        team: Team::for_seat(seat_idx),
        token: Uuid::new_v4(),
    };
    let mut next = state.clone();
    next.seats[free] = Some(Seat {
        display_name: name.to_string(),
        team: receipt.team,
        conn,
        token: receipt.token,
        connected: true,
        ready: false,
        hand: Vec::new(),
    });
    Ok((next, receipt))
}

/// Permanent departure. An active match goes back to the lobby.
pub fn leave(state: &MatchState, conn: ConnectionId) -> Result<(MatchState, SeatIndex), DomainError> {
    let idx = require_seat_of(state, conn)?;
    let mut next = state.clone();
    next.seats[idx as usize] = None;
    if next.phase != Phase::WaitingForSeats {
        reset_to_waiting(&mut next);
    }
    Ok((next, idx))
}

pub fn mark_ready(state: &MatchState, conn: ConnectionId) -> Result<MatchState, DomainError> {
    require_phase(state, Phase::WaitingForSeats, "mark_ready")?;
    let idx = require_seat_of(state, conn)?;
    let mut next = state.clone();
    if let Some(seat) = next.seat_mut(idx) {
        seat.ready = true;
    }
    Ok(next)
}

/// Transport loss. Before the match starts the seat is freed; afterwards it
/// is only marked disconnected, with hand and turn untouched.
pub fn disconnect(
    state: &MatchState,
    conn: ConnectionId,
) -> Result<(MatchState, DisconnectOutcome), DomainError> {
    let idx = require_seat_of(state, conn)?;
    let mut next = state.clone();
    if !state.phase.keeps_seats_on_disconnect() {
        next.seats[idx as usize] = None;
        return Ok((next, DisconnectOutcome::Vacated(idx)));
    }
    if let Some(seat) = next.seat_mut(idx) {
        seat.connected = false;
    }
    Ok((next, DisconnectOutcome::Suspended(idx)))
}

/// Rebind a disconnected seat, found by display name, to `conn`.
///
/// When the player presents the seat token issued on join it must match.
/// Turn, dealer and truco pointers are seat indices, so they follow the seat.
pub fn reconnect(
    state: &MatchState,
    conn: ConnectionId,
    display_name: &str,
    token: Option<Uuid>,
) -> Result<(MatchState, SeatIndex), DomainError> {
    if state.seat_of(conn).is_some() {
        return Err(DomainError::conflict(
            ConflictKind::AlreadySeated,
            "Connection already holds a seat",
        ));
    }
    let idx = state.seat_by_name(display_name).ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Seat,
            format!("No seat for {}", display_name.trim()),
        )
    })?;
    let mut next = state.clone();
    let Some(seat) = next.seat_mut(idx) else {
        return Err(DomainError::not_found(NotFoundKind::Seat, "Seat vanished"));
    };
    if seat.connected {
        return Err(DomainError::conflict(
            ConflictKind::SeatStillConnected,
            "Seat is bound to a live connection",
        ));
    }
    if token.is_some_and(|t| t != seat.token) {
        return Err(DomainError::validation(
            ValidationKind::SeatTokenMismatch,
            "Seat token does not match",
        ));
    }
    seat.conn = conn;
    seat.connected = true;
    Ok((next, idx))
}

/// True when the match has players and none of them is connected.
pub fn all_disconnected(state: &MatchState) -> bool {
    let mut seated = state.occupied().peekable();
    seated.peek().is_some() && seated.all(|(_, seat)| !seat.connected)
}
