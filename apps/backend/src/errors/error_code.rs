//! Error codes for the Truco backend API.
//!
//! Every code sent to a client (websocket rejection or HTTP problem body)
//! comes from this enum. Add new codes here; never pass ad-hoc strings.
//!
//! All error codes are SCREAMING_SNAKE_CASE on the wire.

use core::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Request shape
    /// Message could not be decoded into an intent
    BadRequest,
    /// Client spoke an unsupported protocol version
    BadProtocol,
    /// Intent sent before the hello handshake
    HandshakeRequired,

    // Match rules
    /// Intent not legal in the current phase
    PhaseMismatch,
    /// Acting seat does not hold the turn
    OutOfTurn,
    /// Card is not in the acting seat's hand
    CardNotInHand,
    /// Card token could not be parsed
    ParseCard,
    /// Not every seat is occupied
    MatchNotFull,
    /// Not every seat has marked ready
    SeatsNotReady,
    /// A stake increase is awaiting an answer
    EscalationPending,
    /// No stake increase is awaiting an answer
    NoEscalationPending,
    /// Stake is already at its maximum
    StakeAtMaximum,
    /// Requesting team cannot answer its own request
    OwnTeamResponse,
    /// Round has not reached an end condition
    RoundNotDecided,
    /// Presented seat token does not match the seat
    SeatTokenMismatch,
    /// Display name is empty or too long
    InvalidDisplayName,
    /// General validation error
    ValidationError,

    // Not found
    /// Match id is unknown
    MatchNotFound,
    /// Connection or display name holds no seat in the match
    SeatNotFound,
    /// General not found error
    NotFound,

    // Capacity and identity conflicts
    /// Every seat is taken
    MatchFull,
    /// Seats are fixed while the match is running
    MatchInProgress,
    /// Display name already used in this match
    DuplicateDisplayName,
    /// Connection already holds a seat
    AlreadySeated,
    /// Seat is still bound to a live connection
    SeatStillConnected,
    /// Generic conflict
    Conflict,

    // System
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::BadProtocol => "BAD_PROTOCOL",
            Self::HandshakeRequired => "HANDSHAKE_REQUIRED",

            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::CardNotInHand => "CARD_NOT_IN_HAND",
            Self::ParseCard => "PARSE_CARD",
            Self::MatchNotFull => "MATCH_NOT_FULL",
            Self::SeatsNotReady => "SEATS_NOT_READY",
            Self::EscalationPending => "ESCALATION_PENDING",
            Self::NoEscalationPending => "NO_ESCALATION_PENDING",
            Self::StakeAtMaximum => "STAKE_AT_MAXIMUM",
            Self::OwnTeamResponse => "OWN_TEAM_RESPONSE",
            Self::RoundNotDecided => "ROUND_NOT_DECIDED",
            Self::SeatTokenMismatch => "SEAT_TOKEN_MISMATCH",
            Self::InvalidDisplayName => "INVALID_DISPLAY_NAME",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::MatchNotFound => "MATCH_NOT_FOUND",
            Self::SeatNotFound => "SEAT_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::MatchFull => "MATCH_FULL",
            Self::MatchInProgress => "MATCH_IN_PROGRESS",
            Self::DuplicateDisplayName => "DUPLICATE_DISPLAY_NAME",
            Self::AlreadySeated => "ALREADY_SEATED",
            Self::SeatStillConnected => "SEAT_STILL_CONNECTED",
            Self::Conflict => "CONFLICT",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
