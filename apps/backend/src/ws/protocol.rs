use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::snapshot::MatchSnapshot;
use crate::domain::{Card, ConnectionId, Mode, SeatIndex, Team};
use crate::errors::ErrorCode;
use crate::services::registry::{MatchId, MatchSummary};

pub const PROTOCOL_VERSION: i32 = 1;

/// Intents a client may send. One verb per message, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    Hello {
        protocol: i32,
    },
    CreateMatch {
        mode: Mode,
    },
    ListMatches,
    Join {
        match_id: MatchId,
        display_name: String,
    },
    Leave {
        match_id: MatchId,
    },
    MarkReady {
        match_id: MatchId,
    },
    StartMatch {
        match_id: MatchId,
    },
    PlayCard {
        match_id: MatchId,
        card: Card,
    },
    RequestStakeIncrease {
        match_id: MatchId,
    },
    AcceptStakeIncrease {
        match_id: MatchId,
    },
    DeclineStakeIncrease {
        match_id: MatchId,
    },
    StartNextRound {
        match_id: MatchId,
    },
    Rematch {
        match_id: MatchId,
    },
    Reconnect {
        match_id: MatchId,
        display_name: String,
        #[serde(default)]
        seat_token: Option<Uuid>,
    },
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    HelloAck {
        protocol: i32,
        conn_id: ConnectionId,
    },

    /// Reply to an accepted intent that has no richer reply.
    Ack {
        message: String,
    },

    MatchCreated {
        match_id: MatchId,
        mode: Mode,
    },

    Joined {
        match_id: MatchId,
        seat: SeatIndex,
        team: Team,
        seat_token: Uuid,
    },

    Reconnected {
        match_id: MatchId,
        seat: SeatIndex,
    },

    Lobby {
        matches: Vec<MatchSummary>,
    },

    /// Committed snapshot, fanned out to every connected seat.
    MatchState {
        match_id: MatchId,
        version: u64,
        viewer_seat: Option<SeatIndex>,
        state: MatchSnapshot,
    },

    /// Out-of-band hint to the seat that just received the turn.
    YourTurn {
        match_id: MatchId,
        version: u64,
    },

    /// Rejection, sent to the originating connection only.
    Error {
        code: ErrorCode,
        message: String,
    },
}

impl ServerMsg {
    pub fn ack(message: impl Into<String>) -> Self {
        ServerMsg::Ack {
            message: message.into(),
        }
    }
}
