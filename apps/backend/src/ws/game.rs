//! Maps one decoded client intent onto the registry and builds the reply for
//! the originating connection. Snapshots for everyone in the match are fanned
//! out by the registry itself.

use crate::domain::ConnectionId;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::services::registry::MatchRegistry;
use crate::ws::protocol::{ClientMsg, ServerMsg};

pub fn dispatch(
    registry: &MatchRegistry,
    conn: ConnectionId,
    msg: ClientMsg,
) -> Result<ServerMsg, AppError> {
    let reply = match msg {
        ClientMsg::Hello { .. } => {
            return Err(AppError::bad_request(
                ErrorCode::BadRequest,
                "Handshake already completed",
            ))
        }
        ClientMsg::CreateMatch { mode } => {
            let match_id = registry.create_match(conn, mode)?;
            ServerMsg::MatchCreated { match_id, mode }
        }
        ClientMsg::ListMatches => ServerMsg::Lobby {
            matches: registry.list_matches(),
        },
        ClientMsg::Join {
            match_id,
            display_name,
        } => {
            let receipt = registry.join(conn, &match_id, &display_name)?;
            ServerMsg::Joined {
                match_id,
                seat: receipt.seat,
                team: receipt.team,
                seat_token: receipt.token,
            }
        }
        ClientMsg::Leave { match_id } => {
            registry.leave(conn, &match_id)?;
            ServerMsg::ack("left")
        }
        ClientMsg::MarkReady { match_id } => {
            registry.mark_ready(conn, &match_id)?;
            ServerMsg::ack("ready")
        }
        ClientMsg::StartMatch { match_id } => {
            registry.start_match(conn, &match_id)?;
            ServerMsg::ack("started")
        }
        ClientMsg::PlayCard { match_id, card } => {
            registry.play_card(conn, &match_id, card)?;
            ServerMsg::ack("played")
        }
        ClientMsg::RequestStakeIncrease { match_id } => {
            registry.request_truco(conn, &match_id)?;
            ServerMsg::ack("truco_requested")
        }
        ClientMsg::AcceptStakeIncrease { match_id } => {
            registry.accept_truco(conn, &match_id)?;
            ServerMsg::ack("truco_accepted")
        }
        ClientMsg::DeclineStakeIncrease { match_id } => {
            registry.decline_truco(conn, &match_id)?;
            ServerMsg::ack("truco_declined")
        }
        ClientMsg::StartNextRound { match_id } => {
            registry.start_next_round(conn, &match_id)?;
            ServerMsg::ack("round_started")
        }
        ClientMsg::Rematch { match_id } => {
            registry.rematch(conn, &match_id)?;
            ServerMsg::ack("rematch")
        }
        ClientMsg::Reconnect {
            match_id,
            display_name,
            seat_token,
        } => {
            let seat = registry.reconnect(conn, &match_id, &display_name, seat_token)?;
            ServerMsg::Reconnected { match_id, seat }
        }
    };
    Ok(reply)
}

/// Rejection reply for the originating connection.
pub fn error_reply(err: &AppError) -> ServerMsg {
    ServerMsg::Error {
        code: err.code(),
        message: err.detail(),
    }
}
