use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::ConnectionId;
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;
use crate::ws::game;
use crate::ws::protocol::{ClientMsg, ServerMsg, PROTOCOL_VERSION};

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = WsSession::new(Uuid::new_v4(), app_state);
    ws::start(session, &req, stream)
}

/// One websocket connection. Its id is the connection identity the match
/// engine binds to a seat; closing the socket is a transport loss.
pub struct WsSession {
    conn_id: ConnectionId,
    app_state: web::Data<AppState>,

    heartbeat_interval: Duration,
    client_timeout: Duration,
    last_heartbeat: Instant,
    heartbeat_handle: Option<SpawnHandle>,

    hello_done: bool,
}

impl WsSession {
    fn new(conn_id: ConnectionId, app_state: web::Data<AppState>) -> Self {
        let heartbeat_interval = app_state.config.heartbeat_interval;
        let client_timeout = app_state.config.client_timeout;
        Self {
            conn_id,
            app_state,
            heartbeat_interval,
            client_timeout,
            last_heartbeat: Instant::now(),
            heartbeat_handle: None,
            hello_done: false,
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_error(ctx: &mut ws::WebsocketContext<Self>, code: ErrorCode, message: impl Into<String>) {
        Self::send_json(
            ctx,
            &ServerMsg::Error {
                code,
                message: message.into(),
            },
        );
    }

    fn send_error_and_close(
        &self,
        ctx: &mut ws::WebsocketContext<Self>,
        code: ErrorCode,
        message: impl Into<String>,
    ) {
        Self::send_error(ctx, code, message);
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
        ctx.stop();
    }

    fn start_heartbeat(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        let handle = ctx.run_interval(self.heartbeat_interval, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > actor.client_timeout {
                warn!(conn_id = %actor.conn_id, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
        self.heartbeat_handle = Some(handle);
    }

    fn handle_text(&mut self, text: &str, ctx: &mut ws::WebsocketContext<Self>) {
        let cmd = match serde_json::from_str::<ClientMsg>(text) {
            Ok(cmd) => cmd,
            Err(err) => {
                // Malformed intents are answered, the socket stays open.
                Self::send_error(ctx, ErrorCode::BadRequest, format!("Malformed message: {err}"));
                return;
            }
        };

        if let ClientMsg::Hello { protocol } = cmd {
            if protocol != PROTOCOL_VERSION {
                self.send_error_and_close(ctx, ErrorCode::BadProtocol, "Unsupported protocol version");
                return;
            }
            self.hello_done = true;
            Self::send_json(
                ctx,
                &ServerMsg::HelloAck {
                    protocol: PROTOCOL_VERSION,
                    conn_id: self.conn_id,
                },
            );
            return;
        }

        if !self.hello_done {
            self.send_error_and_close(ctx, ErrorCode::HandshakeRequired, "Must send hello first");
            return;
        }

        match game::dispatch(&self.app_state.registry, self.conn_id, cmd) {
            Ok(reply) => Self::send_json(ctx, &reply),
            Err(err) => Self::send_json(ctx, &game::error_reply(&err)),
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] started");

        let outbox = self.app_state.hub.register(self.conn_id);
        ctx.add_stream(UnboundedReceiverStream::new(outbox));

        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, ctx: &mut Self::Context) {
        if let Some(handle) = self.heartbeat_handle.take() {
            ctx.cancel_future(handle);
        }
        self.app_state.hub.unregister(self.conn_id);
        self.app_state.registry.disconnect(self.conn_id);
        info!(conn_id = %self.conn_id, "[WS SESSION] stopped");
    }
}

/// Messages the registry queued for this connection.
impl StreamHandler<ServerMsg> for WsSession {
    fn handle(&mut self, msg: ServerMsg, ctx: &mut Self::Context) {
        Self::send_json(ctx, &msg);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                self.handle_text(&text, ctx);
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                Self::send_error(ctx, ErrorCode::BadRequest, "Binary not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "[WS SESSION] protocol error");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}
