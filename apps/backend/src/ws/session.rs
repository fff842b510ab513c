use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{MatchId, PlayerId};
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;
use crate::ws::hub::{Outbound, WsRegistry};
use crate::ws::protocol::{ClientMsg, ServerMsg};
use crate::AppError;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let conn_id = Uuid::new_v4();
    let registry = app_state.websocket_registry();
    let session = WsSession::new(conn_id, app_state, registry);
    ws::start(session, &req, stream)
}

pub struct WsSession {
    conn_id: Uuid,
    app_state: web::Data<AppState>,
    registry: Arc<WsRegistry>,

    /// Set by a successful `join`; every other message needs it.
    binding: Option<(MatchId, PlayerId)>,

    last_heartbeat: Instant,
}

impl WsSession {
    fn new(conn_id: Uuid, app_state: web::Data<AppState>, registry: Arc<WsRegistry>) -> Self {
        Self {
            conn_id,
            app_state,
            registry,
            binding: None,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    /// Reject on this socket only; the connection stays open.
    fn reject(ctx: &mut ws::WebsocketContext<Self>, code: ErrorCode, message: impl Into<String>) {
        Self::send_json(ctx, &ServerMsg::rejected(code, message));
    }

    fn reject_app_error(ctx: &mut ws::WebsocketContext<Self>, err: &AppError) {
        Self::reject(ctx, err.code(), err.detail());
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn handle_join(
        &mut self,
        ctx: &mut ws::WebsocketContext<Self>,
        match_id: String,
        player_id: String,
        name: String,
    ) {
        if self.binding.is_some() {
            Self::reject(ctx, ErrorCode::BadRequest, "Connection already joined a match");
            return;
        }
        let name = if name.trim().is_empty() {
            player_id.clone()
        } else {
            name
        };

        if let Err(err) = self.app_state.game_flow().join(&match_id, &player_id, &name) {
            Self::reject_app_error(ctx, &err);
            return;
        }
        info!(
            conn_id = %self.conn_id,
            match_id = %match_id,
            player_id = %player_id,
            "[WS SESSION] joined"
        );

        // Only an accepted join may receive this seat's private view.
        let recipient = ctx.address().recipient::<Outbound>();
        self.registry
            .register(&match_id, &player_id, self.conn_id, recipient);
        Self::send_json(ctx, &ServerMsg::Ack { message: "joined" });

        // Queued behind anything dispatched since the join, so it is the freshest view.
        if let Err(err) = self.app_state.game_flow().send_snapshot(&match_id, &player_id) {
            warn!(conn_id = %self.conn_id, error = %err, "[WS SESSION] join snapshot failed");
        }
        self.binding = Some((match_id, player_id));
    }

    fn handle_action(&mut self, ctx: &mut ws::WebsocketContext<Self>, cmd: ClientMsg) {
        let Some((match_id, player_id)) = self.binding.clone() else {
            Self::reject(ctx, ErrorCode::BadRequest, "Must join a match first");
            return;
        };
        let action = match cmd.into_action() {
            Ok(action) => action,
            Err(err) => {
                Self::reject_app_error(ctx, &err.into());
                return;
            }
        };
        if let Err(err) = self
            .app_state
            .game_flow()
            .submit(&match_id, &player_id, action)
        {
            Self::reject_app_error(ctx, &err);
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] started");
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.registry.unregister(self.conn_id);
        info!(conn_id = %self.conn_id, "[WS SESSION] stopped");
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

                let parsed: Result<ClientMsg, _> = serde_json::from_str(&text);
                let cmd = match parsed {
                    Ok(cmd) => cmd,
                    Err(err) => {
                        warn!(conn_id = %self.conn_id, error = %err, "[WS SESSION] malformed message");
                        Self::reject(ctx, ErrorCode::BadRequest, "Malformed JSON");
                        return;
                    }
                };

                match cmd {
                    ClientMsg::Join {
                        match_id,
                        player_id,
                        name,
                    } => self.handle_join(ctx, match_id, player_id, name),
                    other => self.handle_action(ctx, other),
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                Self::reject(ctx, ErrorCode::BadRequest, "Binary not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<Outbound> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: Outbound, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}
