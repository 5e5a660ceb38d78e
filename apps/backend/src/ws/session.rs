use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{info, warn};
use uuid::Uuid;

use crate::state::app_state::AppState;
use crate::ws::hub::{Broadcaster, Outbound};
use crate::ws::protocol::ClientMessage;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = WsSession::new(app_state);
    ws::start(session, &req, stream)
}

struct Registration {
    game_id: Uuid,
    player_id: Uuid,
    token: Uuid,
}

pub struct WsSession {
    conn_id: Uuid,
    app_state: web::Data<AppState>,
    last_heartbeat: Instant,
    registration: Option<Registration>,
}

impl WsSession {
    fn new(app_state: web::Data<AppState>) -> Self {
        Self {
            conn_id: Uuid::new_v4(),
            app_state,
            last_heartbeat: Instant::now(),
            registration: None,
        }
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

    fn register_client(
        &mut self,
        game_id: Uuid,
        player_id: Uuid,
        ctx: &mut ws::WebsocketContext<Self>,
    ) {
        let hub = self.app_state.hub.clone();

        // A session speaks for one registration at a time.
        if let Some(previous) = self.registration.take() {
            hub.unregister(previous.game_id, previous.token);
        }

        let token = hub.register(game_id, player_id, ctx.address().recipient());
        self.registration = Some(Registration {
            game_id,
            player_id,
            token,
        });

        info!(
            conn_id = %self.conn_id,
            game_id = %game_id,
            player_id = %player_id,
            "[WS SESSION] client registered"
        );

        let game_flow = self.app_state.game_flow.clone();
        ctx.spawn(
            async move { game_flow.client_registered(game_id, player_id).await }
                .into_actor(self)
                .map(move |res, actor, _ctx| {
                    if let Err(err) = res {
                        warn!(
                            conn_id = %actor.conn_id,
                            game_id = %game_id,
                            player_id = %player_id,
                            error = %err,
                            "[WS SESSION] registration sync failed"
                        );
                    }
                }),
        );
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] started");
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(registration) = self.registration.take() {
            self.app_state
                .hub
                .unregister(registration.game_id, registration.token);
        }
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

                match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(ClientMessage::RegisterClient { game_id, player_id }) => {
                        self.register_client(game_id, player_id, ctx);
                    }
                    Err(err) => {
                        // Unparseable frames are dropped; the socket stays open.
                        warn!(
                            conn_id = %self.conn_id,
                            error = %err,
                            "[WS SESSION] ignoring malformed message"
                        );
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                warn!(conn_id = %self.conn_id, "[WS SESSION] ignoring binary frame");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Nop) => {
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

    fn handle(&mut self, msg: Outbound, ctx: &mut Self::Context) {
        match serde_json::to_string(&msg.0) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(
                conn_id = %self.conn_id,
                error = %err,
                "[WS SESSION] failed to serialize outbound message"
            ),
        }
    }
}
