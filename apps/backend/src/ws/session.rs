use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpMessage, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{debug, info, warn};

use crate::errors::ErrorCode;
use crate::game::ids::ConnId;
use crate::game::lobby::{ClientCommand, Connect, Disconnect, Lobby};
use crate::game::transport::Outbound;
use crate::middleware::request_trace::RequestId;
use crate::state::app_state::AppState;
use crate::ws::hub::WsHub;
use crate::ws::protocol::{ClientMsg, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let request_id = req.extensions().get::<RequestId>().map(|id| id.0.clone());
    let session = WsSession::new(
        ConnId::new(),
        request_id,
        app_state.lobby.clone(),
        app_state.hub.clone(),
    );
    ws::start(session, &req, stream)
}

pub struct WsSession {
    conn_id: ConnId,
    /// Id of the upgrade request, when `RequestTrace` is mounted.
    request_id: Option<String>,
    lobby: Addr<Lobby>,
    hub: Arc<WsHub>,
    last_heartbeat: Instant,
}

impl WsSession {
    fn new(
        conn_id: ConnId,
        request_id: Option<String>,
        lobby: Addr<Lobby>,
        hub: Arc<WsHub>,
    ) -> Self {
        Self {
            conn_id,
            request_id,
            lobby,
            hub,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
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

    fn handle_text(&mut self, text: &str, ctx: &mut ws::WebsocketContext<Self>) {
        match ClientMsg::parse(text) {
            Ok(msg) => self.lobby.do_send(ClientCommand {
                conn: self.conn_id,
                msg,
            }),
            Err(err) => {
                debug!(conn_id = %self.conn_id, error = %err, "[WS SESSION] rejected frame");
                Self::send_json(ctx, &ServerMsg::from(&err));
            }
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            conn_id = %self.conn_id,
            request_id = self.request_id.as_deref().unwrap_or("unknown"),
            "[WS SESSION] started"
        );
        self.hub
            .register(self.conn_id, ctx.address().recipient::<Outbound>());
        self.lobby.do_send(Connect {
            conn: self.conn_id,
        });
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.hub.unregister(self.conn_id);
        self.lobby.do_send(Disconnect {
            conn: self.conn_id,
        });
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
                self.handle_text(&text, ctx);
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                let err =
                    ServerMsg::error(ErrorCode::BinaryNotSupported, "Binary frames are not supported");
                Self::send_json(ctx, &err);
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

impl Handler<Outbound> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: Outbound, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}
