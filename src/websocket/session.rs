use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use crate::websocket::keepalive;
use crate::websocket::message_types::{CommandFrame, WsOutboundEvent};
use crate::websocket::registry::ConnectionHandle;

#[derive(Debug, Deserialize)]
pub struct WsParams {
    pub token: Option<String>,
}

async fn authenticate(
    state: &AppState,
    params: &WsParams,
    headers: &HeaderMap,
) -> Result<Uuid, StatusCode> {
    let token = params.token.clone().or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.to_string())
    });

    let Some(token) = token else {
        warn!("websocket rejected: no token provided");
        return Err(StatusCode::UNAUTHORIZED);
    };

    state.auth.authenticate(&token).await.map_err(|err| {
        warn!(error = %err, "websocket rejected: authentication failed");
        StatusCode::UNAUTHORIZED
    })
}

/// Upgrade endpoint for `/ws`. Authenticates first, then hands the
/// socket to the per-connection session.
pub async fn ws_handler(
    State(state): State<AppState>,
    Query(params): Query<WsParams>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Response {
    match authenticate(&state, &params, &headers).await {
        Ok(user_id) => ws
            .on_upgrade(move |socket| handle_socket(state, user_id, socket))
            .into_response(),
        Err(status) => status.into_response(),
    }
}

/// Runs one connection: writer task, registry entry, keepalive, and the
/// read loop that feeds the command router. Teardown removes the
/// registry entry and stops the keepalive task on every exit path.
async fn handle_socket(state: AppState, user_id: Uuid, socket: WebSocket) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

    // Single writer per connection: every frame for this socket funnels
    // through this task, so notifier writes never interleave.
    let writer = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            let closing = matches!(frame, Message::Close(_));
            if sink.send(frame).await.is_err() || closing {
                break;
            }
        }
        let _ = sink.close().await;
    });

    let handle = ConnectionHandle::new(tx);
    state.registry.add(user_id, handle.clone()).await;
    debug!(%user_id, "websocket connected");

    let heartbeat = keepalive::spawn(
        state.registry.clone(),
        user_id,
        handle.clone(),
        state.config.heartbeat_interval,
    );

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => handle_text_frame(&state, user_id, &handle, &text).await,
            // Pings are answered by axum; pongs carry no state here.
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {}
            Ok(Message::Binary(_)) => {
                send_error(
                    &handle,
                    &AppError::BadRequest("binary frames are not supported".into()),
                );
            }
            Ok(Message::Close(_)) => break,
            Err(err) => {
                debug!(%user_id, error = %err, "websocket transport error");
                break;
            }
        }
    }

    // Compare-and-remove: a reconnect may have replaced this session's
    // entry, and its connection must stay up.
    state.registry.remove_if_same(user_id, &handle).await;
    heartbeat.abort();
    handle.close();
    let _ = writer.await;
    debug!(%user_id, "websocket disconnected");
}

/// Decodes one inbound frame and dispatches it. Protocol and command
/// errors are logged and answered on the connection; they never end the
/// read loop.
async fn handle_text_frame(state: &AppState, user_id: Uuid, handle: &ConnectionHandle, text: &str) {
    let frame: CommandFrame = match serde_json::from_str(text) {
        Ok(frame) => frame,
        Err(err) => {
            warn!(%user_id, error = %err, "malformed inbound frame");
            send_error(handle, &AppError::Payload(err));
            return;
        }
    };

    if let Err(err) = state.router.dispatch(user_id, &frame.tag, frame.payload).await {
        warn!(%user_id, command = %frame.tag, error = %err, "command failed");
        send_error(handle, &err);
    }
}

fn send_error(handle: &ConnectionHandle, err: &AppError) {
    let event = WsOutboundEvent::Error {
        code: err.code().to_string(),
        message: err.to_string(),
    };
    if let Ok(frame) = event.to_json() {
        // The connection may already be gone; nothing left to report to.
        let _ = handle.send_text(frame);
    }
}
