//! WebSocket session handlers.
//!
//! One session = one read task (inbound frames → broadcast pipeline) and one
//! write task (registry channel → socket).

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        Path, Query, State,
        ws::{CloseFrame, Message as WsMessage, WebSocket, WebSocketUpgrade, close_code},
    },
    response::Response,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::{mpsc, oneshot};

use super::{chat_id_from_path, group_ref_from_path};
use crate::{
    domain::{ChatId, ChatTarget},
    infrastructure::{
        auth::Claims,
        dto::websocket::{ConnectQuery, InboundMessage},
        realtime::SessionHandle,
    },
    ui::{
        error::ApiError,
        session::{SessionLifecycle, SessionState},
        state::AppState,
    },
    usecase::{ChatLookupError, GetChatUseCase, SendMessageUseCase},
};

/// Close code sent when the requested chat does not exist.
pub const CLOSE_CHAT_NOT_FOUND: u16 = 4404;

/// How long the writer may take to flush its close frame.
const WRITER_GRACE: Duration = Duration::from_secs(1);

/// Why a read loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEnd {
    PeerClosed,
    IdleTimeout,
    Malformed,
    ReadError,
}

impl SessionEnd {
    fn close_frame(self) -> Option<CloseFrame> {
        match self {
            SessionEnd::PeerClosed | SessionEnd::ReadError => None,
            SessionEnd::IdleTimeout => Some(CloseFrame {
                code: close_code::NORMAL,
                reason: "idle timeout".into(),
            }),
            SessionEnd::Malformed => Some(CloseFrame {
                code: close_code::INVALID,
                reason: "malformed message".into(),
            }),
        }
    }
}

/// `GET /api/chats/{chat_id}/ws`
pub async fn chat_websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<String>,
    Query(query): Query<ConnectQuery>,
) -> Result<Response, ApiError> {
    let target = ChatTarget::ById(chat_id_from_path(chat_id)?);
    upgrade(ws, state, target, query)
}

/// `GET /api/user-groups/{group_id}/ws`
pub async fn group_websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(group_id): Path<String>,
    Query(query): Query<ConnectQuery>,
) -> Result<Response, ApiError> {
    let target = ChatTarget::ByGroupRef(group_ref_from_path(&group_id)?);
    upgrade(ws, state, target, query)
}

fn upgrade(
    ws: WebSocketUpgrade,
    state: Arc<AppState>,
    target: ChatTarget,
    query: ConnectQuery,
) -> Result<Response, ApiError> {
    let mut lifecycle = SessionLifecycle::new(target.to_string());
    lifecycle.advance(SessionState::Authenticating);

    let claims = match authenticate(&state, query.token.as_deref()) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!(target_chat = %target, "Rejected WebSocket connection: {:?}", e);
            lifecycle.advance(SessionState::Closed);
            return Err(e);
        }
    };

    lifecycle.advance(SessionState::Upgrading);
    // Exactly one of the two callbacks runs.
    let failed_lifecycle = lifecycle.clone();
    Ok(ws
        .on_failed_upgrade(move |e: axum::Error| {
            upgrade_failed(failed_lifecycle, &e);
        })
        .on_upgrade(move |socket| run_session(socket, state, target, claims, lifecycle)))
}

fn upgrade_failed(mut lifecycle: SessionLifecycle, error: &axum::Error) -> SessionLifecycle {
    tracing::warn!("WebSocket upgrade failed: {}", error);
    lifecycle.advance(SessionState::Closed);
    lifecycle
}

/// Check the connection token against the configured policy.
fn authenticate(state: &AppState, token: Option<&str>) -> Result<Option<Claims>, ApiError> {
    let token = token.filter(|t| !t.is_empty());
    match (token, &state.jwt) {
        (None, _) if state.session.require_auth => Err(ApiError::unauthorized("missing token")),
        (None, _) => Ok(None),
        (Some(token), Some(validator)) => Ok(Some(validator.verify(token)?)),
        (Some(_), None) => Err(ApiError::unauthorized(
            "token validation is not configured",
        )),
    }
}

async fn run_session(
    socket: WebSocket,
    state: Arc<AppState>,
    target: ChatTarget,
    claims: Option<Claims>,
    mut lifecycle: SessionLifecycle,
) {
    let (mut sink, stream) = socket.split();

    let chat = match GetChatUseCase::new(state.chats.clone())
        .execute(target.clone())
        .await
    {
        Ok(chat) => chat,
        Err(e) => {
            let frame = match &e {
                ChatLookupError::NotFound(_) => {
                    tracing::warn!(target_chat = %target, "Chat not found, closing session");
                    CloseFrame {
                        code: CLOSE_CHAT_NOT_FOUND,
                        reason: "chat not found".into(),
                    }
                }
                ChatLookupError::Repository(cause) => {
                    tracing::error!(target_chat = %target, "Failed to resolve chat: {}", cause);
                    CloseFrame {
                        code: close_code::ERROR,
                        reason: "internal error".into(),
                    }
                }
            };
            let _ = sink.send(WsMessage::Close(Some(frame))).await;
            lifecycle.advance(SessionState::Closed);
            return;
        }
    };

    let chat_id = chat.id().clone();
    let (tx, rx) = mpsc::channel(state.session.outbound_capacity.max(1));
    let handle = SessionHandle::new(chat_id.clone(), tx);
    let session_id = handle.id;
    state.registry.add(handle).await;
    lifecycle.advance(SessionState::Active);
    tracing::info!(session_id = %session_id, chat_id = %chat_id, "Session joined chat");

    let (close_tx, close_rx) = oneshot::channel();
    let mut send_task = tokio::spawn(write_loop(sink, rx, close_rx));

    let authenticated_sender = claims.and_then(|c| c.sub).filter(|sub| !sub.is_empty());
    let send_usecase = SendMessageUseCase::new(state.publisher.clone());
    let idle_timeout = state.session.idle_timeout;
    let mut recv_task = tokio::spawn(async move {
        read_loop(stream, send_usecase, chat_id, authenticated_sender, idle_timeout).await
    });

    // If any one of the tasks completes, wind down the other
    let writer_done = tokio::select! {
        end = &mut recv_task => {
            let end = end.unwrap_or(SessionEnd::ReadError);
            tracing::info!(session_id = %session_id, "Read loop ended: {:?}", end);
            if let Some(frame) = end.close_frame() {
                let _ = close_tx.send(frame);
            }
            false
        }
        _ = &mut send_task => {
            recv_task.abort();
            true
        }
    };

    lifecycle.advance(SessionState::Closing);
    state.registry.remove(&session_id).await;

    // Dropping the registry entry closes the writer's channel.
    if !writer_done && tokio::time::timeout(WRITER_GRACE, &mut send_task).await.is_err() {
        send_task.abort();
    }

    lifecycle.advance(SessionState::Closed);
    tracing::info!(session_id = %session_id, "Session closed");
}

async fn read_loop(
    mut stream: SplitStream<WebSocket>,
    send_usecase: SendMessageUseCase,
    chat_id: ChatId,
    authenticated_sender: Option<String>,
    idle_timeout: Duration,
) -> SessionEnd {
    loop {
        let next = match tokio::time::timeout(idle_timeout, stream.next()).await {
            Ok(next) => next,
            Err(_) => {
                tracing::info!(chat_id = %chat_id, "Session idle for {:?}, closing", idle_timeout);
                return SessionEnd::IdleTimeout;
            }
        };

        let frame = match next {
            None => return SessionEnd::PeerClosed,
            Some(Err(e)) => {
                tracing::warn!(chat_id = %chat_id, "WebSocket error: {}", e);
                return SessionEnd::ReadError;
            }
            Some(Ok(frame)) => frame,
        };

        let inbound = match frame {
            WsMessage::Text(text) => serde_json::from_str::<InboundMessage>(text.as_str()),
            WsMessage::Binary(bytes) => serde_json::from_slice::<InboundMessage>(&bytes),
            WsMessage::Close(_) => {
                tracing::debug!(chat_id = %chat_id, "Client requested close");
                return SessionEnd::PeerClosed;
            }
            // Ping/pong is handled automatically by the WebSocket protocol
            WsMessage::Ping(_) | WsMessage::Pong(_) => continue,
        };

        let inbound = match inbound {
            Ok(inbound) => inbound,
            Err(e) => {
                tracing::warn!(chat_id = %chat_id, "Failed to parse message as JSON: {}", e);
                return SessionEnd::Malformed;
            }
        };

        let sender_id = authenticated_sender.clone().or(inbound.sender_id);
        match send_usecase.execute(&chat_id, sender_id, inbound.content).await {
            Ok(true) => {}
            Ok(false) => tracing::debug!(chat_id = %chat_id, "Message dropped by pipeline"),
            Err(e) => tracing::warn!(chat_id = %chat_id, "Skipping inbound message: {}", e),
        }
    }
}

async fn write_loop(
    mut sink: SplitSink<WebSocket, WsMessage>,
    mut rx: mpsc::Receiver<String>,
    mut close_rx: oneshot::Receiver<CloseFrame>,
) {
    loop {
        tokio::select! {
            payload = rx.recv() => match payload {
                Some(payload) => {
                    if sink.send(WsMessage::Text(payload.into())).await.is_err() {
                        return;
                    }
                }
                None => break,
            },
            frame = &mut close_rx => {
                let _ = sink.send(WsMessage::Close(frame.ok())).await;
                return;
            }
        }
    }
    let _ = sink.send(WsMessage::Close(None)).await;
}
