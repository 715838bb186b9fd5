//! Route table.

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use super::{handler, state::AppState};

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handler::health_check))
        .route("/api/chats", post(handler::create_chat))
        .route(
            "/api/chats/{chat_id}",
            get(handler::get_chat).delete(handler::delete_chat),
        )
        .route(
            "/api/chats/{chat_id}/chat-participants",
            get(handler::list_participants).post(handler::add_participant),
        )
        .route(
            "/api/chats/{chat_id}/chat-participants/{user_id}",
            delete(handler::remove_participant),
        )
        .route(
            "/api/chats/{chat_id}/messages",
            get(handler::list_chat_messages),
        )
        .route("/api/chats/{chat_id}/ws", get(handler::chat_websocket_handler))
        .route("/api/user-groups/{group_id}/chat", get(handler::get_group_chat))
        .route(
            "/api/user-groups/{group_id}/messages",
            get(handler::list_group_messages),
        )
        .route(
            "/api/user-groups/{group_id}/ws",
            get(handler::group_websocket_handler),
        )
        .route("/api/messages", get(handler::list_user_messages))
        .route(
            "/api/messages/{message_id}",
            delete(handler::delete_message),
        )
        .route(
            "/api/messages/{message_id}/read",
            put(handler::mark_message_read),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
