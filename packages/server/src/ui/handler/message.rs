//! Message history endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};

use super::{chat_id_from_path, group_ref_from_path, message_id_from_path};
use crate::{
    domain::Message,
    infrastructure::dto::{
        http::{MessagesEnvelope, PaginationQuery, ReadStatusRequest, UserMessagesQuery},
        websocket::MessageDto,
    },
    ui::{error::ApiError, state::AppState},
    usecase::{ListMessagesUseCase, UpdateMessageUseCase},
};

fn envelope(messages: &[Message]) -> Json<MessagesEnvelope> {
    let messages: Vec<MessageDto> = messages.iter().map(MessageDto::from).collect();
    Json(MessagesEnvelope::from(messages))
}

fn list_usecase(state: &AppState) -> ListMessagesUseCase {
    ListMessagesUseCase::new(state.chats.clone(), state.messages.clone())
}

/// `GET /api/chats/{chat_id}/messages`
pub async fn list_chat_messages(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<String>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<MessagesEnvelope>, ApiError> {
    let chat_id = chat_id_from_path(chat_id)?;
    let messages = list_usecase(&state).by_chat(&chat_id, query.page()).await?;
    Ok(envelope(&messages))
}

/// `GET /api/user-groups/{group_id}/messages`
pub async fn list_group_messages(
    State(state): State<Arc<AppState>>,
    Path(group_id): Path<String>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<MessagesEnvelope>, ApiError> {
    let group_ref = group_ref_from_path(&group_id)?;
    let messages = list_usecase(&state)
        .by_group_ref(group_ref, query.page())
        .await?;
    Ok(envelope(&messages))
}

/// `GET /api/messages?user_ids=a,b`
pub async fn list_user_messages(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserMessagesQuery>,
) -> Result<Json<MessagesEnvelope>, ApiError> {
    let messages = list_usecase(&state)
        .by_user_ids(&query.user_ids, query.pagination.page())
        .await?;
    Ok(envelope(&messages))
}

/// `PUT /api/messages/{message_id}/read`
pub async fn mark_message_read(
    State(state): State<Arc<AppState>>,
    Path(message_id): Path<String>,
    body: Result<Json<ReadStatusRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let message_id = message_id_from_path(message_id)?;
    let Json(request) = body?;
    UpdateMessageUseCase::new(state.messages.clone())
        .mark_read(&message_id, request.read_status)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/messages/{message_id}`
pub async fn delete_message(
    State(state): State<Arc<AppState>>,
    Path(message_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let message_id = message_id_from_path(message_id)?;
    UpdateMessageUseCase::new(state.messages.clone())
        .delete(&message_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
