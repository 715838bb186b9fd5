//! Chat and participant endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use super::{chat_id_from_path, group_ref_from_path};
use crate::{
    infrastructure::dto::http::{
        AddParticipantRequest, ChatDto, CreateChatRequest, DataEnvelope, ParticipantDto,
    },
    ui::{error::ApiError, state::AppState},
    usecase::{
        CreateChatUseCase, DeleteChatUseCase, GetChatUseCase, ManageParticipantsUseCase, NewChat,
        NewParticipant,
    },
};

/// `POST /api/chats`
pub async fn create_chat(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateChatRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ChatDto>), ApiError> {
    let Json(request) = body?;
    let chat = CreateChatUseCase::new(state.chats.clone())
        .execute(NewChat {
            chat_type: request.chat_type,
            group_ref: request.usergroup_id,
            container_ref: request.container_id,
            creator: request.user_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(ChatDto::from(&chat))))
}

/// `GET /api/chats/{chat_id}`
pub async fn get_chat(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<String>,
) -> Result<Json<ChatDto>, ApiError> {
    let chat = GetChatUseCase::new(state.chats.clone())
        .by_id(chat_id_from_path(chat_id)?)
        .await?;
    Ok(Json(ChatDto::from(&chat)))
}

/// `GET /api/user-groups/{group_id}/chat`
pub async fn get_group_chat(
    State(state): State<Arc<AppState>>,
    Path(group_id): Path<String>,
) -> Result<Json<ChatDto>, ApiError> {
    let chat = GetChatUseCase::new(state.chats.clone())
        .by_group_ref(group_ref_from_path(&group_id)?)
        .await?;
    Ok(Json(ChatDto::from(&chat)))
}

/// `DELETE /api/chats/{chat_id}`
pub async fn delete_chat(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    DeleteChatUseCase::new(state.chats.clone())
        .execute(chat_id_from_path(chat_id)?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/chats/{chat_id}/chat-participants`
pub async fn list_participants(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<String>,
) -> Result<Json<DataEnvelope<ParticipantDto>>, ApiError> {
    let chat_id = chat_id_from_path(chat_id)?;
    let participants = ManageParticipantsUseCase::new(state.chats.clone())
        .list(&chat_id)
        .await?;
    let data: Vec<ParticipantDto> = participants.iter().map(ParticipantDto::from).collect();
    Ok(Json(DataEnvelope::from(data)))
}

/// `POST /api/chats/{chat_id}/chat-participants`
pub async fn add_participant(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<String>,
    body: Result<Json<AddParticipantRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ParticipantDto>), ApiError> {
    let chat_id = chat_id_from_path(chat_id)?;
    let Json(request) = body?;
    let participant = ManageParticipantsUseCase::new(state.chats.clone())
        .add(
            &chat_id,
            NewParticipant {
                user_id: request.user_id,
                role: request.role,
                status: request.status,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ParticipantDto::from(&participant))))
}

/// `DELETE /api/chats/{chat_id}/chat-participants/{user_id}`
pub async fn remove_participant(
    State(state): State<Arc<AppState>>,
    Path((chat_id, user_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let chat_id = chat_id_from_path(chat_id)?;
    ManageParticipantsUseCase::new(state.chats.clone())
        .remove(&chat_id, user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
