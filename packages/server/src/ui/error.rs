//! Problem-details error responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    domain::RepositoryError,
    infrastructure::{auth::AuthError, dto::http::ProblemDetails},
    usecase::{ChatLookupError, CreateChatError, MessageQueryError, ParticipantError},
};

/// Error returned by HTTP handlers, rendered as `application/problem+json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    error_code: &'static str,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error_code: &'static str, detail: impl Into<String>) -> Self {
        Self {
            status,
            error_code,
            detail: detail.into(),
        }
    }

    pub fn bad_request(error_code: &'static str, detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_code, detail)
    }

    pub fn not_found(error_code: &'static str, detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error_code, detail)
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "AuthenticationFailure", detail)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn error_code(&self) -> &'static str {
        self.error_code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ProblemDetails {
            title: self
                .status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            error_code: self.error_code.to_string(),
            detail: self.detail,
        };
        (
            self.status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(body),
        )
            .into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Conflict(detail) => {
                ApiError::new(StatusCode::CONFLICT, "Conflict", detail)
            }
            other => {
                tracing::error!("Storage failure: {}", other);
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalServerError",
                    "an internal error occurred",
                )
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request("InvalidJSON", rejection.body_text())
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        ApiError::unauthorized(e.to_string())
    }
}

impl From<CreateChatError> for ApiError {
    fn from(e: CreateChatError) -> Self {
        match e {
            CreateChatError::InvalidChatType(_) | CreateChatError::InvalidConfiguration(_) => {
                ApiError::bad_request("InvalidChatConfiguration", e.to_string())
            }
            CreateChatError::InvalidParticipant(_) => {
                ApiError::bad_request("InvalidParticipantData", e.to_string())
            }
            CreateChatError::Repository(e) => e.into(),
        }
    }
}

impl From<ChatLookupError> for ApiError {
    fn from(e: ChatLookupError) -> Self {
        match e {
            ChatLookupError::NotFound(_) => ApiError::not_found("ChatNotFound", e.to_string()),
            ChatLookupError::Repository(e) => e.into(),
        }
    }
}

impl From<ParticipantError> for ApiError {
    fn from(e: ParticipantError) -> Self {
        match e {
            ParticipantError::ChatNotFound(_) => ApiError::not_found("ChatNotFound", e.to_string()),
            ParticipantError::MissingUserId => {
                ApiError::bad_request("MissingUserId", e.to_string())
            }
            ParticipantError::InvalidData(_) => {
                ApiError::bad_request("InvalidParticipantData", e.to_string())
            }
            ParticipantError::AlreadyParticipant(_) => {
                ApiError::new(StatusCode::CONFLICT, "UserAlreadyParticipant", e.to_string())
            }
            ParticipantError::Repository(e) => e.into(),
        }
    }
}

impl From<MessageQueryError> for ApiError {
    fn from(e: MessageQueryError) -> Self {
        match e {
            MessageQueryError::ChatNotFound(_) => {
                ApiError::not_found("ChatNotFound", e.to_string())
            }
            MessageQueryError::MissingUserIds => {
                ApiError::bad_request("MissingUserIds", e.to_string())
            }
            MessageQueryError::InvalidUserId(_) | MessageQueryError::TooManyUserIds { .. } => {
                ApiError::bad_request("InvalidUserId", e.to_string())
            }
            MessageQueryError::MessageNotFound(_) => {
                ApiError::not_found("MessageNotFound", e.to_string())
            }
            MessageQueryError::Repository(e) => e.into(),
        }
    }
}
