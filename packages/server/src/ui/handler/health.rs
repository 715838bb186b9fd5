//! Health check endpoint.

use axum::Json;

use crate::infrastructure::dto::http::HealthDto;

pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "active".to_string(),
        message: "Message Service server".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
