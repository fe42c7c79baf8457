use axum::{http::Uri, response::Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppError;

pub const WELCOME: &str = "Welcome to the Users API!";

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    /// RFC 3339, UTC
    pub timestamp: String,
}

/// Plain-text greeting
#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses((status = 200, description = "Greeting", body = String, content_type = "text/plain"))
)]
pub async fn home() -> &'static str {
    WELCOME
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    tag = "service",
    responses((status = 200, description = "Service is up", body = HealthStatus))
)]
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
