use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use crate::api::rest::dto::ErrorDto;
use crate::contract::model::USER_NOT_FOUND;

/// Failures answered at the transport boundary, before or instead of the store.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An add request lacked one of the five field keys.
    #[error("Missing required fields")]
    MissingFields,

    /// The path id cannot name any row.
    #[error("{}", USER_NOT_FOUND)]
    NotFound,

    /// The request body could not be read as JSON.
    #[error("{0}")]
    BadBody(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadBody(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if matches!(self, Self::BadBody(_)) {
            tracing::error!("Request rejected: {}", self);
        }
        let body = ErrorDto {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
