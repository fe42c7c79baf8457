use std::sync::Arc;

use axum::{body::Bytes, extract::Path, response::Json, Extension};
use serde_json::Value;
use tracing::{debug, info};

use crate::api::rest::dto::{
    new_user_from_json, path_id, user_update_from_json, CreateUserReq, EmptyDto, ErrorDto,
    StatusDto, UpdateBody, UpdateUserReq, UserDto, UserReplyDto,
};
use crate::api::rest::error::ApiError;
use crate::contract::model::UserReply;
use crate::domain::service::Service;

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses((status = 200, description = "All users, empty on failure", body = [UserDto]))
)]
pub async fn list_users(Extension(svc): Extension<Arc<Service>>) -> Json<Vec<UserDto>> {
    info!("Listing users");

    let users = svc.list_users().await;
    Json(users.into_iter().map(UserDto::from).collect())
}

/// Get a specific user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses((status = 200, description = "The user or an error sentinel", body = UserReplyDto))
)]
pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> Json<UserReplyDto> {
    info!("Getting user with id: {}", id);

    // Anything but plain digits cannot match a row.
    let reply = match path_id(&id) {
        Some(id) => svc.get_user(id).await,
        None => UserReply::NotFound,
    };
    Json(reply.into())
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/users/add",
    tag = "users",
    request_body = CreateUserReq,
    responses(
        (status = 200, description = "The created user, or {} if the insert failed", body = UserReplyDto),
        (status = 400, description = "A required key is absent", body = ErrorDto),
        (status = 500, description = "The body is not JSON", body = ErrorDto)
    )
)]
pub async fn add_user(
    Extension(svc): Extension<Arc<Service>>,
    body: Bytes,
) -> Result<Json<UserReplyDto>, ApiError> {
    let body: Value =
        serde_json::from_slice(&body).map_err(|e| ApiError::BadBody(e.to_string()))?;
    let new_user = new_user_from_json(&body).ok_or(ApiError::MissingFields)?;

    info!("Creating user");
    Ok(Json(svc.add_user(new_user).await.into()))
}

/// Replace all fields of a user
#[utoipa::path(
    put,
    path = "/api/users/update",
    tag = "users",
    request_body = UpdateUserReq,
    responses((status = 200, description = "The user as re-read, an error sentinel, or {}", body = UserReplyDto))
)]
pub async fn update_user(Extension(svc): Extension<Arc<Service>>, body: Bytes) -> Json<UserReplyDto> {
    let update = serde_json::from_slice::<Value>(&body)
        .ok()
        .as_ref()
        .and_then(user_update_from_json);

    match update {
        Some(UpdateBody::Replace(update)) => {
            info!("Updating user {}", update.user_id);
            Json(svc.update_user(update).await.into())
        }
        Some(UpdateBody::NoMatchingRow) => {
            debug!("Update id cannot match any row");
            Json(UserReply::NotFound.into())
        }
        None => {
            debug!("Update body unusable, answering with an empty record");
            Json(UserReplyDto::Empty(EmptyDto::default()))
        }
    }
}

/// Delete a user by ID
#[utoipa::path(
    delete,
    path = "/api/users/delete/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Delete status", body = StatusDto),
        (status = 404, description = "The id is not a non-negative integer", body = ErrorDto)
    )
)]
pub async fn delete_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> Result<Json<StatusDto>, ApiError> {
    let id = path_id(&id).ok_or(ApiError::NotFound)?;
    info!("Deleting user: {}", id);

    Ok(Json(svc.delete_user(id).await.into()))
}
