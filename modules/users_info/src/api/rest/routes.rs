use axum::{
    routing::{delete, get, post, put},
    Extension, Router,
};
use std::sync::Arc;

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Mount the `/api/users` routes and attach the service they share.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        .route("/api/users", get(handlers::list_users))
        .route("/api/users/add", post(handlers::add_user))
        .route("/api/users/update", put(handlers::update_user))
        .route("/api/users/delete/{id}", delete(handlers::delete_user))
        .route("/api/users/{id}", get(handlers::get_user))
        .layer(Extension(service))
}
