use utoipa::OpenApi;

use crate::api::rest::{dto, handlers};

/// OpenAPI document for the `/api/users` routes.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_users,
        handlers::get_user,
        handlers::add_user,
        handlers::update_user,
        handlers::delete_user
    ),
    components(schemas(
        dto::UserDto,
        dto::CreateUserReq,
        dto::UpdateUserReq,
        dto::ErrorDto,
        dto::StatusDto,
        dto::EmptyDto,
        dto::UserReplyDto
    )),
    tags((name = "users", description = "User records"))
)]
pub struct UsersApiDoc;
