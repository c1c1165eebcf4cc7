use axum::{
    Json, Router,
    extract::{OriginalUri, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, put},
};
use axum_helpers::{AppError, ENTITY_HEADER, ErrorResponse, UuidPath, ValidatedJson};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{CreateUserInput, UpdateEmailInput, UpdatePasswordInput, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const USERS_PATH: &str = "/v1/users";
pub const TAG: &str = "users";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_users,
        create_user,
        get_user,
        update_email,
        update_password,
        delete_user,
    ),
    components(schemas(
        UserResponse,
        CreateUserInput,
        UpdateEmailInput,
        UpdatePasswordInput,
        ErrorResponse
    )),
    tags((name = TAG, description = "Managing users"))
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(USERS_PATH, get(list_users).post(create_user))
        .route("/v1/users/{id}", get(get_user).delete(delete_user))
        .route("/v1/users/{id}/email", put(update_email))
        .route("/v1/users/{id}/password", put(update_password))
        .with_state(shared_service)
}

/// List all users
#[utoipa::path(
    get,
    path = "/v1/users",
    tag = TAG,
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = service
        .get_users()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    Ok(Json(users))
}

/// Create a user
///
/// The `Location` header points at the new resource.
#[utoipa::path(
    post,
    path = "/v1/users",
    tag = TAG,
    request_body = CreateUserInput,
    responses(
        (status = 201, description = "User created", body = UserResponse,
            headers(("Location" = String, description = "Path of the created user"))),
        (status = 400, description = "Invalid payload or storage failure", body = ErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(input): ValidatedJson<CreateUserInput>,
) -> Result<impl IntoResponse, AppError> {
    let user = service.create_user(input).await?;
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), user.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(user),
    ))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/v1/users/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Invalid id or unknown user", body = ErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> Result<Json<UserResponse>, AppError> {
    let user = service.get_user(id).await?;
    Ok(Json(user))
}

/// Change a user's email
///
/// Requires the current password.
#[utoipa::path(
    put,
    path = "/v1/users/{id}/email",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateEmailInput,
    responses(
        (status = 200, description = "Email updated", body = UserResponse),
        (status = 400, description = "Invalid payload, unknown user or wrong password", body = ErrorResponse)
    )
)]
async fn update_email<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateEmailInput>,
) -> Result<Json<UserResponse>, AppError> {
    let user = service.update_email(id, input).await?;
    Ok(Json(user))
}

/// Change a user's password
///
/// Requires the current password.
#[utoipa::path(
    put,
    path = "/v1/users/{id}/password",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdatePasswordInput,
    responses(
        (status = 200, description = "Password updated", body = UserResponse),
        (status = 400, description = "Invalid payload, unknown user or wrong password", body = ErrorResponse)
    )
)]
async fn update_password<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdatePasswordInput>,
) -> Result<Json<UserResponse>, AppError> {
    let user = service.update_password(id, input).await?;
    Ok(Json(user))
}

/// Delete a user
///
/// Echoes the deleted id in the `Entity` header.
#[utoipa::path(
    delete,
    path = "/v1/users/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted",
            headers(("Entity" = String, description = "Id of the deleted user"))),
        (status = 400, description = "Invalid id or unknown user", body = ErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> Result<impl IntoResponse, AppError> {
    service.delete_user(id).await?;
    Ok((StatusCode::NO_CONTENT, [(ENTITY_HEADER, id.to_string())]))
}
