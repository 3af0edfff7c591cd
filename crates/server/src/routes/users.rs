use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use common::{metrics, types::MessageResponse};
use models::user::{CreateUserRequest, UpdateUserRequest, User};
use serde::Serialize;
use service::errors::ServiceError;
use tracing::{info, warn};

use crate::errors::ApiError;
use crate::routes::AppState;

pub const USER_DELETED: &str = "User deleted successfully";

#[derive(Debug, Serialize)]
pub struct UserList {
    pub users: Vec<User>,
    pub total: usize,
}

/// Ids are positive integers; anything else is rejected before touching the store.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse::<u64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(ApiError::invalid_id)
}

/// Count the outcome of an operation and pass the result through.
fn observe<T>(operation: &str, res: Result<T, ApiError>) -> Result<T, ApiError> {
    let outcome = match &res {
        Ok(_) => "ok",
        Err(ApiError::BadRequest(_)) => "bad_request",
        Err(ApiError::NotFound(_)) => "not_found",
    };
    metrics::record(operation, outcome);
    if let Err(e) = &res {
        warn!(operation, error = %e, "user request rejected");
    }
    res
}

#[utoipa::path(
    get, path = "/users", tag = "users",
    responses((status = 200, description = "All users", body = crate::openapi::UserListDoc))
)]
pub async fn list_users(State(state): State<AppState>) -> Json<UserList> {
    let users = state.store.list().await;
    let total = users.len();
    metrics::record("list", "ok");
    info!(total, "list users");
    Json(UserList { users, total })
}

#[utoipa::path(
    get, path = "/users/{id}", tag = "users",
    params(("id" = u64, Path, description = "User ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::UserDoc),
        (status = 400, description = "Invalid user ID", body = crate::openapi::ErrorDoc),
        (status = 404, description = "User not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let res = async {
        let id = parse_id(&raw_id)?;
        let user = state
            .store
            .get(id)
            .await
            .ok_or_else(|| ServiceError::not_found("user"))?;
        Ok::<_, ApiError>(Json(user))
    }
    .await;
    observe("get", res)
}

#[utoipa::path(
    post, path = "/users", tag = "users",
    request_body = crate::openapi::CreateUserRequestDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::UserDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let res = async {
        let Json(input) = payload?;
        let user = state.store.create(input).await?;
        info!(id = user.id, "created user");
        Ok::<_, ApiError>((StatusCode::CREATED, Json(user)))
    }
    .await;
    observe("create", res)
}

#[utoipa::path(
    put, path = "/users/{id}", tag = "users",
    params(("id" = u64, Path, description = "User ID")),
    request_body = crate::openapi::UpdateUserRequestDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::UserDoc),
        (status = 400, description = "Invalid user ID or body", body = crate::openapi::ErrorDoc),
        (status = 404, description = "User not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let res = async {
        let id = parse_id(&raw_id)?;
        let Json(input) = payload?;
        let user = state.store.update(id, input).await?;
        info!(id = user.id, "updated user");
        Ok::<_, ApiError>(Json(user))
    }
    .await;
    observe("update", res)
}

#[utoipa::path(
    delete, path = "/users/{id}", tag = "users",
    params(("id" = u64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 400, description = "Invalid user ID", body = crate::openapi::ErrorDoc),
        (status = 404, description = "User not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let res = async {
        let id = parse_id(&raw_id)?;
        let removed = state.store.delete(id).await?;
        info!(id = removed.id, "deleted user");
        Ok::<_, ApiError>(Json(MessageResponse::new(USER_DELETED)))
    }
    .await;
    observe("delete", res)
}
