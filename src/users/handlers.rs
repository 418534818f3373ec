use axum::{extract::State, routing::{get, put}, Json, Router};
use tracing::{error, info, instrument, warn};

use crate::{
    error::ApiError,
    state::AppState,
    users::{
        dto::{CreatedUserResponse, MessageResponse, UserPayload},
        extractors::{JsonBody, UserId},
        repo_types::User,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", put(update_user).delete(delete_user))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.users.list().await.map_err(|e| {
        error!(error = %e, "list users failed");
        ApiError::Store(e)
    })?;
    Ok(Json(users))
}

#[instrument(skip(state, body))]
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<JsonBody<UserPayload>, ApiError>,
) -> Result<Json<CreatedUserResponse>, ApiError> {
    let JsonBody(payload) = body.map_err(|e| {
        warn!(error = %e, "failed to bind JSON");
        e
    })?;

    let id = state.users.create(&payload).await.map_err(|e| {
        error!(error = %e, "failed to insert user");
        ApiError::Store(e)
    })?;

    info!(id, "user created");
    Ok(Json(CreatedUserResponse { id }))
}

/// The body is checked before the id, so a malformed body is a 400 even on a bad id.
#[instrument(skip(state, id, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    id: Result<UserId, ApiError>,
    JsonBody(payload): JsonBody<UserPayload>,
) -> Result<Json<MessageResponse>, ApiError> {
    let UserId(id) = id?;
    state.users.update(id, &payload).await.map_err(|e| {
        error!(error = %e, id, "failed to update user");
        ApiError::Store(e)
    })?;
    Ok(Json(MessageResponse::UPDATED))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<Json<MessageResponse>, ApiError> {
    state.users.delete(id).await.map_err(|e| {
        error!(error = %e, id, "failed to delete user");
        ApiError::Store(e)
    })?;
    Ok(Json(MessageResponse::DELETED))
}
