//! User API endpoints. All routes here sit behind the API-key gate.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::models::{CreateUserRequest, UpdateUserRequest, User};
use crate::AppState;

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

/// Numeric coercion of a route id. A non-numeric id matches no user.
fn parse_user_id(id: &str) -> Result<i64, AppError> {
    id.parse().map_err(|_| user_not_found())
}

/// GET /api/users - List all users.
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.users.list().await)
}

/// GET /api/users/:id - Get a single user.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    let id = parse_user_id(&id)?;
    state.users.get(id).await.map(Json).ok_or_else(user_not_found)
}

/// POST /api/users - Create a new user.
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    // Validate required fields
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let user = state.users.create(request).await;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /api/users/:id - Update a user.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<User>, AppError> {
    let id = parse_user_id(&id)?;
    state
        .users
        .update(id, request)
        .await
        .map(Json)
        .ok_or_else(user_not_found)
}

/// DELETE /api/users/:id - Delete a user.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_user_id(&id)?;
    if state.users.delete(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(user_not_found())
    }
}
