//! Admin user CRUD endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{AdminUser, AdminUserUpdate, NewAdminUser};
use crate::store::{new_id, now_rfc3339};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[derive(Deserialize)]
struct UsersQuery {
    role: Option<String>,
    active: Option<bool>,
}

#[derive(Serialize)]
pub struct UsersResponse {
    pub success: bool,
    pub users: Vec<AdminUser>,
    pub total: usize,
}

async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UsersQuery>,
) -> Json<UsersResponse> {
    let users: Vec<AdminUser> = state
        .stores
        .users
        .list()
        .into_iter()
        .filter(|u| params.role.as_deref().is_none_or(|r| u.role == r))
        .filter(|u| params.active.is_none_or(|a| u.active == a))
        .collect();

    Json(UsersResponse {
        success: true,
        total: users.len(),
        users,
    })
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AdminUser>> {
    state
        .stores
        .users
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("User {}", id)))
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewAdminUser>,
) -> Result<(StatusCode, Json<AdminUser>)> {
    if payload.name.trim().is_empty() || payload.email.trim().is_empty() {
        return Err(AppError::BadRequest(
            "User name and email are required".to_string(),
        ));
    }

    let now = now_rfc3339();
    let user = AdminUser {
        id: new_id(),
        name: payload.name,
        email: payload.email,
        role: payload.role,
        active: payload.active,
        created_at: now.clone(),
        updated_at: now,
    };

    state.stores.users.insert(user.clone());
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<AdminUserUpdate>,
) -> Result<Json<AdminUser>> {
    let now = now_rfc3339();
    state
        .stores
        .users
        .update(&id, |user| user.apply(patch, now))
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("User {}", id)))
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state
        .stores
        .users
        .remove(&id)
        .ok_or_else(|| AppError::NotFound(format!("User {}", id)))?;

    Ok(Json(DeleteResponse { success: true }))
}
