//! Site settings CRUD endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{NewSetting, Setting, SettingUpdate};
use crate::store::{new_id, now_rfc3339};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/settings", get(list_settings).post(create_setting))
        .route(
            "/api/settings/{id}",
            get(get_setting).put(update_setting).delete(delete_setting),
        )
}

#[derive(Deserialize)]
struct SettingsQuery {
    key: Option<String>,
}

#[derive(Serialize)]
pub struct SettingsResponse {
    pub success: bool,
    pub settings: Vec<Setting>,
    pub total: usize,
}

async fn list_settings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SettingsQuery>,
) -> Json<SettingsResponse> {
    let settings: Vec<Setting> = state
        .stores
        .settings
        .list()
        .into_iter()
        .filter(|s| params.key.as_deref().is_none_or(|k| s.key == k))
        .collect();

    Json(SettingsResponse {
        success: true,
        total: settings.len(),
        settings,
    })
}

async fn get_setting(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Setting>> {
    state
        .stores
        .settings
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Setting {}", id)))
}

async fn create_setting(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewSetting>,
) -> Result<(StatusCode, Json<Setting>)> {
    if payload.key.trim().is_empty() {
        return Err(AppError::BadRequest("Setting key is required".to_string()));
    }

    let now = now_rfc3339();
    let setting = Setting {
        id: new_id(),
        key: payload.key,
        value: payload.value,
        updated_at: now.clone(),
        created_at: now,
    };

    state.stores.settings.insert(setting.clone());
    Ok((StatusCode::CREATED, Json(setting)))
}

async fn update_setting(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<SettingUpdate>,
) -> Result<Json<Setting>> {
    let now = now_rfc3339();
    state
        .stores
        .settings
        .update(&id, |setting| setting.apply(patch, now))
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Setting {}", id)))
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

async fn delete_setting(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state
        .stores
        .settings
        .remove(&id)
        .ok_or_else(|| AppError::NotFound(format!("Setting {}", id)))?;

    Ok(Json(DeleteResponse { success: true }))
}
