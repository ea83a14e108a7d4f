//! Site page CRUD endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{NewPage, Page, PageUpdate};
use crate::store::{new_id, now_rfc3339};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/pages", get(list_pages).post(create_page))
        .route(
            "/api/pages/{id}",
            get(get_page).put(update_page).delete(delete_page),
        )
}

#[derive(Deserialize)]
struct PagesQuery {
    slug: Option<String>,
    status: Option<String>,
    region: Option<String>,
}

#[derive(Serialize)]
pub struct PagesResponse {
    pub success: bool,
    pub pages: Vec<Page>,
    pub total: usize,
}

async fn list_pages(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PagesQuery>,
) -> Json<PagesResponse> {
    let pages: Vec<Page> = state
        .stores
        .pages
        .list()
        .into_iter()
        .filter(|p| params.slug.as_deref().is_none_or(|s| p.slug == s))
        .filter(|p| params.status.as_deref().is_none_or(|s| p.status == s))
        .filter(|p| {
            params
                .region
                .as_deref()
                .is_none_or(|r| p.region.as_deref() == Some(r))
        })
        .collect();

    Json(PagesResponse {
        success: true,
        total: pages.len(),
        pages,
    })
}

async fn get_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Page>> {
    state
        .stores
        .pages
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Page {}", id)))
}

async fn create_page(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewPage>,
) -> Result<(StatusCode, Json<Page>)> {
    if payload.slug.trim().is_empty() || payload.title.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Page slug and title are required".to_string(),
        ));
    }

    let now = now_rfc3339();
    let page = Page {
        id: new_id(),
        slug: payload.slug,
        title: payload.title,
        meta_description: payload.meta_description,
        content: payload.content,
        status: payload.status,
        region: payload.region,
        created_at: now.clone(),
        updated_at: now,
    };

    state.stores.pages.insert(page.clone());
    Ok((StatusCode::CREATED, Json(page)))
}

async fn update_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<PageUpdate>,
) -> Result<Json<Page>> {
    let now = now_rfc3339();
    state
        .stores
        .pages
        .update(&id, |page| page.apply(patch, now))
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Page {}", id)))
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

async fn delete_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state
        .stores
        .pages
        .remove(&id)
        .ok_or_else(|| AppError::NotFound(format!("Page {}", id)))?;

    Ok(Json(DeleteResponse { success: true }))
}
