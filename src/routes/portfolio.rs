//! Portfolio card CRUD endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{NewPortfolioCard, PortfolioCard, PortfolioCardUpdate};
use crate::store::{new_id, now_rfc3339};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/portfolio-cards",
            get(list_cards).post(create_card),
        )
        .route(
            "/api/portfolio-cards/{id}",
            get(get_card).put(update_card).delete(delete_card),
        )
}

#[derive(Deserialize)]
struct PortfolioQuery {
    category: Option<String>,
    published: Option<bool>,
}

#[derive(Serialize)]
pub struct PortfolioResponse {
    pub success: bool,
    pub cards: Vec<PortfolioCard>,
    pub total: usize,
}

/// List cards; ordered by `sort_order` for the landing page.
async fn list_cards(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PortfolioQuery>,
) -> Json<PortfolioResponse> {
    let mut cards: Vec<PortfolioCard> = state
        .stores
        .portfolio
        .list()
        .into_iter()
        .filter(|c| params.category.as_deref().is_none_or(|cat| c.category == cat))
        .filter(|c| params.published.is_none_or(|p| c.published == p))
        .collect();

    cards.sort_by_key(|c| c.sort_order);

    Json(PortfolioResponse {
        success: true,
        total: cards.len(),
        cards,
    })
}

async fn get_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PortfolioCard>> {
    state
        .stores
        .portfolio
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Portfolio card {}", id)))
}

async fn create_card(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewPortfolioCard>,
) -> Result<(StatusCode, Json<PortfolioCard>)> {
    if payload.title.trim().is_empty() {
        return Err(AppError::BadRequest("Card title is required".to_string()));
    }

    let now = now_rfc3339();
    let card = PortfolioCard {
        id: new_id(),
        title: payload.title,
        description: payload.description,
        image_url: payload.image_url,
        category: payload.category,
        region: payload.region,
        sort_order: payload.sort_order,
        published: payload.published,
        created_at: now.clone(),
        updated_at: now,
    };

    state.stores.portfolio.insert(card.clone());
    Ok((StatusCode::CREATED, Json(card)))
}

async fn update_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<PortfolioCardUpdate>,
) -> Result<Json<PortfolioCard>> {
    let now = now_rfc3339();
    state
        .stores
        .portfolio
        .update(&id, |card| card.apply(patch, now))
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Portfolio card {}", id)))
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

async fn delete_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state
        .stores
        .portfolio
        .remove(&id)
        .ok_or_else(|| AppError::NotFound(format!("Portfolio card {}", id)))?;

    Ok(Json(DeleteResponse { success: true }))
}
