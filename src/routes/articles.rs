// SPDX-License-Identifier: MIT

//! Article CRUD endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{Article, ArticleUpdate, NewArticle};
use crate::store::{new_id, now_rfc3339};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/articles", get(list_articles).post(create_article))
        .route(
            "/api/articles/{id}",
            get(get_article).put(update_article).delete(delete_article),
        )
}

#[derive(Deserialize)]
struct ArticlesQuery {
    category: Option<String>,
    slug: Option<String>,
    published: Option<bool>,
}

#[derive(Serialize)]
pub struct ArticlesResponse {
    pub success: bool,
    pub articles: Vec<Article>,
    pub total: usize,
}

async fn list_articles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ArticlesQuery>,
) -> Json<ArticlesResponse> {
    let articles: Vec<Article> = state
        .stores
        .articles
        .list()
        .into_iter()
        .filter(|a| params.category.as_deref().is_none_or(|c| a.category == c))
        .filter(|a| params.slug.as_deref().is_none_or(|s| a.slug == s))
        .filter(|a| params.published.is_none_or(|p| a.published == p))
        .collect();

    Json(ArticlesResponse {
        success: true,
        total: articles.len(),
        articles,
    })
}

async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Article>> {
    state
        .stores
        .articles
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Article {}", id)))
}

async fn create_article(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewArticle>,
) -> Result<(StatusCode, Json<Article>)> {
    if payload.title.trim().is_empty() || payload.slug.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Article title and slug are required".to_string(),
        ));
    }

    let now = now_rfc3339();
    let article = Article {
        id: new_id(),
        title: payload.title,
        slug: payload.slug,
        excerpt: payload.excerpt,
        content: payload.content,
        category: payload.category,
        published: payload.published,
        created_at: now.clone(),
        updated_at: now,
    };

    state.stores.articles.insert(article.clone());
    Ok((StatusCode::CREATED, Json(article)))
}

async fn update_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<ArticleUpdate>,
) -> Result<Json<Article>> {
    let now = now_rfc3339();
    state
        .stores
        .articles
        .update(&id, |article| article.apply(patch, now))
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Article {}", id)))
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

async fn delete_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state
        .stores
        .articles
        .remove(&id)
        .ok_or_else(|| AppError::NotFound(format!("Article {}", id)))?;

    Ok(Json(DeleteResponse { success: true }))
}
