// SPDX-License-Identifier: MIT

//! Lead management endpoints for the admin dashboard.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{Lead, LeadStats, LeadUpdate, NewLead};
use crate::store::{new_id, now_rfc3339};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/leads", get(list_leads).post(create_lead))
        .route(
            "/api/leads/{id}",
            get(get_lead).put(update_lead).delete(delete_lead),
        )
}

#[derive(Deserialize)]
struct LeadsQuery {
    status: Option<String>,
    source: Option<String>,
}

#[derive(Serialize)]
pub struct LeadsResponse {
    pub success: bool,
    pub leads: Vec<Lead>,
    pub total: usize,
    /// Aggregate over the whole collection, independent of filters
    pub stats: LeadStats,
}

/// List leads with optional exact-match filters.
async fn list_leads(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeadsQuery>,
) -> Json<LeadsResponse> {
    let all = state.stores.leads.list();
    let stats = LeadStats::compute(&all);

    let leads: Vec<Lead> = all
        .into_iter()
        .filter(|l| params.status.as_deref().is_none_or(|s| l.status == s))
        .filter(|l| params.source.as_deref().is_none_or(|s| l.source == s))
        .collect();

    Json(LeadsResponse {
        success: true,
        total: leads.len(),
        stats,
        leads,
    })
}

async fn get_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Lead>> {
    state
        .stores
        .leads
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Lead {}", id)))
}

async fn create_lead(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewLead>,
) -> Result<(StatusCode, Json<Lead>)> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Lead name is required".to_string()));
    }
    if payload.phone.trim().is_empty() {
        return Err(AppError::BadRequest("Lead phone is required".to_string()));
    }

    let now = now_rfc3339();
    let lead = Lead {
        id: new_id(),
        name: payload.name,
        phone: payload.phone,
        email: payload.email,
        message: payload.message,
        source: payload.source,
        status: payload.status,
        created_at: now.clone(),
        updated_at: now,
    };

    state.stores.leads.insert(lead.clone());
    tracing::info!(lead_id = %lead.id, source = %lead.source, "Lead created");

    Ok((StatusCode::CREATED, Json(lead)))
}

async fn update_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<LeadUpdate>,
) -> Result<Json<Lead>> {
    let now = now_rfc3339();
    state
        .stores
        .leads
        .update(&id, |lead| lead.apply(patch, now))
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Lead {}", id)))
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

async fn delete_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state
        .stores
        .leads
        .remove(&id)
        .ok_or_else(|| AppError::NotFound(format!("Lead {}", id)))?;

    Ok(Json(DeleteResponse { success: true }))
}
