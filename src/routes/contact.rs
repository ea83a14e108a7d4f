// SPDX-License-Identifier: MIT

//! Public contact form endpoint.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::{Validate, ValidationErrors};

use crate::error::{AppError, Result};
use crate::models::Lead;
use crate::store::{new_id, now_rfc3339};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/contact", post(submit_contact_form))
}

/// Contact form submission. Validation messages are user-facing and
/// stay in Russian, matching the site copy.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 1, message = "Укажите имя"))]
    pub name: String,
    #[validate(length(min = 3, message = "Укажите телефон"))]
    pub phone: String,
    #[validate(email(message = "Некорректный email адрес"))]
    pub email: Option<String>,
    #[validate(length(max = 5000, message = "Слишком длинное сообщение"))]
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    pub lead_id: String,
}

/// First validation message in stable field order.
fn first_message(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    for field in ["name", "phone", "email", "message"] {
        if let Some(list) = fields.get(field) {
            if let Some(msg) = list.first().and_then(|e| e.message.as_ref()) {
                return msg.to_string();
            }
        }
    }
    "Некорректные данные формы".to_string()
}

/// Validate, store the lead, relay it via SMTP.
///
/// Validation runs before anything else; an invalid form never reaches
/// the mailer. The lead is stored before the SMTP send so a relay outage
/// does not lose it.
async fn submit_contact_form(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ContactForm>,
) -> Result<(StatusCode, Json<ContactResponse>)> {
    if let Err(errors) = form.validate() {
        return Err(AppError::Validation(first_message(&errors)));
    }

    let now = now_rfc3339();
    let lead = Lead {
        id: new_id(),
        name: form.name,
        phone: form.phone,
        email: form.email,
        message: form.message,
        source: "contact_form".to_string(),
        status: "new".to_string(),
        created_at: now.clone(),
        updated_at: now,
    };

    state.stores.leads.insert(lead.clone());

    state.mailer.send_lead(&lead).await?;

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            success: true,
            message: "Заявка отправлена".to_string(),
            lead_id: lead.id,
        }),
    ))
}
