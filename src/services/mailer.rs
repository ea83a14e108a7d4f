// SPDX-License-Identifier: MIT

//! SMTP mailer for contact-form leads.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::config::SmtpConfig;
use crate::error::AppError;
use crate::models::Lead;

/// Mail relay for contact-form submissions.
///
/// Without a configured transport (no SMTP block, or the mock used in
/// tests) sends are counted and logged but nothing leaves the process.
#[derive(Clone)]
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
    to: String,
    sent: Arc<AtomicUsize>,
}

impl Mailer {
    /// Real SMTP relay from configuration.
    pub fn from_config(config: &SmtpConfig) -> Result<Self, AppError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| AppError::Smtp(format!("SMTP relay setup failed: {}", e)))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport: Some(transport),
            from: config.from.clone(),
            to: config.contact_email.clone(),
            sent: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Mailer with no transport; sends are recorded but not delivered.
    pub fn new_mock() -> Self {
        Self {
            transport: None,
            from: "noreply@betonpump.example".to_string(),
            to: "leads@betonpump.example".to_string(),
            sent: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Relay a captured lead to the sales inbox.
    pub async fn send_lead(&self, lead: &Lead) -> Result<(), AppError> {
        let body = format!(
            "Новая заявка с сайта\n\nИмя: {}\nТелефон: {}\nEmail: {}\nСообщение: {}\n",
            lead.name,
            lead.phone,
            lead.email.as_deref().unwrap_or("—"),
            lead.message.as_deref().unwrap_or("—"),
        );

        let Some(transport) = &self.transport else {
            tracing::info!(lead_id = %lead.id, "Mailer disabled, skipping SMTP send");
            self.sent.fetch_add(1, Ordering::SeqCst);
            return Ok(());
        };

        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| AppError::Smtp(format!("Bad From address: {}", e)))?,
            )
            .to(self
                .to
                .parse()
                .map_err(|e| AppError::Smtp(format!("Bad To address: {}", e)))?)
            .subject(format!("Заявка с сайта: {}", lead.name))
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| AppError::Smtp(format!("Message build failed: {}", e)))?;

        transport
            .send(message)
            .await
            .map_err(|e| AppError::Smtp(format!("SMTP send failed: {}", e)))?;

        self.sent.fetch_add(1, Ordering::SeqCst);
        tracing::info!(lead_id = %lead.id, "Lead relayed via SMTP");
        Ok(())
    }

    /// Number of sends attempted successfully (used by tests).
    pub fn sent_count(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Lead;

    fn lead() -> Lead {
        Lead {
            id: "l1".to_string(),
            name: "Иван".to_string(),
            phone: "+7 900 000-00-00".to_string(),
            email: Some("ivan@example.com".to_string()),
            message: Some("Нужен насос на завтра".to_string()),
            source: "contact_form".to_string(),
            status: "new".to_string(),
            created_at: "2026-01-01T00:00:00Z".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_mailer_counts_sends() {
        let mailer = Mailer::new_mock();
        assert_eq!(mailer.sent_count(), 0);

        mailer.send_lead(&lead()).await.unwrap();
        mailer.send_lead(&lead()).await.unwrap();

        assert_eq!(mailer.sent_count(), 2);
    }
}
