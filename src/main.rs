// SPDX-License-Identifier: MIT

//! BetonPump API Server
//!
//! Backend for the concrete pump truck reseller site: public catalog,
//! lead capture, admin CRUD, and the Google OAuth/SEO integration.

use betonpump_api::{
    config::Config,
    services::{GoogleClient, Mailer},
    store::Stores,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting BetonPump API");

    // In-memory stores with the initial site content
    let stores = Stores::with_seed_data();

    let google = GoogleClient::new(&config);

    let mailer = match &config.smtp {
        Some(smtp) => {
            tracing::info!(host = %smtp.host, "SMTP relay configured");
            Mailer::from_config(smtp).expect("Failed to configure SMTP relay")
        }
        None => {
            tracing::warn!("SMTP not configured, contact-form mail disabled");
            Mailer::new_mock()
        }
    };

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        stores,
        google,
        mailer,
    });

    // Build router
    let app = betonpump_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("betonpump_api=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
