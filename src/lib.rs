// SPDX-License-Identifier: MIT

//! BetonPump API: backend for a concrete pump truck reseller site.
//!
//! Serves the public catalog and lead capture endpoints, the admin
//! back-office CRUD, and the Google OAuth integration used to pull
//! Search Console / Analytics data into the admin dashboard.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use config::Config;
use services::{GoogleClient, Mailer};
use store::Stores;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub stores: Stores,
    pub google: GoogleClient,
    pub mailer: Mailer,
}
