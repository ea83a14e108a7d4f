// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod google;
pub mod mailer;
pub mod session;

pub use google::{GoogleClient, GoogleTokenResponse};
pub use mailer::Mailer;
