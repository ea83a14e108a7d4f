// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod article;
pub mod lead;
pub mod page;
pub mod portfolio;
pub mod session;
pub mod settings;
pub mod user;

pub use article::{Article, ArticleUpdate, NewArticle};
pub use lead::{Lead, LeadStats, LeadUpdate, NewLead};
pub use page::{NewPage, Page, PageUpdate};
pub use portfolio::{NewPortfolioCard, PortfolioCard, PortfolioCardUpdate};
pub use session::{GoogleUserInfo, SessionMeta, SessionStatus};
pub use settings::{NewSetting, Setting, SettingUpdate};
pub use user::{AdminUser, AdminUserUpdate, NewAdminUser};
