//! Portfolio card model (completed projects shown on the landing page).

use crate::store::Record;
use serde::{Deserialize, Serialize};

/// A completed-project card in the public portfolio section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioCard {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// e.g. "residential", "industrial", "infrastructure"
    pub category: String,
    pub region: Option<String>,
    /// Display order on the landing page (ascending)
    pub sort_order: i32,
    pub published: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct NewPortfolioCard {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct PortfolioCardUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub sort_order: Option<i32>,
    pub published: Option<bool>,
}

impl PortfolioCard {
    pub fn apply(&mut self, patch: PortfolioCardUpdate, now: String) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = Some(image_url);
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(region) = patch.region {
            self.region = Some(region);
        }
        if let Some(sort_order) = patch.sort_order {
            self.sort_order = sort_order;
        }
        if let Some(published) = patch.published {
            self.published = published;
        }
        self.updated_at = now;
    }
}

impl Record for PortfolioCard {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }
}
