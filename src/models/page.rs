//! Landing/region page model managed from the admin panel.

use crate::store::Record;
use serde::{Deserialize, Serialize};

/// Editable site page (landing, region, service page).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub meta_description: Option<String>,
    pub content: String,
    /// "draft" or "published"
    pub status: String,
    /// Region the page targets, if any (e.g. "moscow")
    pub region: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct NewPage {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub meta_description: Option<String>,
    pub content: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub region: Option<String>,
}

fn default_status() -> String {
    "draft".to_string()
}

#[derive(Debug, Default, Deserialize)]
pub struct PageUpdate {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub content: Option<String>,
    pub status: Option<String>,
    pub region: Option<String>,
}

impl Page {
    pub fn apply(&mut self, patch: PageUpdate, now: String) {
        if let Some(slug) = patch.slug {
            self.slug = slug;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(meta_description) = patch.meta_description {
            self.meta_description = Some(meta_description);
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(region) = patch.region {
            self.region = Some(region);
        }
        self.updated_at = now;
    }
}

impl Record for Page {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }
}
