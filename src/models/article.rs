//! Blog/SEO article model for the public catalog pages.

use crate::store::Record;
use serde::{Deserialize, Serialize};

/// Published article (regional landing content, equipment guides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    /// URL slug, unique by convention (not enforced)
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    /// e.g. "news", "guides", "regions"
    pub category: String,
    pub published: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Create payload for `POST /api/articles`.
#[derive(Debug, Deserialize)]
pub struct NewArticle {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub published: bool,
}

/// Partial update payload for `PUT /api/articles/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct ArticleUpdate {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub published: Option<bool>,
}

impl Article {
    pub fn apply(&mut self, patch: ArticleUpdate, now: String) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(slug) = patch.slug {
            self.slug = slug;
        }
        if let Some(excerpt) = patch.excerpt {
            self.excerpt = Some(excerpt);
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(published) = patch.published {
            self.published = published;
        }
        self.updated_at = now;
    }
}

impl Record for Article {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }
}
