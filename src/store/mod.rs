// SPDX-License-Identifier: MIT

//! In-memory repository layer.
//!
//! Each resource lives in a [`MemStore`] backed by a concurrent map, so
//! concurrent handlers never interleave a read-modify-write on shared
//! state. Data is process-lifetime only: a restart loses all writes.

use chrono::{SecondsFormat, Utc};
use dashmap::DashMap;
use std::sync::Arc;

use crate::models::{AdminUser, Article, Lead, Page, PortfolioCard, Setting};

mod seed;

/// A record that can live in a [`MemStore`].
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
    fn created_at(&self) -> &str;
}

/// Concurrent in-memory store for one resource type.
#[derive(Clone)]
pub struct MemStore<T: Record> {
    items: Arc<DashMap<String, T>>,
}

impl<T: Record> Default for MemStore<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(DashMap::new()),
        }
    }
}

impl<T: Record> MemStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records, newest first. RFC3339 strings sort chronologically;
    /// ties break on id so the order is stable.
    pub fn list(&self) -> Vec<T> {
        let mut items: Vec<T> = self.items.iter().map(|e| e.value().clone()).collect();
        items.sort_by(|a, b| {
            b.created_at()
                .cmp(a.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        items
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.items.get(id).map(|e| e.value().clone())
    }

    pub fn insert(&self, record: T) {
        self.items.insert(record.id().to_string(), record);
    }

    /// Apply a mutation to the record under the map's entry lock.
    /// Returns the updated record, or None if absent.
    pub fn update(&self, id: &str, f: impl FnOnce(&mut T)) -> Option<T> {
        let mut entry = self.items.get_mut(id)?;
        f(entry.value_mut());
        Some(entry.value().clone())
    }

    pub fn remove(&self, id: &str) -> Option<T> {
        self.items.remove(id).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One store per admin resource, injected into handlers via `AppState`.
#[derive(Clone, Default)]
pub struct Stores {
    pub articles: MemStore<Article>,
    pub pages: MemStore<Page>,
    pub leads: MemStore<Lead>,
    pub users: MemStore<AdminUser>,
    pub portfolio: MemStore<PortfolioCard>,
    pub settings: MemStore<Setting>,
}

impl Stores {
    /// Empty stores (integration tests start from a clean slate).
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores pre-populated with the initial site content.
    pub fn with_seed_data() -> Self {
        let stores = Self::default();
        seed::populate(&stores);
        stores
    }
}

/// Generate a fresh record id.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Current time as an RFC3339 string with a `Z` suffix.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
