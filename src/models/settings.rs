//! Site settings as key/value records.

use crate::store::Record;
use serde::{Deserialize, Serialize};

/// One site setting (phone number, address, social links, feature flags).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    pub id: String,
    pub key: String,
    pub value: serde_json::Value,
    pub updated_at: String,
    /// Kept for uniform list ordering with the other resources
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct NewSetting {
    pub key: String,
    pub value: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
pub struct SettingUpdate {
    pub key: Option<String>,
    pub value: Option<serde_json::Value>,
}

impl Setting {
    pub fn apply(&mut self, patch: SettingUpdate, now: String) {
        if let Some(key) = patch.key {
            self.key = key;
        }
        if let Some(value) = patch.value {
            self.value = value;
        }
        self.updated_at = now;
    }
}

impl Record for Setting {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }
}
