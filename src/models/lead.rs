// SPDX-License-Identifier: MIT

//! Sales lead model (contact form submissions, callback requests).

use crate::store::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A captured sales lead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub message: Option<String>,
    /// Where the lead came from: "contact_form", "callback", "manual"
    pub source: String,
    /// "new", "contacted", "won", "lost"
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct NewLead {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_source() -> String {
    "manual".to_string()
}

fn default_status() -> String {
    "new".to_string()
}

#[derive(Debug, Default, Deserialize)]
pub struct LeadUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub source: Option<String>,
    pub status: Option<String>,
}

impl Lead {
    pub fn apply(&mut self, patch: LeadUpdate, now: String) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(email) = patch.email {
            self.email = Some(email);
        }
        if let Some(message) = patch.message {
            self.message = Some(message);
        }
        if let Some(source) = patch.source {
            self.source = source;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.updated_at = now;
    }
}

impl Record for Lead {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }
}

/// Aggregate counts reported alongside every lead listing.
///
/// Computed over the whole collection, not the filtered view, so the admin
/// dashboard tiles stay stable while a filter is active.
#[derive(Debug, Clone, Serialize)]
pub struct LeadStats {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
}

impl LeadStats {
    pub fn compute(leads: &[Lead]) -> Self {
        let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
        for lead in leads {
            *by_status.entry(lead.status.clone()).or_default() += 1;
        }
        Self {
            total: leads.len(),
            by_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(status: &str) -> Lead {
        Lead {
            id: uuid::Uuid::new_v4().to_string(),
            name: "Иван".to_string(),
            phone: "+7 900 000-00-00".to_string(),
            email: None,
            message: None,
            source: "manual".to_string(),
            status: status.to_string(),
            created_at: "2026-01-01T00:00:00Z".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_stats_counts_match_collection() {
        let leads = vec![lead("new"), lead("new"), lead("won")];
        let stats = LeadStats::compute(&leads);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_status.get("new"), Some(&2));
        assert_eq!(stats.by_status.get("won"), Some(&1));
        assert_eq!(stats.by_status.get("lost"), None);
    }
}
