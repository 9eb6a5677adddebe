//! Navigation entries and the partial payloads used to create and edit them.
//!
//! An entry's `id` is assigned by the store and never changes afterwards;
//! [`EntryFields`] deliberately has no `id` so a client cannot rewrite it.
//! Categories are not stored separately, they are projected from the
//! entries with [`distinct_categories`].

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Entity name used in [`CoreError::NotFound`](crate::error::CoreError::NotFound).
pub const ENTITY_NAME: &str = "NavigationEntry";

/// One bookmark in the directory.
///
/// Text fields default to empty strings on read so documents written by
/// older tooling (or edited by hand) with missing keys still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEntry {
    pub id: DbId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub category: String,
}

/// Request payload for creating or partially updating an entry.
///
/// Absent (or `null`) fields are left untouched on update and become empty
/// strings on create. Unknown keys, including `id`, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFields {
    pub name: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub category: Option<String>,
}

impl NavigationEntry {
    /// Build a new entry from a create payload and a freshly assigned id.
    pub fn from_fields(id: DbId, fields: EntryFields) -> Self {
        Self {
            id,
            name: fields.name.unwrap_or_default(),
            url: fields.url.unwrap_or_default(),
            icon: fields.icon.unwrap_or_default(),
            category: fields.category.unwrap_or_default(),
        }
    }

    /// Merge the supplied fields onto this entry. The id is never touched.
    pub fn apply(&mut self, fields: EntryFields) {
        if let Some(name) = fields.name {
            self.name = name;
        }
        if let Some(url) = fields.url {
            self.url = url;
        }
        if let Some(icon) = fields.icon {
            self.icon = icon;
        }
        if let Some(category) = fields.category {
            self.category = category;
        }
    }
}

/// Project the distinct category values, in first-seen order.
pub fn distinct_categories(entries: &[NavigationEntry]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for entry in entries {
        if !seen.iter().any(|c| c == &entry.category) {
            seen.push(entry.category.clone());
        }
    }
    seen
}

/// Collection written on first run when no data file exists yet.
pub fn seed_entries() -> Vec<NavigationEntry> {
    vec![
        NavigationEntry {
            id: 1,
            name: "Google".into(),
            url: "https://google.com".into(),
            icon: "🔍".into(),
            category: "搜索".into(),
        },
        NavigationEntry {
            id: 2,
            name: "GitHub".into(),
            url: "https://github.com".into(),
            icon: "🐙".into(),
            category: "开发".into(),
        },
        NavigationEntry {
            id: 3,
            name: "知乎".into(),
            url: "https://zhihu.com".into(),
            icon: "📚".into(),
            category: "学习".into(),
        },
    ]
}
