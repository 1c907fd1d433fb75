//! Item Entity
//!
//! A listing put up for sale by one seller, plus the search criteria used
//! by the listing query.

use chrono::{DateTime, Utc};

/// Item row as stored, with its database-assigned id and server-assigned
/// creation timestamp.
#[derive(Debug, Clone)]
pub struct Item {
    /// Surrogate id, assigned by the store on insert
    pub id: i64,
    /// Owning seller's user id (non-owning reference)
    pub seller_id: i64,
    pub title: String,
    /// Free-text description
    pub content: String,
    /// Asking price, never negative
    pub price: i32,
    pub region: String,
    pub category: String,
    pub thumbnail_url: Option<String>,
    /// Assigned by the database at insert time
    pub created_at: DateTime<Utc>,
}

/// Draft for an item about to be inserted. `ItemWriter::save` consumes it
/// and returns the stored [`Item`].
#[derive(Debug, Clone)]
pub struct NewItem {
    pub seller_id: i64,
    pub title: String,
    pub content: String,
    pub price: i32,
    pub region: String,
    pub category: String,
    pub thumbnail_url: Option<String>,
}

/// Search criteria for the item listing.
///
/// All present filters are conjunctive. Semantics (pinned here so the
/// Postgres store and the in-memory fake agree):
/// - `keyword`: case-insensitive substring match against title OR content
/// - `regions` / `categories`: exact membership; an empty set imposes
///   no restriction
#[derive(Debug, Clone, Default)]
pub struct ItemSearch {
    pub keyword: Option<String>,
    pub regions: Vec<String>,
    pub categories: Vec<String>,
}

impl ItemSearch {
    /// No filters at all; matches everything.
    pub fn is_empty(&self) -> bool {
        self.keyword.is_none() && self.regions.is_empty() && self.categories.is_empty()
    }

    /// Reference predicate for the search semantics.
    ///
    /// The Postgres store expresses the same conditions in SQL; the
    /// in-memory fake calls this directly.
    pub fn matches(&self, item: &Item) -> bool {
        if let Some(keyword) = &self.keyword {
            let kw = keyword.to_lowercase();
            if !item.title.to_lowercase().contains(&kw)
                && !item.content.to_lowercase().contains(&kw)
            {
                return false;
            }
        }

        if !self.regions.is_empty() && !self.regions.contains(&item.region) {
            return false;
        }

        if !self.categories.is_empty() && !self.categories.contains(&item.category) {
            return false;
        }

        true
    }
}
