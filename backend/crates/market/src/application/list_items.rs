//! List Items Use Case
//!
//! Lists items newest first, optionally narrowed by search criteria.

use std::sync::Arc;

use crate::domain::entity::item::{Item, ItemSearch};
use crate::domain::repository::ItemReader;
use crate::error::MarketResult;

/// List items use case
pub struct ListItemsUseCase<R>
where
    R: ItemReader,
{
    repo: Arc<R>,
}

impl<R> ListItemsUseCase<R>
where
    R: ItemReader,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns all matching items, newest first. Empty criteria match
    /// everything.
    pub async fn execute(&self, search: ItemSearch) -> MarketResult<Vec<Item>> {
        let items = self.repo.search(&search).await?;

        tracing::debug!(
            keyword = ?search.keyword,
            regions = ?search.regions,
            categories = ?search.categories,
            matched = items.len(),
            "Item search"
        );

        Ok(items)
    }
}
