//! Create Item Use Case
//!
//! Registers a new item for sale, owned by the authenticated user.

use std::sync::Arc;

use crate::domain::entity::item::{Item, NewItem};
use crate::domain::entity::user::User;
use crate::domain::repository::ItemWriter;
use crate::error::{MarketError, MarketResult};

/// Create item input
pub struct CreateItemInput {
    pub title: String,
    pub content: String,
    pub price: i32,
    pub region: String,
    pub category: String,
    pub thumbnail_url: Option<String>,
}

/// Create item use case
pub struct CreateItemUseCase<R>
where
    R: ItemWriter,
{
    repo: Arc<R>,
}

impl<R> CreateItemUseCase<R>
where
    R: ItemWriter,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create an item on behalf of `seller`. The seller is always the
    /// caller resolved from the session, never taken from the request body.
    pub async fn execute(&self, seller: &User, input: CreateItemInput) -> MarketResult<Item> {
        for (field, value) in [
            ("title", &input.title),
            ("content", &input.content),
            ("region", &input.region),
            ("category", &input.category),
        ] {
            if value.trim().is_empty() {
                return Err(MarketError::Validation(format!("{field} must not be empty")));
            }
        }
        if input.price < 0 {
            return Err(MarketError::Validation("price must not be negative".into()));
        }

        let item = self
            .repo
            .save(NewItem {
                seller_id: seller.id,
                title: input.title,
                content: input.content,
                price: input.price,
                region: input.region,
                category: input.category,
                thumbnail_url: input.thumbnail_url,
            })
            .await?;

        tracing::info!(item_id = item.id, seller_id = seller.id, "Item created");

        Ok(item)
    }
}
