//! Item Detail Use Case
//!
//! Fetches a single item together with its seller's public profile.

use std::sync::Arc;

use crate::domain::entity::item::Item;
use crate::domain::entity::user::User;
use crate::domain::repository::{ItemReader, UserReader};
use crate::error::{MarketError, MarketResult};

/// Item detail with seller info
#[derive(Debug)]
pub struct ItemDetailOutput {
    pub item: Item,
    pub seller: User,
}

/// Item detail use case
pub struct ItemDetailUseCase<I, U>
where
    I: ItemReader,
    U: UserReader,
{
    items: Arc<I>,
    users: Arc<U>,
}

impl<I, U> ItemDetailUseCase<I, U>
where
    I: ItemReader,
    U: UserReader,
{
    pub fn new(items: Arc<I>, users: Arc<U>) -> Self {
        Self { items, users }
    }

    pub async fn execute(&self, item_id: i64) -> MarketResult<ItemDetailOutput> {
        let item = self
            .items
            .find_by_id(item_id)
            .await?
            .ok_or(MarketError::ItemNotFound)?;

        // An item whose seller row is gone is a data integrity problem,
        // not a client error
        let seller = self
            .users
            .find_by_id(item.seller_id)
            .await?
            .ok_or_else(|| {
                MarketError::Internal(format!(
                    "item {} references missing seller {}",
                    item.id, item.seller_id
                ))
            })?;

        Ok(ItemDetailOutput { item, seller })
    }
}
