//! My Page Use Case
//!
//! Profile view for the authenticated user: their public profile fields
//! plus every item they are selling, newest first.

use std::sync::Arc;

use crate::domain::entity::item::Item;
use crate::domain::entity::user::User;
use crate::domain::repository::ItemReader;
use crate::error::MarketResult;

/// My page output
pub struct MyPageOutput {
    pub user: User,
    pub items: Vec<Item>,
}

/// My page use case
pub struct MyPageUseCase<I>
where
    I: ItemReader,
{
    items: Arc<I>,
}

impl<I> MyPageUseCase<I>
where
    I: ItemReader,
{
    pub fn new(items: Arc<I>) -> Self {
        Self { items }
    }

    pub async fn execute(&self, user: User) -> MarketResult<MyPageOutput> {
        let items = self.items.find_by_seller(user.id).await?;

        tracing::debug!(user_id = user.id, items = items.len(), "My page viewed");

        Ok(MyPageOutput { user, items })
    }
}
