//! Store Traits
//!
//! Data-access boundaries, one Reader/Writer pair per entity type.
//! Implementations live in the infrastructure layer: a Postgres adapter
//! for production and an in-memory fake for tests.

use uuid::Uuid;

use crate::domain::entity::{
    item::{Item, ItemSearch, NewItem},
    session::Session,
    user::{NewUser, User},
};
use crate::domain::value_object::email::Email;
use crate::error::MarketResult;

/// Read side of the User store
#[trait_variant::make(UserReader: Send)]
pub trait LocalUserReader {
    /// Find user by email; `None` on miss, no error
    async fn find_by_email(&self, email: &Email) -> MarketResult<Option<User>>;

    /// Find user by id
    async fn find_by_id(&self, user_id: i64) -> MarketResult<Option<User>>;

    /// Membership check used to reject duplicate sign-ups
    async fn exists_by_email(&self, email: &Email) -> MarketResult<bool>;
}

/// Write side of the User store
#[trait_variant::make(UserWriter: Send)]
pub trait LocalUserWriter {
    /// Insert a new user and return it with its assigned id.
    ///
    /// A unique violation on email surfaces as `DuplicateEmail`, on
    /// nickname as `DuplicateNickname`. No update path exists.
    async fn save(&self, user: NewUser) -> MarketResult<User>;
}

/// Read side of the Item store
#[trait_variant::make(ItemReader: Send)]
pub trait LocalItemReader {
    /// Find item by id
    async fn find_by_id(&self, item_id: i64) -> MarketResult<Option<Item>>;

    /// All items of one seller, newest first
    async fn find_by_seller(&self, seller_id: i64) -> MarketResult<Vec<Item>>;

    /// Filtered listing, newest first; see [`ItemSearch`] for semantics
    async fn search(&self, cond: &ItemSearch) -> MarketResult<Vec<Item>>;
}

/// Write side of the Item store
#[trait_variant::make(ItemWriter: Send)]
pub trait LocalItemWriter {
    /// Insert a new item and return it with its assigned id and
    /// creation timestamp.
    async fn save(&self, item: NewItem) -> MarketResult<Item>;
}

/// Server-side session store
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    /// Create a new session row
    async fn create(&self, session: &Session) -> MarketResult<()>;

    /// Find a session by id. Expired rows are still returned; the caller
    /// checks expiry so it can reap the row lazily.
    async fn find(&self, session_id: Uuid) -> MarketResult<Option<Session>>;

    /// Persist a refreshed inactivity expiry
    async fn touch(&self, session: &Session) -> MarketResult<()>;

    /// Delete a session
    async fn delete(&self, session_id: Uuid) -> MarketResult<()>;

    /// Remove expired rows; returns how many were deleted
    async fn cleanup_expired(&self) -> MarketResult<u64>;
}
