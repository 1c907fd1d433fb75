//! In-Memory Store Implementation
//!
//! A `Mutex`-guarded fake with the same observable behavior as the
//! Postgres store: sequential ids, newest-first ordering, and uniqueness
//! enforced at insert. Used by the application-layer tests.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::entity::{
    item::{Item, ItemSearch, NewItem},
    session::Session,
    user::{NewUser, User},
};
use crate::domain::repository::{
    ItemReader, ItemWriter, SessionStore, UserReader, UserWriter,
};
use crate::domain::value_object::email::Email;
use crate::error::{MarketError, MarketResult};

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    items: Vec<Item>,
    sessions: HashMap<Uuid, Session>,
    next_user_id: i64,
    next_item_id: i64,
}

/// In-memory store for users, items and sessions
#[derive(Default)]
pub struct MemoryMarketStore {
    inner: Mutex<Inner>,
}

impl MemoryMarketStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(items: &mut Vec<Item>) {
    items.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then(b.id.cmp(&a.id))
    });
}

impl UserReader for MemoryMarketStore {
    async fn find_by_email(&self, email: &Email) -> MarketResult<Option<User>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| &u.email == email).cloned())
    }

    async fn find_by_id(&self, user_id: i64) -> MarketResult<Option<User>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> MarketResult<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().any(|u| &u.email == email))
    }
}

impl UserWriter for MemoryMarketStore {
    async fn save(&self, user: NewUser) -> MarketResult<User> {
        let mut inner = self.inner.lock().unwrap();

        if inner.users.iter().any(|u| u.email == user.email) {
            return Err(MarketError::DuplicateEmail);
        }
        if inner.users.iter().any(|u| u.nickname == user.nickname) {
            return Err(MarketError::DuplicateNickname);
        }

        inner.next_user_id += 1;
        let stored = User {
            id: inner.next_user_id,
            email: user.email,
            password_hash: user.password_hash,
            nickname: user.nickname,
            name: user.name,
            manner_temp: user.manner_temp,
            profile_url: user.profile_url,
        };
        inner.users.push(stored.clone());

        Ok(stored)
    }
}

impl ItemReader for MemoryMarketStore {
    async fn find_by_id(&self, item_id: i64) -> MarketResult<Option<Item>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.items.iter().find(|i| i.id == item_id).cloned())
    }

    async fn find_by_seller(&self, seller_id: i64) -> MarketResult<Vec<Item>> {
        let inner = self.inner.lock().unwrap();
        let mut items: Vec<Item> = inner
            .items
            .iter()
            .filter(|i| i.seller_id == seller_id)
            .cloned()
            .collect();
        newest_first(&mut items);
        Ok(items)
    }

    async fn search(&self, cond: &ItemSearch) -> MarketResult<Vec<Item>> {
        let inner = self.inner.lock().unwrap();
        let mut items: Vec<Item> = inner
            .items
            .iter()
            .filter(|i| cond.matches(i))
            .cloned()
            .collect();
        newest_first(&mut items);
        Ok(items)
    }
}

impl ItemWriter for MemoryMarketStore {
    async fn save(&self, item: NewItem) -> MarketResult<Item> {
        let mut inner = self.inner.lock().unwrap();

        inner.next_item_id += 1;
        let stored = Item {
            id: inner.next_item_id,
            seller_id: item.seller_id,
            title: item.title,
            content: item.content,
            price: item.price,
            region: item.region,
            category: item.category,
            thumbnail_url: item.thumbnail_url,
            created_at: Utc::now(),
        };
        inner.items.push(stored.clone());

        Ok(stored)
    }
}

impl SessionStore for MemoryMarketStore {
    async fn create(&self, session: &Session) -> MarketResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.sessions.insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find(&self, session_id: Uuid) -> MarketResult<Option<Session>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.sessions.get(&session_id).cloned())
    }

    async fn touch(&self, session: &Session) -> MarketResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(stored) = inner.sessions.get_mut(&session.session_id) {
            stored.expires_at_ms = session.expires_at_ms;
        }
        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> MarketResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.sessions.remove(&session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> MarketResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        let now_ms = Utc::now().timestamp_millis();
        let before = inner.sessions.len();
        inner.sessions.retain(|_, s| s.expires_at_ms > now_ms);
        Ok((before - inner.sessions.len()) as u64)
    }
}
