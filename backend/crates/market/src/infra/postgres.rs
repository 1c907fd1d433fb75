//! PostgreSQL Store Implementation

use chrono::{DateTime, Utc};
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use platform::password::HashedPassword;

use crate::domain::entity::{
    item::{Item, ItemSearch, NewItem},
    session::Session,
    user::{NewUser, User},
};
use crate::domain::repository::{
    ItemReader, ItemWriter, SessionStore, UserReader, UserWriter,
};
use crate::domain::value_object::email::Email;
use crate::error::{MarketError, MarketResult, is_unique_violation};

const USER_COLUMNS: &str =
    "user_id, email, password_hash, nickname, name, manner_temp, profile_url";
const ITEM_COLUMNS: &str =
    "item_id, seller_id, title, content, price, region, category, thumbnail_url, created_at";

/// PostgreSQL-backed store for users, items and sessions
#[derive(Clone)]
pub struct PgMarketStore {
    pool: PgPool,
}

impl PgMarketStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Store Implementation
// ============================================================================

impl UserReader for PgMarketStore {
    async fn find_by_email(&self, email: &Email) -> MarketResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_id(&self, user_id: i64) -> MarketResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> MarketResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

impl UserWriter for PgMarketStore {
    async fn save(&self, user: NewUser) -> MarketResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (email, password_hash, nickname, name, manner_temp, profile_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(&user.nickname)
        .bind(&user.name)
        .bind(user.manner_temp)
        .bind(&user.profile_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // The unique constraints are authoritative; the pre-insert
            // existence check is only a fast path
            if is_unique_violation(&e, Some("users_email_key")) {
                MarketError::DuplicateEmail
            } else if is_unique_violation(&e, Some("users_nickname_key")) {
                MarketError::DuplicateNickname
            } else {
                MarketError::Database(e)
            }
        })?;

        row.into_user()
    }
}

// ============================================================================
// Item Store Implementation
// ============================================================================

impl ItemReader for PgMarketStore {
    async fn find_by_id(&self, item_id: i64) -> MarketResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE item_id = $1"
        ))
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_item()))
    }

    async fn find_by_seller(&self, seller_id: i64) -> MarketResult<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            r#"
            SELECT {ITEM_COLUMNS} FROM items
            WHERE seller_id = $1
            ORDER BY created_at DESC, item_id DESC
            "#
        ))
        .bind(seller_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_item()).collect())
    }

    async fn search(&self, cond: &ItemSearch) -> MarketResult<Vec<Item>> {
        // Same semantics as ItemSearch::matches, expressed in SQL
        let mut query = QueryBuilder::new(format!("SELECT {ITEM_COLUMNS} FROM items WHERE TRUE"));

        if let Some(keyword) = &cond.keyword {
            let pattern = format!("%{}%", escape_like(keyword));
            query.push(" AND (title ILIKE ");
            query.push_bind(pattern.clone());
            query.push(" ESCAPE '\\' OR content ILIKE ");
            query.push_bind(pattern);
            query.push(" ESCAPE '\\')");
        }

        if !cond.regions.is_empty() {
            query.push(" AND region = ANY(");
            query.push_bind(&cond.regions);
            query.push(")");
        }

        if !cond.categories.is_empty() {
            query.push(" AND category = ANY(");
            query.push_bind(&cond.categories);
            query.push(")");
        }

        query.push(" ORDER BY created_at DESC, item_id DESC");

        let rows = query
            .build_query_as::<ItemRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into_item()).collect())
    }
}

impl ItemWriter for PgMarketStore {
    async fn save(&self, item: NewItem) -> MarketResult<Item> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            r#"
            INSERT INTO items (seller_id, title, content, price, region, category, thumbnail_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(item.seller_id)
        .bind(&item.title)
        .bind(&item.content)
        .bind(item.price)
        .bind(&item.region)
        .bind(&item.category)
        .bind(&item.thumbnail_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_item())
    }
}

/// Escape `%`, `_` and `\` so a keyword is matched literally inside the
/// ILIKE pattern.
fn escape_like(keyword: &str) -> String {
    keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

// ============================================================================
// Session Store Implementation
// ============================================================================

impl SessionStore for PgMarketStore {
    async fn create(&self, session: &Session) -> MarketResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (session_id, user_email, expires_at_ms, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(session.session_id)
        .bind(session.user_email.as_str())
        .bind(session.expires_at_ms)
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, session_id: Uuid) -> MarketResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT session_id, user_email, expires_at_ms, created_at
            FROM sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_session()))
    }

    async fn touch(&self, session: &Session) -> MarketResult<()> {
        sqlx::query("UPDATE sessions SET expires_at_ms = $2 WHERE session_id = $1")
            .bind(session.session_id)
            .bind(session.expires_at_ms)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> MarketResult<()> {
        sqlx::query("DELETE FROM sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> MarketResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM sessions WHERE expires_at_ms <= $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    email: String,
    password_hash: String,
    nickname: String,
    name: String,
    manner_temp: f64,
    profile_url: Option<String>,
}

impl UserRow {
    fn into_user(self) -> MarketResult<User> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| MarketError::Internal(format!("Invalid stored password hash: {}", e)))?;

        Ok(User {
            id: self.user_id,
            email: Email::from_db(self.email),
            password_hash,
            nickname: self.nickname,
            name: self.name,
            manner_temp: self.manner_temp,
            profile_url: self.profile_url,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    item_id: i64,
    seller_id: i64,
    title: String,
    content: String,
    price: i32,
    region: String,
    category: String,
    thumbnail_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl ItemRow {
    fn into_item(self) -> Item {
        Item {
            id: self.item_id,
            seller_id: self.seller_id,
            title: self.title,
            content: self.content,
            price: self.price,
            region: self.region,
            category: self.category,
            thumbnail_url: self.thumbnail_url,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    user_email: String,
    expires_at_ms: i64,
    created_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> Session {
        Session {
            session_id: self.session_id,
            user_email: Email::from_db(self.user_email),
            expires_at_ms: self.expires_at_ms,
            created_at: self.created_at,
        }
    }
}
