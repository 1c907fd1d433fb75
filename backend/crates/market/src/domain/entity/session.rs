//! Session Entity
//!
//! Server-side session row. The only attribute the application reads from
//! a session is the authenticated user's email (the session marker).

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::value_object::email::Email;

/// A server-side session keyed by an opaque id.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque identifier; the signed cookie token wraps this
    pub session_id: Uuid,
    /// The authenticated user's email
    pub user_email: Email,
    /// Inactivity expiry, refreshed on authenticated use
    pub expires_at_ms: i64,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a session expiring `ttl` from now.
    pub fn new(user_email: Email, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            session_id: Uuid::new_v4(),
            user_email,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at_ms <= Utc::now().timestamp_millis()
    }

    /// Refresh the inactivity expiry to `ttl` from now.
    pub fn touch(&mut self, ttl: Duration) {
        self.expires_at_ms = (Utc::now() + ttl).timestamp_millis();
    }
}
