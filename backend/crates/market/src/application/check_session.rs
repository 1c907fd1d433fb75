//! Check Session Use Case
//!
//! Resolves a session cookie token to the authenticated user, sliding the
//! inactivity expiry forward on each successful check.

use std::sync::Arc;

use crate::application::config::MarketConfig;
use crate::application::session_token;
use crate::domain::entity::user::User;
use crate::domain::repository::{SessionStore, UserReader};
use crate::error::{MarketError, MarketResult};

/// Check session use case
pub struct CheckSessionUseCase<U, S>
where
    U: UserReader,
    S: SessionStore,
{
    user_reader: Arc<U>,
    sessions: Arc<S>,
    config: Arc<MarketConfig>,
}

impl<U, S> CheckSessionUseCase<U, S>
where
    U: UserReader,
    S: SessionStore,
{
    pub fn new(user_reader: Arc<U>, sessions: Arc<S>, config: Arc<MarketConfig>) -> Self {
        Self {
            user_reader,
            sessions,
            config,
        }
    }

    /// Resolve a cookie token to its user.
    ///
    /// Every failure mode (bad signature, unknown id, expired session,
    /// vanished user) collapses into `SessionInvalid` so the response
    /// never says which check failed.
    pub async fn execute(&self, token: &str) -> MarketResult<User> {
        let session_id = session_token::verify(&self.config.session_secret, token)
            .ok_or(MarketError::SessionInvalid)?;

        let mut session = self
            .sessions
            .find(session_id)
            .await?
            .ok_or(MarketError::SessionInvalid)?;

        if session.is_expired() {
            // Lazily reap; the startup sweep catches the rest
            if let Err(e) = self.sessions.delete(session_id).await {
                tracing::warn!(error = %e, "Failed to delete expired session");
            }
            return Err(MarketError::SessionInvalid);
        }

        let user = self
            .user_reader
            .find_by_email(&session.user_email)
            .await?
            .ok_or(MarketError::SessionInvalid)?;

        // Slide the inactivity window. Failure here must not fail the
        // request; the session is still valid until its old expiry.
        session.touch(self.config.session_ttl_chrono());
        if let Err(e) = self.sessions.touch(&session).await {
            tracing::warn!(error = %e, "Failed to refresh session expiry");
        }

        Ok(user)
    }
}
