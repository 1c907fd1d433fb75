//! Login Use Case
//!
//! Authenticates a user by email and password and creates a session.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::MarketConfig;
use crate::application::session_token;
use crate::domain::entity::session::Session;
use crate::domain::repository::{SessionStore, UserReader};
use crate::domain::value_object::email::Email;
use crate::error::{MarketError, MarketResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    /// Authenticated email
    pub email: Email,
    /// Display name
    pub name: String,
    /// Signed token for the session cookie
    pub session_token: String,
}

/// Login use case
pub struct LoginUseCase<U, S>
where
    U: UserReader,
    S: SessionStore,
{
    user_reader: Arc<U>,
    sessions: Arc<S>,
    config: Arc<MarketConfig>,
}

impl<U, S> LoginUseCase<U, S>
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

    pub async fn execute(&self, input: LoginInput) -> MarketResult<LoginOutput> {
        // Any parse failure is a credential failure; which part failed must
        // not be observable
        let email = Email::new(&input.email).map_err(|_| MarketError::InvalidCredentials)?;
        let password =
            ClearTextPassword::new(input.password).map_err(|_| MarketError::InvalidCredentials)?;

        let user = match self.user_reader.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                // Burn roughly the cost of a verification so an unknown
                // email is not distinguishable by timing either
                let _ = password.hash(self.config.pepper());
                return Err(MarketError::InvalidCredentials);
            }
        };

        if !user.password_hash.verify(&password, self.config.pepper()) {
            return Err(MarketError::InvalidCredentials);
        }

        // Establish the session marker: email bound to a fresh session id
        // with a one-hour inactivity expiry
        let session = Session::new(user.email.clone(), self.config.session_ttl_chrono());
        self.sessions.create(&session).await?;

        let session_token = session_token::sign(&self.config.session_secret, session.session_id);

        tracing::info!(
            user_id = user.id,
            session_id = %session.session_id,
            "User logged in"
        );

        Ok(LoginOutput {
            email: user.email,
            name: user.name,
            session_token,
        })
    }
}
