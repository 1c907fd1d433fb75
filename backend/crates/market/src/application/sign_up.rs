//! Sign Up Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::MarketConfig;
use crate::domain::entity::user::NewUser;
use crate::domain::repository::{UserReader, UserWriter};
use crate::domain::value_object::email::Email;
use crate::error::{MarketError, MarketResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub name: String,
    pub password: String,
    pub nickname: String,
}

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: UserReader + UserWriter,
{
    repo: Arc<R>,
    config: Arc<MarketConfig>,
}

impl<R> SignUpUseCase<R>
where
    R: UserReader + UserWriter,
{
    pub fn new(repo: Arc<R>, config: Arc<MarketConfig>) -> Self {
        Self { repo, config }
    }

    /// Register the account and return its email (the only field echoed
    /// back to the client).
    pub async fn execute(&self, input: SignUpInput) -> MarketResult<Email> {
        let email = Email::new(&input.email)?;

        // Fast path only. The unique constraint on users.email is what
        // actually closes the check-then-insert race; a constraint
        // violation from save() maps to the same DuplicateEmail error.
        if self.repo.exists_by_email(&email).await? {
            return Err(MarketError::DuplicateEmail);
        }

        let password = ClearTextPassword::new(input.password)
            .map_err(|e| MarketError::Validation(e.to_string()))?;
        let password_hash = password.hash(self.config.pepper())?;

        let user = self
            .repo
            .save(NewUser::new(email, input.name, password_hash, input.nickname))
            .await?;

        tracing::info!(user_id = user.id, "User signed up");

        Ok(user.email)
    }
}
