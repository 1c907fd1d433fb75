//! User Entity
//!
//! A registered account: login identity plus the public profile fields the
//! item and my-page flows read through the seller relation.

use platform::password::HashedPassword;

use crate::domain::value_object::email::Email;

/// Default reputation score for new accounts
pub const DEFAULT_MANNER_TEMP: f64 = 36.5;

/// User row as stored, with its database-assigned id.
#[derive(Debug, Clone)]
pub struct User {
    /// Surrogate id, assigned by the store on insert
    pub id: i64,
    /// Login identifier, unique
    pub email: Email,
    /// Argon2id PHC string, never exposed outside the login flow
    pub password_hash: HashedPassword,
    /// Public handle, unique (storage constraint)
    pub nickname: String,
    /// Display name
    pub name: String,
    /// Reputation score, starts at 36.5
    pub manner_temp: f64,
    /// Optional profile image reference
    pub profile_url: Option<String>,
}

/// Draft for a user about to be inserted. `UserWriter::save` consumes it
/// and returns the stored [`User`] with its assigned id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password_hash: HashedPassword,
    pub nickname: String,
    pub name: String,
    pub manner_temp: f64,
    pub profile_url: Option<String>,
}

impl NewUser {
    /// Create a sign-up draft with the default manner temperature.
    pub fn new(email: Email, name: String, password_hash: HashedPassword, nickname: String) -> Self {
        Self {
            email,
            password_hash,
            nickname,
            name,
            manner_temp: DEFAULT_MANNER_TEMP,
            profile_url: None,
        }
    }
}
