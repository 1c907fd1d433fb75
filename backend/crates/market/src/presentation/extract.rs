//! Session Extractor
//!
//! Handlers that need an identity take `AuthenticatedUser` as a parameter;
//! the extractor resolves the session cookie before the handler body runs.
//! Public handlers simply do not declare it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use platform::cookie::extract_cookie;

use crate::application::CheckSessionUseCase;
use crate::domain::entity::user::User;
use crate::domain::repository::{ItemReader, ItemWriter, SessionStore, UserReader, UserWriter};
use crate::error::MarketError;
use crate::presentation::handlers::MarketAppState;

/// The caller's identity, resolved from the session cookie.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl<R> FromRequestParts<MarketAppState<R>> for AuthenticatedUser
where
    R: UserReader + UserWriter + ItemReader + ItemWriter + SessionStore + Send + Sync + 'static,
{
    type Rejection = MarketError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &MarketAppState<R>,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_cookie(&parts.headers, &state.config.session_cookie_name)
            .ok_or(MarketError::SessionInvalid)?;

        let use_case =
            CheckSessionUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
        let user = use_case.execute(&token).await?;

        Ok(AuthenticatedUser(user))
    }
}
