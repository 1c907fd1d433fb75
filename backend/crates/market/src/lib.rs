//! Market Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, store traits
//! - `application/` - Use cases and application services
//! - `infra/` - Postgres store and in-memory fake
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - User signup/login with email + password, server-side sessions
//! - Item listing with keyword/region/category search
//! - Item detail enriched with seller summary
//! - Seller-scoped "my page" profile aggregation
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never echoed back
//! - Session cookie carries an HMAC-signed opaque session id
//! - One-hour inactivity expiry, refreshed on authenticated use
//! - Caller identity threads through flows as an explicit parameter

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::MarketConfig;
pub use error::{MarketError, MarketResult};
pub use infra::postgres::PgMarketStore;
pub use presentation::router::market_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
