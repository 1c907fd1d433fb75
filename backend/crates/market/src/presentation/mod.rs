//! Presentation Layer
//!
//! HTTP surface: request/response DTOs, the session extractor, handlers
//! and the router.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod router;

pub use extract::AuthenticatedUser;
pub use handlers::MarketAppState;
pub use router::{market_router, market_router_generic};
