//! Infrastructure Layer
//!
//! Store implementations: Postgres for production, in-memory for tests.

pub mod memory;
pub mod postgres;

pub use memory::MemoryMarketStore;
pub use postgres::PgMarketStore;
