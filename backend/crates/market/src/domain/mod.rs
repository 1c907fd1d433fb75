//! Domain Layer
//!
//! Contains entities, value objects, and store traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    item::{Item, ItemSearch, NewItem},
    session::Session,
    user::{NewUser, User},
};
pub use repository::{ItemReader, ItemWriter, SessionStore, UserReader, UserWriter};
pub use value_object::email::Email;
