//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod create_item;
pub mod item_detail;
pub mod list_items;
pub mod login;
pub mod my_page;
pub mod session_token;
pub mod sign_up;

// Re-exports
pub use check_session::CheckSessionUseCase;
pub use config::MarketConfig;
pub use create_item::{CreateItemInput, CreateItemUseCase};
pub use item_detail::{ItemDetailOutput, ItemDetailUseCase};
pub use list_items::ListItemsUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use my_page::{MyPageOutput, MyPageUseCase};
pub use sign_up::{SignUpInput, SignUpUseCase};
