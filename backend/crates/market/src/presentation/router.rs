//! Market Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::MarketConfig;
use crate::domain::repository::{ItemReader, ItemWriter, SessionStore, UserReader, UserWriter};
use crate::infra::postgres::PgMarketStore;
use crate::presentation::handlers::{self, MarketAppState};

/// Create the market router with the PostgreSQL store
pub fn market_router(store: PgMarketStore, config: MarketConfig) -> Router {
    market_router_generic(store, config)
}

/// Create a market router for any store implementation
pub fn market_router_generic<R>(store: R, config: MarketConfig) -> Router
where
    R: UserReader + UserWriter + ItemReader + ItemWriter + SessionStore + Send + Sync + 'static,
{
    let state = MarketAppState {
        repo: Arc::new(store),
        config: Arc::new(config),
    };

    Router::new()
        .route("/auth/signup", post(handlers::sign_up::<R>))
        .route("/auth/login", post(handlers::login::<R>))
        .route(
            "/items",
            get(handlers::list_items::<R>).post(handlers::create_item::<R>),
        )
        .route("/items/{item_id}", get(handlers::item_detail::<R>))
        .route("/user/mypage", get(handlers::my_page::<R>))
        .with_state(state)
}
