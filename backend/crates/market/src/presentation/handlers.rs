//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
// axum's own Query drops repeated keys; this one collects them into Vecs
use axum_extra::extract::Query;
use std::sync::Arc;

use kernel::response::ApiResponse;

use crate::application::config::MarketConfig;
use crate::application::{
    CreateItemUseCase, ItemDetailUseCase, ListItemsUseCase, LoginUseCase, MyPageUseCase,
    SignUpUseCase,
};
use crate::domain::repository::{ItemReader, ItemWriter, SessionStore, UserReader, UserWriter};
use crate::error::MarketResult;
use crate::presentation::dto::{
    ItemCreateRequest, ItemCreateResponse, ItemDetailResponse, ItemQuery, ItemSummaryResponse,
    LoginRequest, LoginResponse, MyPageResponse, SignUpRequest,
};
use crate::presentation::extract::AuthenticatedUser;

/// Shared state for market handlers
pub struct MarketAppState<R>
where
    R: UserReader + UserWriter + ItemReader + ItemWriter + SessionStore + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<MarketConfig>,
}

// Manual impl: the store itself need not be Clone behind the Arc
impl<R> Clone for MarketAppState<R>
where
    R: UserReader + UserWriter + ItemReader + ItemWriter + SessionStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Auth
// ============================================================================

/// POST /auth/signup
pub async fn sign_up<R>(
    State(state): State<MarketAppState<R>>,
    Json(req): Json<SignUpRequest>,
) -> MarketResult<Json<ApiResponse<String>>>
where
    R: UserReader + UserWriter + ItemReader + ItemWriter + SessionStore + Send + Sync + 'static,
{
    req.validate()?;

    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());
    let email = use_case.execute(req.into()).await?;

    Ok(Json(ApiResponse::success(
        "Sign up successful",
        email.into_string(),
    )))
}

/// POST /auth/login
pub async fn login<R>(
    State(state): State<MarketAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> MarketResult<impl IntoResponse>
where
    R: UserReader + UserWriter + ItemReader + ItemWriter + SessionStore + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let output = use_case.execute(req.into()).await?;

    let cookie = state
        .config
        .session_cookie()
        .build_set_cookie(&output.session_token);

    let body = ApiResponse::success(
        "Login successful",
        LoginResponse {
            email: output.email.into_string(),
            name: output.name,
        },
    );

    Ok(([(header::SET_COOKIE, cookie)], Json(body)))
}

// ============================================================================
// Items
// ============================================================================

/// GET /items
pub async fn list_items<R>(
    State(state): State<MarketAppState<R>>,
    Query(query): Query<ItemQuery>,
) -> MarketResult<Json<ApiResponse<Vec<ItemSummaryResponse>>>>
where
    R: UserReader + UserWriter + ItemReader + ItemWriter + SessionStore + Send + Sync + 'static,
{
    let use_case = ListItemsUseCase::new(state.repo.clone());
    let items = use_case.execute(query.into_search()).await?;

    let body: Vec<ItemSummaryResponse> = items.iter().map(ItemSummaryResponse::from).collect();

    Ok(Json(ApiResponse::success("Items retrieved", body)))
}

/// GET /items/{item_id}
pub async fn item_detail<R>(
    State(state): State<MarketAppState<R>>,
    Path(item_id): Path<i64>,
) -> MarketResult<Json<ApiResponse<ItemDetailResponse>>>
where
    R: UserReader + UserWriter + ItemReader + ItemWriter + SessionStore + Send + Sync + 'static,
{
    let use_case = ItemDetailUseCase::new(state.repo.clone(), state.repo.clone());
    let output = use_case.execute(item_id).await?;

    Ok(Json(ApiResponse::success("Item detail retrieved", output.into())))
}

/// POST /items
pub async fn create_item<R>(
    State(state): State<MarketAppState<R>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(req): Json<ItemCreateRequest>,
) -> MarketResult<Json<ApiResponse<ItemCreateResponse>>>
where
    R: UserReader + UserWriter + ItemReader + ItemWriter + SessionStore + Send + Sync + 'static,
{
    let use_case = CreateItemUseCase::new(state.repo.clone());
    let item = use_case.execute(&user, req.into()).await?;

    Ok(Json(ApiResponse::success(
        "Item registered",
        ItemCreateResponse { item_id: item.id },
    )))
}

// ============================================================================
// My Page
// ============================================================================

/// GET /user/mypage
pub async fn my_page<R>(
    State(state): State<MarketAppState<R>>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> MarketResult<Json<ApiResponse<MyPageResponse>>>
where
    R: UserReader + UserWriter + ItemReader + ItemWriter + SessionStore + Send + Sync + 'static,
{
    let use_case = MyPageUseCase::new(state.repo.clone());
    let output = use_case.execute(user).await?;

    Ok(Json(ApiResponse::success("My page retrieved", output.into())))
}
