//! Request/Response DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{CreateItemInput, ItemDetailOutput, LoginInput, MyPageOutput, SignUpInput};
use crate::domain::entity::item::{Item, ItemSearch};
use crate::error::{MarketError, MarketResult};

/// Timestamp rendering used across item payloads (minute precision)
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl From<LoginRequest> for LoginInput {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
        }
    }
}

/// Login reply. Only public identity fields; never the password, not even
/// hashed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub nickname: String,
}

impl SignUpRequest {
    pub fn validate(&self) -> MarketResult<()> {
        if self.name.trim().is_empty() {
            return Err(MarketError::Validation("name must not be empty".into()));
        }
        if self.nickname.trim().is_empty() {
            return Err(MarketError::Validation("nickname must not be empty".into()));
        }
        Ok(())
    }
}

impl From<SignUpRequest> for SignUpInput {
    fn from(req: SignUpRequest) -> Self {
        Self {
            email: req.email,
            name: req.name,
            password: req.password,
            nickname: req.nickname,
        }
    }
}

// ============================================================================
// Items
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCreateRequest {
    pub title: String,
    pub content: String,
    pub price: i32,
    pub region: String,
    pub category: String,
    pub thumbnail_url: Option<String>,
}

impl From<ItemCreateRequest> for CreateItemInput {
    fn from(req: ItemCreateRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            price: req.price,
            region: req.region,
            category: req.category,
            thumbnail_url: req.thumbnail_url,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCreateResponse {
    pub item_id: i64,
}

/// Listing query parameters. `regions` and `categories` accept repeated
/// keys (`?regions=Seoul&regions=Busan`) via `axum_extra::extract::Query`;
/// each value may itself be a comma-separated list.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemQuery {
    pub keyword: Option<String>,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

fn split_csv(raw: Vec<String>) -> Vec<String> {
    raw.iter()
        .flat_map(|s| s.split(','))
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

impl ItemQuery {
    pub fn into_search(self) -> ItemSearch {
        let keyword = self
            .keyword
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        ItemSearch {
            keyword,
            regions: split_csv(self.regions),
            categories: split_csv(self.categories),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummaryResponse {
    pub item_id: i64,
    pub title: String,
    pub price: i32,
    pub region: String,
    pub category: String,
    pub thumbnail_url: Option<String>,
    pub created_at: String,
}

impl From<&Item> for ItemSummaryResponse {
    fn from(item: &Item) -> Self {
        Self {
            item_id: item.id,
            title: item.title.clone(),
            price: item.price,
            region: item.region.clone(),
            category: item.category.clone(),
            thumbnail_url: item.thumbnail_url.clone(),
            created_at: format_timestamp(item.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetailResponse {
    pub item_id: i64,
    pub title: String,
    pub content: String,
    pub price: i32,
    pub region: String,
    pub category: String,
    pub thumbnail_url: Option<String>,
    pub created_at: String,
    pub seller_nickname: String,
    pub seller_manner_temp: f64,
    pub seller_profile_url: Option<String>,
}

impl From<ItemDetailOutput> for ItemDetailResponse {
    fn from(output: ItemDetailOutput) -> Self {
        let ItemDetailOutput { item, seller } = output;
        Self {
            item_id: item.id,
            title: item.title,
            content: item.content,
            price: item.price,
            region: item.region,
            category: item.category,
            thumbnail_url: item.thumbnail_url,
            created_at: format_timestamp(item.created_at),
            seller_nickname: seller.nickname,
            seller_manner_temp: seller.manner_temp,
            seller_profile_url: seller.profile_url,
        }
    }
}

// ============================================================================
// My Page
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyPageResponse {
    pub user_id: i64,
    pub email: String,
    pub name: String,
    pub nickname: String,
    pub manner_temp: f64,
    pub profile_url: Option<String>,
    pub items: Vec<ItemSummaryResponse>,
}

impl From<MyPageOutput> for MyPageResponse {
    fn from(output: MyPageOutput) -> Self {
        let items = output.items.iter().map(ItemSummaryResponse::from).collect();
        let user = output.user;
        Self {
            user_id: user.id,
            email: user.email.into_string(),
            name: user.name,
            nickname: user.nickname,
            manner_temp: user.manner_temp,
            profile_url: user.profile_url,
            items,
        }
    }
}
