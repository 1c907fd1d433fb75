//! Flow-level tests for the market crate, run against the in-memory store.

use std::sync::Arc;

use crate::application::{
    CheckSessionUseCase, CreateItemInput, CreateItemUseCase, ItemDetailUseCase, ListItemsUseCase,
    LoginInput, LoginUseCase, MarketConfig, MyPageUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::entity::item::ItemSearch;
use crate::domain::entity::user::{DEFAULT_MANNER_TEMP, User};
use crate::domain::repository::SessionStore;
use crate::error::MarketError;
use crate::infra::memory::MemoryMarketStore;

fn test_config() -> Arc<MarketConfig> {
    Arc::new(MarketConfig::development())
}

async fn sign_up(store: &Arc<MemoryMarketStore>, config: &Arc<MarketConfig>, email: &str, nickname: &str) {
    SignUpUseCase::new(store.clone(), config.clone())
        .execute(SignUpInput {
            email: email.to_string(),
            name: format!("{} name", nickname),
            password: "correct horse battery".to_string(),
            nickname: nickname.to_string(),
        })
        .await
        .unwrap();
}

async fn log_in(
    store: &Arc<MemoryMarketStore>,
    config: &Arc<MarketConfig>,
    email: &str,
    password: &str,
) -> Result<String, MarketError> {
    LoginUseCase::new(store.clone(), store.clone(), config.clone())
        .execute(LoginInput {
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
        .map(|out| out.session_token)
}

async fn current_user(
    store: &Arc<MemoryMarketStore>,
    config: &Arc<MarketConfig>,
    token: &str,
) -> Result<User, MarketError> {
    CheckSessionUseCase::new(store.clone(), store.clone(), config.clone())
        .execute(token)
        .await
}

async fn post_item(
    store: &Arc<MemoryMarketStore>,
    seller: &User,
    title: &str,
    region: &str,
    category: &str,
) -> i64 {
    CreateItemUseCase::new(store.clone())
        .execute(
            seller,
            CreateItemInput {
                title: title.to_string(),
                content: format!("{} description", title),
                price: 10_000,
                region: region.to_string(),
                category: category.to_string(),
                thumbnail_url: None,
            },
        )
        .await
        .unwrap()
        .id
}

// ============================================================================
// Auth flow
// ============================================================================

#[cfg(test)]
mod auth_tests {
    use super::*;

    #[tokio::test]
    async fn test_signup_then_login_roundtrip() {
        let store = Arc::new(MemoryMarketStore::new());
        let config = test_config();

        sign_up(&store, &config, "alice@example.com", "alice").await;

        let output = LoginUseCase::new(store.clone(), store.clone(), config.clone())
            .execute(LoginInput {
                email: "alice@example.com".to_string(),
                password: "correct horse battery".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(output.email.as_str(), "alice@example.com");
        assert_eq!(output.name, "alice name");

        // the token resolves back to the same user
        let user = current_user(&store, &config, &output.session_token)
            .await
            .unwrap();
        assert_eq!(user.email.as_str(), "alice@example.com");
        assert_eq!(user.manner_temp, DEFAULT_MANNER_TEMP);
    }

    #[tokio::test]
    async fn test_login_email_is_case_insensitive() {
        let store = Arc::new(MemoryMarketStore::new());
        let config = test_config();

        sign_up(&store, &config, "alice@example.com", "alice").await;

        let token = log_in(&store, &config, "Alice@Example.COM", "correct horse battery").await;
        assert!(token.is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = Arc::new(MemoryMarketStore::new());
        let config = test_config();

        sign_up(&store, &config, "alice@example.com", "alice").await;

        let err = SignUpUseCase::new(store.clone(), config.clone())
            .execute(SignUpInput {
                email: "alice@example.com".to_string(),
                name: "Other".to_string(),
                password: "different password".to_string(),
                nickname: "other".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, MarketError::DuplicateEmail));
    }

    #[tokio::test]
    async fn test_duplicate_nickname_rejected() {
        let store = Arc::new(MemoryMarketStore::new());
        let config = test_config();

        sign_up(&store, &config, "alice@example.com", "alice").await;

        let err = SignUpUseCase::new(store.clone(), config.clone())
            .execute(SignUpInput {
                email: "bob@example.com".to_string(),
                name: "Bob".to_string(),
                password: "different password".to_string(),
                nickname: "alice".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, MarketError::DuplicateNickname));
    }

    #[tokio::test]
    async fn test_credential_failures_are_indistinguishable() {
        let store = Arc::new(MemoryMarketStore::new());
        let config = test_config();

        sign_up(&store, &config, "alice@example.com", "alice").await;

        // wrong password for a real account
        let wrong_password = log_in(&store, &config, "alice@example.com", "nope nope nope")
            .await
            .unwrap_err();
        // unknown account entirely
        let unknown_email = log_in(&store, &config, "ghost@example.com", "nope nope nope")
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, MarketError::InvalidCredentials));
        assert!(matches!(unknown_email, MarketError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }
}

// ============================================================================
// Session flow
// ============================================================================

#[cfg(test)]
mod session_tests {
    use super::*;

    #[tokio::test]
    async fn test_garbage_token_rejected() {
        let store = Arc::new(MemoryMarketStore::new());
        let config = test_config();

        let err = current_user(&store, &config, "not-a-token").await.unwrap_err();
        assert!(matches!(err, MarketError::SessionInvalid));
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret_rejected() {
        let store = Arc::new(MemoryMarketStore::new());
        let config = test_config();

        sign_up(&store, &config, "alice@example.com", "alice").await;
        let token = log_in(&store, &config, "alice@example.com", "correct horse battery")
            .await
            .unwrap();

        let other_config = test_config();
        let err = current_user(&store, &other_config, &token).await.unwrap_err();
        assert!(matches!(err, MarketError::SessionInvalid));
    }

    #[tokio::test]
    async fn test_expired_session_rejected_and_reaped() {
        let store = Arc::new(MemoryMarketStore::new());
        let config = Arc::new(MarketConfig {
            session_ttl: std::time::Duration::ZERO,
            ..MarketConfig::development()
        });

        sign_up(&store, &config, "alice@example.com", "alice").await;
        let token = log_in(&store, &config, "alice@example.com", "correct horse battery")
            .await
            .unwrap();

        let err = current_user(&store, &config, &token).await.unwrap_err();
        assert!(matches!(err, MarketError::SessionInvalid));

        // lazily deleted, so a sweep finds nothing left
        assert_eq!(store.cleanup_expired().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_cleanup_removes_only_expired_sessions() {
        let store = Arc::new(MemoryMarketStore::new());
        let live_config = test_config();
        let dead_config = Arc::new(MarketConfig {
            session_ttl: std::time::Duration::ZERO,
            ..MarketConfig::development()
        });

        sign_up(&store, &live_config, "alice@example.com", "alice").await;
        let live = log_in(&store, &live_config, "alice@example.com", "correct horse battery")
            .await
            .unwrap();
        log_in(&store, &dead_config, "alice@example.com", "correct horse battery")
            .await
            .unwrap();

        assert_eq!(store.cleanup_expired().await.unwrap(), 1);
        assert!(current_user(&store, &live_config, &live).await.is_ok());
    }
}

// ============================================================================
// Item flow
// ============================================================================

#[cfg(test)]
mod item_tests {
    use super::*;

    async fn seller(store: &Arc<MemoryMarketStore>, config: &Arc<MarketConfig>) -> User {
        sign_up(store, config, "seller@example.com", "seller").await;
        let token = log_in(store, config, "seller@example.com", "correct horse battery")
            .await
            .unwrap();
        current_user(store, config, &token).await.unwrap()
    }

    #[tokio::test]
    async fn test_negative_price_rejected_zero_accepted() {
        let store = Arc::new(MemoryMarketStore::new());
        let config = test_config();
        let user = seller(&store, &config).await;

        let use_case = CreateItemUseCase::new(store.clone());

        let input = |price| CreateItemInput {
            title: "Free stuff".to_string(),
            content: "take it".to_string(),
            price,
            region: "Seoul".to_string(),
            category: "home".to_string(),
            thumbnail_url: None,
        };

        let err = use_case.execute(&user, input(-1)).await.unwrap_err();
        assert!(matches!(err, MarketError::Validation(_)));

        // zero is a valid giveaway price
        assert!(use_case.execute(&user, input(0)).await.is_ok());
    }

    #[tokio::test]
    async fn test_blank_text_fields_rejected() {
        let store = Arc::new(MemoryMarketStore::new());
        let config = test_config();
        let user = seller(&store, &config).await;

        let use_case = CreateItemUseCase::new(store.clone());

        // every text field is required, not just the title
        let blanks = [
            ("   ", "x", "Seoul"),
            ("take it", "", "Seoul"),
            ("take it", "x", "  "),
        ];
        for (content, region, category) in blanks {
            let err = use_case
                .execute(
                    &user,
                    CreateItemInput {
                        title: "Free stuff".to_string(),
                        content: content.to_string(),
                        price: 100,
                        region: region.to_string(),
                        category: category.to_string(),
                        thumbnail_url: None,
                    },
                )
                .await
                .unwrap_err();
            assert!(matches!(err, MarketError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_blank_title_rejected() {
        let store = Arc::new(MemoryMarketStore::new());
        let config = test_config();
        let user = seller(&store, &config).await;

        let err = CreateItemUseCase::new(store.clone())
            .execute(
                &user,
                CreateItemInput {
                    title: "   ".to_string(),
                    content: "x".to_string(),
                    price: 100,
                    region: "Seoul".to_string(),
                    category: "home".to_string(),
                    thumbnail_url: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, MarketError::Validation(_)));
    }

    #[tokio::test]
    async fn test_detail_returns_item_with_seller_profile() {
        let store = Arc::new(MemoryMarketStore::new());
        let config = test_config();
        let user = seller(&store, &config).await;

        let item_id = post_item(&store, &user, "Mountain bike", "Seoul", "sports").await;

        let detail = ItemDetailUseCase::new(store.clone(), store.clone())
            .execute(item_id)
            .await
            .unwrap();

        assert_eq!(detail.item.title, "Mountain bike");
        assert_eq!(detail.seller.nickname, "seller");
        assert_eq!(detail.seller.manner_temp, DEFAULT_MANNER_TEMP);
    }

    #[tokio::test]
    async fn test_detail_unknown_item_is_not_found() {
        let store = Arc::new(MemoryMarketStore::new());

        let err = ItemDetailUseCase::new(store.clone(), store.clone())
            .execute(999)
            .await
            .unwrap_err();

        assert!(matches!(err, MarketError::ItemNotFound));
    }

    #[tokio::test]
    async fn test_listing_is_newest_first() {
        let store = Arc::new(MemoryMarketStore::new());
        let config = test_config();
        let user = seller(&store, &config).await;

        let first = post_item(&store, &user, "first", "Seoul", "home").await;
        let second = post_item(&store, &user, "second", "Seoul", "home").await;
        let third = post_item(&store, &user, "third", "Seoul", "home").await;

        let items = ListItemsUseCase::new(store.clone())
            .execute(ItemSearch::default())
            .await
            .unwrap();

        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![third, second, first]);
    }

    #[tokio::test]
    async fn test_search_filters_compose() {
        let store = Arc::new(MemoryMarketStore::new());
        let config = test_config();
        let user = seller(&store, &config).await;

        let bike_seoul = post_item(&store, &user, "Mountain Bike", "Seoul", "sports").await;
        let bike_busan = post_item(&store, &user, "Road bike", "Busan", "sports").await;
        post_item(&store, &user, "Desk lamp", "Seoul", "home").await;

        let use_case = ListItemsUseCase::new(store.clone());

        // keyword alone, case-insensitive
        let found = use_case
            .execute(ItemSearch {
                keyword: Some("bike".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 2);

        // keyword + region narrows further
        let found = use_case
            .execute(ItemSearch {
                keyword: Some("BIKE".to_string()),
                regions: vec!["Seoul".to_string()],
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, bike_seoul);

        // several regions widen the region filter
        let found = use_case
            .execute(ItemSearch {
                keyword: Some("bike".to_string()),
                regions: vec!["Seoul".to_string(), "Busan".to_string()],
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, bike_busan); // newest first

        // no match at all
        let found = use_case
            .execute(ItemSearch {
                keyword: Some("piano".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(found.is_empty());
    }
}

// ============================================================================
// My page flow
// ============================================================================

#[cfg(test)]
mod my_page_tests {
    use super::*;

    #[tokio::test]
    async fn test_my_page_lists_only_own_items_newest_first() {
        let store = Arc::new(MemoryMarketStore::new());
        let config = test_config();

        sign_up(&store, &config, "a@example.com", "anna").await;
        sign_up(&store, &config, "b@example.com", "ben").await;

        let token_a = log_in(&store, &config, "a@example.com", "correct horse battery")
            .await
            .unwrap();
        let token_b = log_in(&store, &config, "b@example.com", "correct horse battery")
            .await
            .unwrap();
        let anna = current_user(&store, &config, &token_a).await.unwrap();
        let ben = current_user(&store, &config, &token_b).await.unwrap();

        let anna_first = post_item(&store, &anna, "Bike", "Seoul", "sports").await;
        post_item(&store, &ben, "Lamp", "Busan", "home").await;
        let anna_second = post_item(&store, &anna, "Chair", "Seoul", "home").await;

        let page = MyPageUseCase::new(store.clone())
            .execute(anna.clone())
            .await
            .unwrap();

        assert_eq!(page.user.nickname, "anna");
        let ids: Vec<i64> = page.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![anna_second, anna_first]);
    }

    #[tokio::test]
    async fn test_my_page_with_no_items_is_empty() {
        let store = Arc::new(MemoryMarketStore::new());
        let config = test_config();

        sign_up(&store, &config, "a@example.com", "anna").await;
        let token = log_in(&store, &config, "a@example.com", "correct horse battery")
            .await
            .unwrap();
        let anna = current_user(&store, &config, &token).await.unwrap();

        let page = MyPageUseCase::new(store.clone()).execute(anna).await.unwrap();
        assert!(page.items.is_empty());
    }
}

// ============================================================================
// HTTP surface
// ============================================================================

#[cfg(test)]
mod http_tests {
    use super::*;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::presentation::market_router_generic;

    fn app() -> Router {
        market_router_generic(MemoryMarketStore::new(), MarketConfig::development())
    }

    fn post_json(uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Sign up + log in through the router; returns the session cookie pair.
    async fn login_session(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(post_json(
                "/auth/signup",
                json!({
                    "email": "anna@example.com",
                    "name": "Anna",
                    "password": "correct horse battery",
                    "nickname": "anna",
                }),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(post_json(
                "/auth/login",
                json!({
                    "email": "anna@example.com",
                    "password": "correct horse battery",
                }),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        // keep only the name=value pair
        set_cookie.split(';').next().unwrap().to_string()
    }

    async fn post_item_http(app: &Router, cookie: &str, title: &str, region: &str) {
        let response = app
            .clone()
            .oneshot(post_json(
                "/items",
                json!({
                    "title": title,
                    "content": format!("{} description", title),
                    "price": 1000,
                    "region": region,
                    "category": "sports",
                }),
                Some(cookie),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_success_envelope_always_carries_a_message() {
        let app = app();
        let cookie = login_session(&app).await;
        post_item_http(&app, &cookie, "Bike", "Seoul").await;

        let listing = body_json(app.clone().oneshot(get("/items", None)).await.unwrap()).await;
        assert_eq!(listing["result"], true);
        assert!(listing["message"].is_string());

        let detail = body_json(
            app.clone()
                .oneshot(get(
                    &format!("/items/{}", listing["data"][0]["itemId"]),
                    None,
                ))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(detail["result"], true);
        assert!(detail["message"].is_string());

        let my_page = body_json(
            app.clone()
                .oneshot(get("/user/mypage", Some(&cookie)))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(my_page["result"], true);
        assert!(my_page["message"].is_string());
    }

    #[tokio::test]
    async fn test_my_page_payload_includes_user_id() {
        let app = app();
        let cookie = login_session(&app).await;

        let my_page = body_json(
            app.clone()
                .oneshot(get("/user/mypage", Some(&cookie)))
                .await
                .unwrap(),
        )
        .await;

        assert!(my_page["data"]["userId"].is_i64());
        assert_eq!(my_page["data"]["nickname"], "anna");
    }

    #[tokio::test]
    async fn test_repeated_region_keys_widen_the_filter() {
        let app = app();
        let cookie = login_session(&app).await;
        post_item_http(&app, &cookie, "Mountain bike", "Seoul").await;
        post_item_http(&app, &cookie, "Road bike", "Busan").await;
        post_item_http(&app, &cookie, "Kayak", "Incheon").await;

        let one = body_json(
            app.clone()
                .oneshot(get("/items?regions=Seoul", None))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(one["data"].as_array().unwrap().len(), 1);

        // repeated keys, as the query-string form of a list
        let two = body_json(
            app.clone()
                .oneshot(get("/items?regions=Seoul&regions=Busan", None))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(two["data"].as_array().unwrap().len(), 2);

        // CSV still works inside a single key
        let csv = body_json(
            app.clone()
                .oneshot(get("/items?regions=Seoul,Busan", None))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(csv["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_protected_route_without_cookie_is_unauthorized() {
        let app = app();

        let response = app
            .clone()
            .oneshot(get("/user/mypage", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["result"], false);
        assert!(body["data"].is_null());
    }
}
