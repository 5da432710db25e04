//! Tests for the proxy actions behind the action endpoints.

use axum::http::{Method, StatusCode};
use integration_tests::{
    fixtures,
    setup::{TestContext, TEST_CLIENT_ID},
};
use serde_json::{json, Value};
use shop_core::Resource;

/// Every outbound call carries the configured Client-Id
#[tokio::test]
async fn test_client_id_sent_on_every_call() {
    let ctx = TestContext::new().await;
    ctx.api.respond(Method::GET, "/posts", json!({ "ok": 1, "item": [] }));
    let server = ctx.server();
    let (name, value) = fixtures::session_cookie(fixtures::user(4, "token-4"));

    server.get("/magazine/1").await;
    server.get("/community").await;
    server.get("/shop/products/2").await;
    server.get("/my-page").add_header(name.clone(), value.clone()).await;
    server
        .post("/actions/bookmarks")
        .add_header(name, value)
        .json(&json!({ "type": "product", "target_id": 2 }))
        .await;

    let requests = ctx.api.requests();
    assert!(requests.len() >= 5);
    for request in requests {
        assert_eq!(
            request.client_id.as_deref(),
            Some(TEST_CLIENT_ID),
            "{} {} missing Client-Id",
            request.method,
            request.path
        );
    }
}

#[tokio::test]
async fn test_actions_require_sign_in() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    let posts = server
        .post("/actions/posts")
        .json(&json!({ "title": "제목", "content": "내용" }))
        .await;
    posts.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = posts.json();
    assert_eq!(body["code"], "AUTH_001");

    server
        .post("/actions/bookmarks")
        .json(&json!({ "type": "product", "target_id": 1 }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    server
        .post("/actions/activity")
        .json(&json!({ "interaction": "click" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    assert!(ctx.api.requests().is_empty());
}

/// Creating a post sends it as the user and refreshes the listing
#[tokio::test]
async fn test_create_post_revalidates_community() {
    let ctx = TestContext::new().await;
    ctx.api.respond(Method::GET, "/posts", json!({ "ok": 1, "item": [] }));
    ctx.api.respond(
        Method::POST,
        "/posts",
        fixtures::ok(fixtures::post(8, "community", "새 식구")),
    );
    let server = ctx.server();
    let (name, value) = fixtures::session_cookie(fixtures::user(4, "token-4"));

    server.get("/community").await.assert_status_ok();
    server.get("/community").await.assert_status_ok();
    assert_eq!(ctx.api.requests_to(&Method::GET, "/posts").len(), 1);

    let response = server
        .post("/actions/posts")
        .add_header(name, value)
        .json(&json!({ "title": "  새 식구  ", "content": "고무나무를 들였어요", "category": "show" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ok"], 1);
    assert_eq!(body["item"]["_id"], 8);

    let created = ctx.api.requests_to(&Method::POST, "/posts");
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].authorization.as_deref(), Some("Bearer token-4"));
    assert_eq!(
        created[0].body,
        Some(json!({
            "type": "community",
            "title": "새 식구",
            "content": "고무나무를 들였어요",
            "extra": { "category": "show" }
        }))
    );

    server.get("/community").await.assert_status_ok();
    assert_eq!(ctx.api.requests_to(&Method::GET, "/posts").len(), 2);
}

#[tokio::test]
async fn test_create_post_rejects_blank_title() {
    let ctx = TestContext::new().await;
    let server = ctx.server();
    let (name, value) = fixtures::session_cookie(fixtures::user(4, "token-4"));

    let response = server
        .post("/actions/posts")
        .add_header(name, value)
        .json(&json!({ "title": "   ", "content": "내용" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALID_001");
    assert!(ctx.api.requests_to(&Method::POST, "/posts").is_empty());
}

/// No existing bookmark: the toggle adds one
#[tokio::test]
async fn test_toggle_bookmark_adds() {
    let ctx = TestContext::new().await;
    ctx.api.respond(
        Method::POST,
        "/bookmarks/product",
        fixtures::ok(json!({ "_id": 100, "target_id": 7 })),
    );
    let server = ctx.server();
    let (name, value) = fixtures::session_cookie(fixtures::user(4, "token-4"));

    let response = server
        .post("/actions/bookmarks")
        .add_header(name, value)
        .json(&json!({ "type": "product", "target_id": 7 }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["bookmarked"], true);
    assert_eq!(body["response"]["item"]["_id"], 100);

    assert_eq!(ctx.api.requests_to(&Method::GET, "/bookmarks/product/7").len(), 1);
    let added = ctx.api.requests_to(&Method::POST, "/bookmarks/product");
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].body, Some(json!({ "target_id": 7 })));
    assert_eq!(added[0].authorization.as_deref(), Some("Bearer token-4"));
    assert!(ctx
        .api
        .requests()
        .iter()
        .all(|r| r.method != Method::DELETE));
}

/// Existing bookmark: the toggle removes it and refreshes the product page
#[tokio::test]
async fn test_toggle_bookmark_removes_and_revalidates() {
    let ctx = TestContext::new().await;
    ctx.api.respond(
        Method::GET,
        "/products/7",
        fixtures::ok(fixtures::product(7, "스투키")),
    );
    ctx.api.respond(
        Method::GET,
        "/bookmarks/product/7",
        fixtures::ok(json!({ "_id": 99, "target_id": 7 })),
    );
    ctx.api.respond(Method::DELETE, "/bookmarks/99", json!({ "ok": 1 }));
    let server = ctx.server();
    let (name, value) = fixtures::session_cookie(fixtures::user(4, "token-4"));

    server.get("/shop/products/7").await.assert_status_ok();
    server.get("/shop/products/7").await.assert_status_ok();
    assert_eq!(ctx.api.requests_to(&Method::GET, "/products/7").len(), 1);

    let response = server
        .post("/actions/bookmarks")
        .add_header(name, value)
        .json(&json!({ "type": "product", "target_id": 7 }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["bookmarked"], false);
    assert_eq!(body["response"]["ok"], 1);

    assert_eq!(ctx.api.requests_to(&Method::DELETE, "/bookmarks/99").len(), 1);
    assert!(ctx.api.requests_to(&Method::POST, "/bookmarks/product").is_empty());

    server.get("/shop/products/7").await.assert_status_ok();
    assert_eq!(ctx.api.requests_to(&Method::GET, "/products/7").len(), 2);
}

/// A rejected change leaves the bookmark state and the cache alone
#[tokio::test]
async fn test_toggle_bookmark_rejected() {
    let ctx = TestContext::new().await;
    ctx.api.respond(
        Method::GET,
        "/posts/3",
        fixtures::ok(fixtures::post(3, "magazine", "관엽식물 가이드")),
    );
    let server = ctx.server();
    let (name, value) = fixtures::session_cookie(fixtures::user(4, "token-4"));

    server.get("/curation/3").await.assert_status_ok();

    let response = server
        .post("/actions/bookmarks")
        .add_header(name, value)
        .json(&json!({ "type": "post", "target_id": 3 }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["bookmarked"], false);
    assert_eq!(body["response"]["ok"], 0);

    server.get("/curation/3").await.assert_status_ok();
    assert_eq!(ctx.api.requests_to(&Method::GET, "/posts/3").len(), 1);
}

#[tokio::test]
async fn test_toggle_bookmark_network_failure() {
    let ctx = TestContext::unreachable().await;
    let server = ctx.server();
    let (name, value) = fixtures::session_cookie(fixtures::user(4, "token-4"));

    let response = server
        .post("/actions/bookmarks")
        .add_header(name, value)
        .json(&json!({ "type": "post", "target_id": 3 }))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["code"], "NET_001");
    assert_eq!(body["error"], Resource::Bookmarks.network_message());
}

/// The action hands back the API's envelope exactly as sent
#[tokio::test]
async fn test_fetch_magazine_detail_returns_envelope() {
    let ctx = TestContext::new().await;
    let envelope = fixtures::ok(fixtures::post(42, "magazine", "겨울철 물주기"));
    ctx.api.respond(Method::GET, "/posts/42", envelope.clone());

    let response = api::actions::fetch_magazine_detail(&ctx.state.client, 42)
        .await
        .expect("Magazine fetch failed");

    assert!(response.is_ok());
    assert_eq!(serde_json::to_value(&response).unwrap(), envelope);
}

/// Transport failures surface as the fixed message, never the raw error
#[tokio::test]
async fn test_fetch_magazine_detail_network_error() {
    let ctx = TestContext::unreachable().await;

    let err = api::actions::fetch_magazine_detail(&ctx.state.client, 42)
        .await
        .unwrap_err();

    assert!(err.is_network());
    assert_eq!(err.to_string(), Resource::Magazine.network_message());
    assert!(!err.to_string().contains("127.0.0.1"));
}

/// A body that is not an envelope reads as a rejection, not a failure
#[tokio::test]
async fn test_unreadable_body_is_rejection() {
    let ctx = TestContext::new().await;
    ctx.api
        .respond_raw(Method::GET, "/posts/42", StatusCode::OK, "<html>oops</html>");

    let response = api::actions::fetch_magazine_detail(&ctx.state.client, 42)
        .await
        .expect("Unreadable body is not a network error");

    assert_eq!(response.ok, 0);
    assert!(response.item.is_none());
    assert_eq!(response.message.as_deref(), Some("서버 응답을 처리할 수 없습니다."));

    let body: Value = ctx.server().get("/magazine/42").await.json();
    assert_eq!(body["state"], "empty");
    assert_eq!(body["message"], "서버 응답을 처리할 수 없습니다.");
}
