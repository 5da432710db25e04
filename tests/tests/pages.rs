//! Tests for the page shells.

use axum::http::{Method, StatusCode};
use integration_tests::{fixtures, setup::TestContext};
use serde_json::{json, Value};
use shop_core::Resource;

/// Routes whose feature is not built yet show the fixed notice
#[tokio::test]
async fn test_placeholder_routes() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    let cases = [
        ("/", "홈"),
        ("/sign-up/step-1", "회원가입"),
        ("/cart", "장바구니"),
        ("/admin/analytics", "관리자 통계"),
        ("/shop", "상품 목록"),
        ("/community/write", "글쓰기"),
    ];

    for (route, feature) in cases {
        let response = server.get(route).await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["route"], route);
        assert_eq!(body["state"], "placeholder");
        assert_eq!(
            body["notice"],
            format!("💡 이 영역에서 {} 기능을 개발해주세요", feature)
        );
    }

    assert!(ctx.api.requests().is_empty(), "Placeholders never call the API");
}

#[tokio::test]
async fn test_sign_up_redirects_to_first_step() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    let response = server.get("/sign-up").await;
    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        "/sign-up/step-1"
    );
}

/// Magazine 42 renders the post the API returned
#[tokio::test]
async fn test_magazine_detail_ready() {
    let ctx = TestContext::new().await;
    ctx.api.respond(
        Method::GET,
        "/posts/42",
        fixtures::ok(fixtures::post(42, "magazine", "겨울철 물주기")),
    );
    let server = ctx.server();

    let response = server.get("/magazine/42").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["state"], "ready");
    assert_eq!(body["data"]["ok"], 1);
    assert_eq!(body["data"]["item"]["_id"], 42);
    assert_eq!(body["data"]["item"]["title"], "겨울철 물주기");
    // Fields the server does not use pass through untouched
    assert_eq!(body["data"]["item"]["views"], 3);
    assert_eq!(body["data"]["item"]["extra"]["category"], "tip");

    let requests = ctx.api.requests_to(&Method::GET, "/posts/42");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].cache_control.as_deref(), Some("no-store"));
}

/// Magazine pages are fetched fresh on every visit
#[tokio::test]
async fn test_magazine_detail_not_cached() {
    let ctx = TestContext::new().await;
    ctx.api.respond(
        Method::GET,
        "/posts/42",
        fixtures::ok(fixtures::post(42, "magazine", "겨울철 물주기")),
    );
    let server = ctx.server();

    server.get("/magazine/42").await.assert_status_ok();
    server.get("/magazine/42").await.assert_status_ok();

    assert_eq!(ctx.api.requests_to(&Method::GET, "/posts/42").len(), 2);
}

/// An unreachable API degrades to the fixed network message
#[tokio::test]
async fn test_magazine_detail_network_failure() {
    let ctx = TestContext::unreachable().await;
    let server = ctx.server();

    let response = server.get("/magazine/42").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = response.json();
    assert_eq!(body["state"], "error");
    assert_eq!(body["message"], Resource::Magazine.network_message());
    assert!(body.get("data").is_none());
}

/// `ok: 0` from the API renders an empty page with the API's message
#[tokio::test]
async fn test_magazine_detail_rejected() {
    let ctx = TestContext::new().await;
    ctx.api.respond(
        Method::GET,
        "/posts/7",
        json!({ "ok": 0, "message": "게시물이 존재하지 않습니다." }),
    );
    let server = ctx.server();

    let response = server.get("/magazine/7").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["state"], "empty");
    assert_eq!(body["message"], "게시물이 존재하지 않습니다.");
}

#[tokio::test]
async fn test_non_numeric_ids_are_not_found() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    for route in ["/magazine/abc", "/curation/spring-picks", "/shop/products/x1"] {
        let response = server.get(route).await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["state"], "not_found");
    }

    assert!(ctx.api.requests().is_empty());
}

/// Community listing forwards paging and category filters
#[tokio::test]
async fn test_community_listing_query() {
    let ctx = TestContext::new().await;
    ctx.api.respond(
        Method::GET,
        "/posts",
        json!({
            "ok": 1,
            "item": [fixtures::post(1, "community", "첫 글")],
            "pagination": { "page": 2, "limit": 12, "total": 13, "totalPages": 2 }
        }),
    );
    let server = ctx.server();

    let response = server.get("/community?page=2&category=tip").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["state"], "ready");
    assert_eq!(body["data"]["item"][0]["title"], "첫 글");
    assert_eq!(body["data"]["pagination"]["totalPages"], 2);

    let requests = ctx.api.requests_to(&Method::GET, "/posts");
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.query_param("type").as_deref(), Some("community"));
    assert_eq!(request.query_param("page").as_deref(), Some("2"));
    assert_eq!(request.query_param("limit").as_deref(), Some("12"));

    let custom: Value =
        serde_json::from_str(&request.query_param("custom").unwrap()).unwrap();
    assert_eq!(custom, json!({ "extra.category": "tip" }));
}

/// Cached pages are served without calling the API again
#[tokio::test]
async fn test_listing_and_curation_are_cached() {
    let ctx = TestContext::new().await;
    ctx.api.respond(Method::GET, "/posts", json!({ "ok": 1, "item": [] }));
    ctx.api.respond(
        Method::GET,
        "/posts/5",
        fixtures::ok(fixtures::post(5, "curation", "봄맞이 큐레이션")),
    );
    let server = ctx.server();

    server.get("/community").await.assert_status_ok();
    server.get("/community").await.assert_status_ok();
    server.get("/community?page=2").await.assert_status_ok();
    assert_eq!(ctx.api.requests_to(&Method::GET, "/posts").len(), 2);

    server.get("/curation/5").await.assert_status_ok();
    let body: Value = server.get("/curation/5").await.json();
    assert_eq!(body["data"]["item"]["title"], "봄맞이 큐레이션");
    assert_eq!(ctx.api.requests_to(&Method::GET, "/posts/5").len(), 1);
}

/// Failed renders are not cached, so the next visit retries
#[tokio::test]
async fn test_rejected_pages_not_cached() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    let body: Value = server.get("/shop/products/3").await.json();
    assert_eq!(body["state"], "empty");

    ctx.api.respond(
        Method::GET,
        "/products/3",
        fixtures::ok(fixtures::product(3, "몬스테라")),
    );
    let body: Value = server.get("/shop/products/3").await.json();
    assert_eq!(body["state"], "ready");
    assert_eq!(body["data"]["item"]["name"], "몬스테라");
    assert_eq!(body["data"]["item"]["quantity"], 10);
}

/// Zero-padded ids share the cache entry of the canonical path
#[tokio::test]
async fn test_detail_pages_cached_under_canonical_path() {
    let ctx = TestContext::new().await;
    ctx.api.respond(
        Method::GET,
        "/products/7",
        fixtures::ok(fixtures::product(7, "몬스테라")),
    );
    let server = ctx.server();

    server.get("/shop/products/007").await.assert_status_ok();
    let body: Value = server.get("/shop/products/7").await.json();
    assert_eq!(body["route"], "/shop/products/7");
    assert_eq!(ctx.api.requests_to(&Method::GET, "/products/7").len(), 1);

    ctx.state.pages.revalidate("/shop/products/7").await;
    server.get("/shop/products/007").await.assert_status_ok();
    assert_eq!(ctx.api.requests_to(&Method::GET, "/products/7").len(), 2);
}
