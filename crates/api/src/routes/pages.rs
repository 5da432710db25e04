//! Page shells.
//!
//! Each page renders to a [`PageView`]. Pages backed by the commerce API
//! degrade to `empty` or `error` views instead of failing the request.

use axum::{
    extract::{Path, Query, State},
    http::Uri,
    response::Redirect,
};
use serde::Serialize;
use serde_json::json;
use shop_core::{ApiResponse, BookmarkKind, PostQuery, Result, User};
use std::future::Future;

use crate::actions;
use crate::extractors::SignedIn;
use crate::response::PageView;
use crate::state::AppState;

/// GET / - Home.
pub async fn home() -> PageView {
    PageView::placeholder("/", "홈", "홈")
}

/// GET /sign-up - Entry of the sign-up flow.
pub async fn sign_up() -> Redirect {
    Redirect::temporary("/sign-up/step-1")
}

/// GET /sign-up/step-1
pub async fn sign_up_step_one() -> PageView {
    PageView::placeholder("/sign-up/step-1", "회원가입", "회원가입")
}

/// GET /cart
pub async fn cart() -> PageView {
    PageView::placeholder("/cart", "장바구니", "장바구니")
}

/// GET /admin/analytics
pub async fn admin_analytics() -> PageView {
    PageView::placeholder("/admin/analytics", "관리자 통계", "관리자 통계")
}

/// GET /shop
pub async fn shop() -> PageView {
    PageView::placeholder("/shop", "쇼핑", "상품 목록")
}

/// GET /community/write - The form submits to `POST /actions/posts`.
pub async fn community_write() -> PageView {
    PageView::placeholder("/community/write", "글쓰기", "글쓰기")
}

/// GET /shop/products/:id
pub async fn product_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    uri: Uri,
) -> PageView {
    let Ok(id) = id.parse::<u64>() else {
        return PageView::not_found(uri.path(), "상품 상세");
    };

    let route = format!("/shop/products/{}", id);
    let client = &state.client;
    cached(&state, route.clone(), || async move {
        render(&route, "상품 상세", actions::fetch_product(client, id).await)
    })
    .await
}

/// GET /community - Paginated community posts.
pub async fn community(
    State(state): State<AppState>,
    Query(query): Query<PostQuery>,
    uri: Uri,
) -> PageView {
    let (client, query) = (&state.client, &query);
    cached(&state, cache_key(&uri), || async move {
        render(
            "/community",
            "커뮤니티",
            actions::list_community_posts(client, query).await,
        )
    })
    .await
}

/// GET /magazine/:id - Always fetched fresh.
pub async fn magazine_detail(State(state): State<AppState>, Path(id): Path<String>) -> PageView {
    let route = format!("/magazine/{}", id);
    let Ok(id) = id.parse::<u64>() else {
        return PageView::not_found(route, "매거진");
    };

    render(&route, "매거진", actions::fetch_magazine_detail(&state.client, id).await)
}

/// GET /curation/:slug - The slug is the post id.
pub async fn curation_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    uri: Uri,
) -> PageView {
    let Ok(id) = slug.parse::<u64>() else {
        return PageView::not_found(uri.path(), "큐레이션");
    };

    let route = format!("/curation/{}", id);
    let client = &state.client;
    cached(&state, route.clone(), || async move {
        render(&route, "큐레이션", actions::fetch_curation_detail(client, id).await)
    })
    .await
}

/// GET /my-page - The signed-in user and their product bookmarks.
///
/// Cached per access token under `/my-page?session=<token>` so that
/// revalidating `/my-page` drops every user's copy. The cookie id alone
/// proves nothing, so sessions without a token are never cached.
pub async fn my_page(State(state): State<AppState>, SignedIn(user): SignedIn) -> PageView {
    let key = user
        .access_token()
        .map(|token| format!("/my-page?session={}", token));
    if let Some(key) = &key {
        if let Some(page) = state.pages.get(key).await {
            return page;
        }
    }

    let page = match actions::list_bookmarks(&state.client, &user, BookmarkKind::Product).await {
        Ok(bookmarks) if bookmarks.is_ok() => {
            let user = User { token: None, ..user };
            PageView::ready("/my-page", "마이페이지", json!({ "user": user, "bookmarks": bookmarks }))
        }
        Ok(rejected) => PageView::from_envelope("/my-page", "마이페이지", &rejected),
        Err(e) => PageView::from_error("/my-page", "마이페이지", &e),
    };

    if let Some(key) = key {
        state.pages.insert(key, page.clone()).await;
    }
    page
}

/// Serve from the page cache, rendering and storing on a miss.
async fn cached<F, Fut>(state: &AppState, key: String, render: F) -> PageView
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = PageView>,
{
    if let Some(page) = state.pages.get(&key).await {
        return page;
    }

    let page = render().await;
    state.pages.insert(key, page.clone()).await;
    page
}

/// Listings are keyed by path plus query so each page is cached apart.
fn cache_key(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

fn render<T: Serialize>(route: &str, title: &str, result: Result<ApiResponse<T>>) -> PageView {
    match result {
        Ok(envelope) => PageView::from_envelope(route, title, &envelope),
        Err(e) => PageView::from_error(route, title, &e),
    }
}
