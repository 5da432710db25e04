//! API routes.

pub mod actions;
pub mod health;
pub mod pages;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::track_navigation;
use crate::state::AppState;

/// Creates the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(pages::home))
        .route("/sign-up", get(pages::sign_up))
        .route("/sign-up/step-1", get(pages::sign_up_step_one))
        .route("/cart", get(pages::cart))
        .route("/admin/analytics", get(pages::admin_analytics))
        .route("/shop", get(pages::shop))
        .route("/shop/products/:id", get(pages::product_detail))
        .route("/community", get(pages::community))
        .route("/community/write", get(pages::community_write))
        .route("/magazine/:id", get(pages::magazine_detail))
        .route("/curation/:slug", get(pages::curation_detail))
        .route("/my-page", get(pages::my_page))
        .route("/actions/posts", post(actions::create_post_handler))
        .route("/actions/bookmarks", post(actions::toggle_bookmark_handler))
        .route("/actions/activity", post(actions::activity_handler))
        .route("/actions/logout", post(actions::logout_handler))
        .route("/health", get(health::health_handler))
        .route("/health/ready", get(health::ready_handler))
        .route("/health/live", get(health::live_handler))
        .layer(middleware::from_fn_with_state(state.clone(), track_navigation))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
