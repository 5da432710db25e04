//! Action endpoints called by page forms and the browser.

use axum::{extract::State, http::header, response::Redirect, Json};
use serde::{Deserialize, Serialize};
use shop_core::{ApiResponse, BookmarkTarget, Interaction, NewPost, Post};
use telemetry::metrics;
use tracing::info;

use crate::actions::{self, BookmarkToggle};
use crate::extractors::{CurrentUser, SignedIn, CLEAR_SESSION_COOKIE};
use crate::response::ApiError;
use crate::state::AppState;

/// Body of `POST /actions/activity`.
#[derive(Debug, Deserialize)]
pub struct ActivityRequest {
    pub interaction: Interaction,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityResponse {
    /// Whether the idle clock is running for this session
    pub tracking: bool,
    /// Whether this interaction restarted the idle clock
    pub reset: bool,
}

/// POST /actions/posts - Create a community post.
pub async fn create_post_handler(
    State(state): State<AppState>,
    SignedIn(user): SignedIn,
    Json(post): Json<NewPost>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    let response = actions::create_post(&state, &user, post).await?;
    Ok(Json(response))
}

/// POST /actions/bookmarks - Toggle a bookmark.
pub async fn toggle_bookmark_handler(
    State(state): State<AppState>,
    SignedIn(user): SignedIn,
    Json(target): Json<BookmarkTarget>,
) -> Result<Json<BookmarkToggle>, ApiError> {
    let toggle = actions::toggle_bookmark(&state, &user, target).await?;
    Ok(Json(toggle))
}

/// POST /actions/activity - Report a user interaction to the idle tracker.
pub async fn activity_handler(
    State(state): State<AppState>,
    SignedIn(user): SignedIn,
    Json(request): Json<ActivityRequest>,
) -> Json<ActivityResponse> {
    let key = user.session_key();
    let reset = state.activity.observe(key, request.interaction);

    Json(ActivityResponse {
        tracking: state.activity.is_tracking(key),
        reset,
    })
}

/// POST /actions/logout - Sign out and return to the home page.
pub async fn logout_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ([(header::HeaderName, &'static str); 1], Redirect) {
    if let Some(user) = user {
        let key = user.session_key();
        state.sessions.revoke(key).await;
        state.activity.end(key);
        metrics().explicit_logouts.inc();
        info!(user_id = %user.id, "User logged out");
    }

    ([(header::SET_COOKIE, CLEAR_SESSION_COOKIE)], Redirect::to("/"))
}
