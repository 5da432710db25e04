//! Navigation tracking for the idle auto-logout.

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use shop_core::Interaction;

use crate::extractors::signed_in_user;
use crate::state::AppState;

/// Count every GET by a signed-in session as a navigation.
///
/// Runs before the handler, so a page view keeps the session alive even
/// when the page itself never looks at the user.
pub async fn track_navigation(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::GET {
        if let Some(user) = signed_in_user(&state, request.headers()).await {
            state
                .activity
                .observe(user.session_key(), Interaction::Navigation);
        }
    }

    next.run(request).await
}
