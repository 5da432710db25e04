//! Bookmarks of the signed-in user.

use serde::Serialize;
use serde_json::{json, Value};
use shop_core::{ApiResponse, Bookmark, BookmarkKind, BookmarkTarget, Resource, Result, User};
use tracing::info;

use crate::client::CommerceClient;
use crate::state::AppState;

/// Outcome of a bookmark toggle.
#[derive(Debug, Clone, Serialize)]
pub struct BookmarkToggle {
    /// Whether the target is bookmarked after the call
    pub bookmarked: bool,
    /// Envelope of the add or remove call
    pub response: ApiResponse<Value>,
}

/// `GET /bookmarks/{type}`.
pub async fn list_bookmarks(
    client: &CommerceClient,
    user: &User,
    kind: BookmarkKind,
) -> Result<ApiResponse<Vec<Bookmark>>> {
    client
        .get(
            Resource::Bookmarks,
            &format!("bookmarks/{}", kind.as_str()),
            &[],
            user.access_token(),
        )
        .await
}

/// Add the bookmark if absent, remove it if present.
///
/// Looks up `GET /bookmarks/{type}/{target_id}`, then either
/// `DELETE /bookmarks/{_id}` or `POST /bookmarks/{type}`. Pages showing the
/// target are revalidated when the change succeeds.
pub async fn toggle_bookmark(
    state: &AppState,
    user: &User,
    target: BookmarkTarget,
) -> Result<BookmarkToggle> {
    let token = user.access_token();
    let kind = target.kind.as_str();

    let current: ApiResponse<Bookmark> = state
        .client
        .get(
            Resource::Bookmarks,
            &format!("bookmarks/{}/{}", kind, target.target_id),
            &[],
            token,
        )
        .await?;
    let existing = if current.is_ok() { current.item } else { None };

    let (bookmarked, response): (bool, ApiResponse<Value>) = match existing {
        Some(bookmark) => {
            let response = state
                .client
                .delete(Resource::Bookmarks, &format!("bookmarks/{}", bookmark.id), token)
                .await?;
            (false, response)
        }
        None => {
            let response = state
                .client
                .post(
                    Resource::Bookmarks,
                    &format!("bookmarks/{}", kind),
                    &json!({ "target_id": target.target_id }),
                    token,
                )
                .await?;
            (true, response)
        }
    };

    if !response.is_ok() {
        return Ok(BookmarkToggle {
            bookmarked: !bookmarked,
            response,
        });
    }

    info!(
        user_id = %user.id,
        kind,
        target_id = target.target_id,
        bookmarked,
        "Bookmark toggled"
    );
    for path in target.affected_paths() {
        state.pages.revalidate(&path).await;
    }

    Ok(BookmarkToggle {
        bookmarked,
        response,
    })
}
