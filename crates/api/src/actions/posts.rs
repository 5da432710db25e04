//! Community posts.

use shop_core::{ApiResponse, NewPost, Post, PostQuery, Resource, Result, User};
use tracing::info;

use crate::client::CommerceClient;
use crate::state::AppState;

/// Path of the community listing page.
pub const COMMUNITY_PATH: &str = "/community";

/// `GET /posts?type=community&page&limit[&custom]`.
pub async fn list_community_posts(
    client: &CommerceClient,
    query: &PostQuery,
) -> Result<ApiResponse<Vec<Post>>> {
    client
        .get(Resource::CommunityPosts, "posts", &query.to_query(), None)
        .await
}

/// `POST /posts` as the signed-in user, then revalidate the listing.
pub async fn create_post(state: &AppState, user: &User, post: NewPost) -> Result<ApiResponse<Post>> {
    let body = post.into_payload()?;

    let response = state
        .client
        .post(Resource::Post, "posts", &body, user.access_token())
        .await?;

    if response.is_ok() {
        info!(user_id = %user.id, "Community post created");
        state.pages.revalidate(COMMUNITY_PATH).await;
    }

    Ok(response)
}
