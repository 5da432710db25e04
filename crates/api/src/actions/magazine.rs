//! Magazine and curation detail.

use shop_core::{ApiResponse, Post, Resource, Result};

use crate::client::CommerceClient;

/// `GET /posts/{id}` for a magazine article.
pub async fn fetch_magazine_detail(client: &CommerceClient, id: u64) -> Result<ApiResponse<Post>> {
    client
        .get(Resource::Magazine, &format!("posts/{}", id), &[], None)
        .await
}

/// `GET /posts/{id}` for a curation page.
pub async fn fetch_curation_detail(client: &CommerceClient, id: u64) -> Result<ApiResponse<Post>> {
    client
        .get(Resource::Curation, &format!("posts/{}", id), &[], None)
        .await
}
