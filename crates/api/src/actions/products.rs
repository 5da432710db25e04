//! Product detail.

use shop_core::{ApiResponse, Product, Resource, Result};

use crate::client::CommerceClient;

/// `GET /products/{id}`.
pub async fn fetch_product(client: &CommerceClient, id: u64) -> Result<ApiResponse<Product>> {
    client
        .get(Resource::Product, &format!("products/{}", id), &[], None)
        .await
}
