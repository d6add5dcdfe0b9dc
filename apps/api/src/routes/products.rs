//! Catalog endpoint.

use axum::Json;

use storefront_core::Product;

use crate::catalog;

/// `GET /products`
pub async fn list() -> Json<Vec<Product>> {
    Json(catalog::list_products())
}
