use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    AppState,
    database::seed,
    error::Result,
    models::{Product, ProductQuery},
    queries::product_queries,
};

/// Catalog read; seeds the sample catalog on first use, then optionally
/// narrows to one merchant.
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = seed::ensure_products(&state.db).await?;

    match params.merchant_id {
        Some(ref merchant_id) => Ok(Json(
            product_queries::get_by_merchant(&state.db, merchant_id).await?,
        )),
        None => Ok(Json(products)),
    }
}
