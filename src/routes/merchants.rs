use axum::{Json, extract::State};

use crate::{AppState, database::seed, error::Result, models::Merchant};

/// Catalog read; seeds the sample merchants on first use.
pub async fn list_merchants(State(state): State<AppState>) -> Result<Json<Vec<Merchant>>> {
    let merchants = seed::ensure_merchants(&state.db).await?;

    Ok(Json(merchants))
}
