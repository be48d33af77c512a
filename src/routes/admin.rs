use axum::{Json, extract::State};
use serde::Serialize;

use crate::{
    AppState,
    error::Result,
    queries::{merchant_queries, order_queries, product_queries, user_queries},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_orders: i64,
    pub total_users: i64,
    pub total_merchants: i64,
    pub total_products: i64,
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<AdminStats>> {
    let total_orders = order_queries::count_orders(&state.db).await?;
    let total_users = user_queries::count_users(&state.db).await?;
    let total_merchants = merchant_queries::count_merchants(&state.db).await?;
    let total_products = product_queries::count_products(&state.db).await?;

    Ok(Json(AdminStats {
        total_orders,
        total_users,
        total_merchants,
        total_products,
    }))
}
