use serde::{Deserialize, Serialize};

/// Catalog entry. Prices are currency-formatted strings ("$3.99") that the
/// checkout path parses with rust_decimal when totalling an order.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: String,
    pub merchant_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub merchant_id: Option<String>,
}
