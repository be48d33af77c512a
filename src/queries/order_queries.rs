use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    error::Result,
    models::{CheckoutRequest, Order, OrderItem, OrderStatus},
};

/// Writes the order row and its item snapshots in one transaction so a
/// crash can never leave an order without items.
pub async fn create_order_with_items(
    pool: &PgPool,
    user_id: i32,
    total: Decimal,
    req: &CheckoutRequest,
) -> Result<(Order, Vec<OrderItem>)> {
    let mut tx = pool.begin().await?;

    let order = sqlx::query_as::<_, Order>(
        "INSERT INTO orders (user_id, total, status, delivery_address, phone, notes)
         VALUES ($1, $2, 'pending', $3, $4, $5)
         RETURNING *",
    )
    .bind(user_id)
    .bind(total)
    .bind(&req.delivery_address)
    .bind(&req.phone)
    .bind(&req.notes)
    .fetch_one(&mut *tx)
    .await?;

    let product_ids: Vec<&str> = req.items.iter().map(|i| i.product_id.as_str()).collect();
    let product_names: Vec<&str> = req.items.iter().map(|i| i.product_name.as_str()).collect();
    let prices: Vec<&str> = req.items.iter().map(|i| i.price.as_str()).collect();
    let quantities: Vec<i32> = req.items.iter().map(|i| i.quantity).collect();
    let merchant_ids: Vec<&str> = req.items.iter().map(|i| i.merchant_id.as_str()).collect();

    let items = sqlx::query_as::<_, OrderItem>(
        "INSERT INTO order_items (order_id, product_id, product_name, price, quantity, merchant_id)
         SELECT $1, unnest($2::text[]), unnest($3::text[]), unnest($4::text[]), unnest($5::int[]), unnest($6::text[])
         RETURNING *",
    )
    .bind(order.id)
    .bind(&product_ids)
    .bind(&product_names)
    .bind(&prices)
    .bind(&quantities)
    .bind(&merchant_ids)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok((order, items))
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Order>> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(order)
}

pub async fn get_user_orders(pool: &PgPool, user_id: i32) -> Result<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(orders)
}

pub async fn get_all_orders(pool: &PgPool) -> Result<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;

    Ok(orders)
}

pub async fn get_items_for_order(pool: &PgPool, order_id: i32) -> Result<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>("SELECT * FROM order_items WHERE order_id = $1")
        .bind(order_id)
        .fetch_all(pool)
        .await?;

    Ok(items)
}

pub async fn get_items_for_orders(pool: &PgPool, order_ids: &[i32]) -> Result<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>("SELECT * FROM order_items WHERE order_id = ANY($1)")
        .bind(order_ids)
        .fetch_all(pool)
        .await?;

    Ok(items)
}

/// Unconditional status write; the last admin to update wins.
pub async fn update_status(pool: &PgPool, id: i32, status: OrderStatus) -> Result<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(
        "UPDATE orders SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
    )
    .bind(status)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(order)
}

pub async fn count_orders(pool: &PgPool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
