use sqlx::PgPool;

use crate::{error::Result, models::Product};

pub async fn get_all(pool: &PgPool) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY name")
        .fetch_all(pool)
        .await?;

    Ok(products)
}

pub async fn get_by_merchant(pool: &PgPool, merchant_id: &str) -> Result<Vec<Product>> {
    let products =
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE merchant_id = $1 ORDER BY name")
            .bind(merchant_id)
            .fetch_all(pool)
            .await?;

    Ok(products)
}

pub async fn insert_products(pool: &PgPool, products: &[Product]) -> Result<()> {
    let mut tx = pool.begin().await?;

    for product in products {
        sqlx::query(
            "INSERT INTO products (id, name, price, merchant_id)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.price)
        .bind(&product.merchant_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

pub async fn count_products(pool: &PgPool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
