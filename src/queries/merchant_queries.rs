use sqlx::PgPool;

use crate::{error::Result, models::Merchant};

pub async fn get_all(pool: &PgPool) -> Result<Vec<Merchant>> {
    let merchants = sqlx::query_as::<_, Merchant>("SELECT * FROM merchants ORDER BY name")
        .fetch_all(pool)
        .await?;

    Ok(merchants)
}

pub async fn insert_merchants(pool: &PgPool, merchants: &[Merchant]) -> Result<()> {
    let mut tx = pool.begin().await?;

    for merchant in merchants {
        sqlx::query(
            "INSERT INTO merchants (id, name, description, image, button_color)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(&merchant.id)
        .bind(&merchant.name)
        .bind(&merchant.description)
        .bind(&merchant.image)
        .bind(merchant.button_color)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

pub async fn count_merchants(pool: &PgPool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM merchants")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
