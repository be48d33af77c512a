use sqlx::PgPool;

use crate::{
    error::Result,
    models::{ButtonColor, Merchant, Product},
    queries::{merchant_queries, product_queries},
};

/// The static storefront catalog. Inserted lazily the first time a catalog
/// read finds its table empty.
pub fn sample_merchants() -> Vec<Merchant> {
    vec![
        Merchant {
            id: "abir-pharmacy".to_string(),
            name: "Abir's Pharmacy".to_string(),
            description:
                "Your trusted neighborhood pharmacy with quality medications and health products"
                    .to_string(),
            image: "/api/placeholder/300/200".to_string(),
            button_color: ButtonColor::Blue,
        },
        Merchant {
            id: "tarabay-market".to_string(),
            name: "Tarabay's Market".to_string(),
            description: "Fresh groceries and daily essentials delivered to your door".to_string(),
            image: "/api/placeholder/300/200".to_string(),
            button_color: ButtonColor::Green,
        },
        Merchant {
            id: "coop-dmit".to_string(),
            name: "Coop Dmit".to_string(),
            description: "General store with household items, snacks, and convenience products"
                .to_string(),
            image: "/api/placeholder/300/200".to_string(),
            button_color: ButtonColor::Blue,
        },
        Merchant {
            id: "afran-manakish".to_string(),
            name: "Afran Al Bassam".to_string(),
            description: "Authentic Lebanese manakish and traditional breakfast items".to_string(),
            image: "/api/placeholder/300/200".to_string(),
            button_color: ButtonColor::Green,
        },
    ]
}

pub fn sample_products() -> Vec<Product> {
    let rows = [
        ("vitamins-c", "Vitamin C Tablets", "$12.99", "abir-pharmacy"),
        ("first-aid-kit", "First Aid Kit", "$24.99", "abir-pharmacy"),
        ("thermometer", "Digital Thermometer", "$15.99", "abir-pharmacy"),
        ("fresh-apples", "Fresh Red Apples (1kg)", "$3.99", "tarabay-market"),
        ("whole-milk", "Whole Milk (1L)", "$2.49", "tarabay-market"),
        ("bread-loaf", "Fresh Bread Loaf", "$1.99", "tarabay-market"),
        ("batteries-aa", "AA Batteries (Pack of 4)", "$5.99", "coop-dmit"),
        ("tissues", "Facial Tissues", "$3.49", "coop-dmit"),
        ("snack-chips", "Potato Chips", "$2.99", "coop-dmit"),
        ("cheese-manakish", "Cheese Manakish", "$4.99", "afran-manakish"),
        ("zaatar-manakish", "Zaatar Manakish", "$3.99", "afran-manakish"),
        ("meat-manakish", "Meat Manakish", "$6.99", "afran-manakish"),
    ];

    rows.iter()
        .map(|(id, name, price, merchant_id)| Product {
            id: id.to_string(),
            name: name.to_string(),
            price: price.to_string(),
            merchant_id: merchant_id.to_string(),
        })
        .collect()
}

/// Returns all merchants, inserting the sample catalog first if the table
/// is empty.
pub async fn ensure_merchants(pool: &PgPool) -> Result<Vec<Merchant>> {
    let merchants = merchant_queries::get_all(pool).await?;
    if !merchants.is_empty() {
        return Ok(merchants);
    }

    let samples = sample_merchants();
    merchant_queries::insert_merchants(pool, &samples).await?;
    tracing::info!("Seeded {} merchants", samples.len());

    Ok(samples)
}

/// Returns all products, seeding merchants and products as needed. Merchants
/// are seeded first so the product foreign keys resolve.
pub async fn ensure_products(pool: &PgPool) -> Result<Vec<Product>> {
    let products = product_queries::get_all(pool).await?;
    if !products.is_empty() {
        return Ok(products);
    }

    ensure_merchants(pool).await?;

    let samples = sample_products();
    product_queries::insert_products(pool, &samples).await?;
    tracing::info!("Seeded {} products", samples.len());

    Ok(samples)
}
