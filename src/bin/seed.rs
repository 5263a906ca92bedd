use argon2::{
    Argon2, PasswordHasher,
    password_hash::{rand_core::OsRng, SaltString},
};
use chrono::{Duration, Utc};
use storeshop_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;
    let pool = create_pool(&config.database_url).await?;

    let owner_id = ensure_user(&pool, "merchant", "merchant@example.com", "merchant123").await?;
    let buyer_id = ensure_user(&pool, "buyer", "buyer@example.com", "buyer123").await?;
    seed_catalog(&pool, owner_id, buyer_id).await?;

    println!("Seed completed. Merchant ID: {owner_id}, Buyer ID: {buyer_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    username: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<i32> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let (user_id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO users (username, email, password_hash, first_name, last_name)
        VALUES ($1, $2, $3, $4, '')
        ON CONFLICT (username) DO UPDATE SET email = EXCLUDED.email
        RETURNING id
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(username)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {username}");
    Ok(user_id)
}

async fn seed_catalog(pool: &sqlx::PgPool, owner_id: i32, rater_id: i32) -> anyhow::Result<()> {
    let categories = ["Apparel", "Kitchen", "Books"];
    for name in categories {
        sqlx::query("INSERT INTO categories (category_name) VALUES ($1) ON CONFLICT (category_name) DO NOTHING")
            .bind(name)
            .execute(pool)
            .await?;
    }

    let today = Utc::now().date_naive();
    let products = [
        ("Axum Hoodie", "Warm hoodie for Rustaceans", 550000_i64, "Apparel", true, 30, 5_i16),
        ("Ferris Mug", "Coffee tastes better with Ferris", 120000, "Kitchen", true, 10, 4),
        ("Rust Sticker Pack", "Decorate your laptop", 50000, "Apparel", false, 3, 3),
        ("E-book: Async Rust", "Learn async Rust patterns", 250000, "Books", true, 0, 5),
    ];

    for (name, desc, price, category, active, age_days, stars) in products {
        let date = today - Duration::days(age_days);
        let (product_id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO products (product_name, description, price, date, active, owner_id, category_id)
            SELECT $1, $2, $3, $4, $5, $6, c.id FROM categories c WHERE c.category_name = $7
            ON CONFLICT (product_name) DO UPDATE SET description = EXCLUDED.description
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(desc)
        .bind(price)
        .bind(date)
        .bind(active)
        .bind(owner_id)
        .bind(category)
        .fetch_one(pool)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO ratings (product_id, user_id, stars)
            VALUES ($1, $2, $3)
            ON CONFLICT (product_id, user_id) DO NOTHING
            "#,
        )
        .bind(product_id)
        .bind(rater_id)
        .bind(stars)
        .execute(pool)
        .await?;
    }

    println!("Seeded catalog");
    Ok(())
}
