use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use pharmacy_market_api::{config::AppConfig, db::create_pool};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let admin_id = ensure_user(&pool, "Admin", "admin@example.com", "admin123", "admin").await?;
    let user_id = ensure_user(&pool, "Demo User", "user@example.com", "user123", "user").await?;
    seed_catalog(&pool, admin_id).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let row: (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, name, email, password_hash, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(row.0)
}

async fn seed_catalog(pool: &sqlx::PgPool, admin_id: Uuid) -> anyhow::Result<()> {
    let categories = vec![
        ("Pain Relief", "Analgesics and anti-inflammatories"),
        ("Antibiotics", "Prescription antibacterials"),
        ("Vitamins", "Supplements and multivitamins"),
    ];

    for (name, desc) in &categories {
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, description)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(desc)
        .execute(pool)
        .await?;
    }

    // (name, substance, category, price in cents)
    let medicines = vec![
        ("Paracetamol 500mg", "paracetamol", "Pain Relief", 450_i64),
        ("Ibuprofen 400mg", "ibuprofen", "Pain Relief", 620),
        ("Amoxicillin 250mg", "amoxicillin", "Antibiotics", 1250),
        ("Vitamin C 1000mg", "ascorbic acid", "Vitamins", 890),
    ];

    for (name, substance, category, price) in medicines {
        sqlx::query(
            r#"
            INSERT INTO medicines (id, name, substance, price, category_id)
            SELECT $1, $2, $3, $4, c.id FROM categories c
            WHERE c.name = $5
              AND NOT EXISTS (SELECT 1 FROM medicines m WHERE m.name = $2)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(substance)
        .bind(price)
        .bind(category)
        .execute(pool)
        .await?;
    }

    sqlx::query(
        r#"
        INSERT INTO pharmacies (id, name, description, address, phone, email, owner_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (email) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind("Central Pharmacy")
    .bind("Flagship store")
    .bind("1 Main Street")
    .bind("+15550100")
    .bind("central@example.com")
    .bind(admin_id)
    .execute(pool)
    .await?;

    println!("Seeded catalog");
    Ok(())
}
