//! Database module for SQLite persistence.
//!
//! SQLite is the source of truth for the whole catalog: restaurants, foods,
//! the menu bridge table, votes, vlogger features and dish variations.

mod repository;

pub use repository::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    // Run embedded migrations
    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS restaurants (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            location TEXT NOT NULL,
            contact_number TEXT,
            website TEXT,
            image_url TEXT,
            map_url TEXT,
            rating REAL NOT NULL DEFAULT 0,
            visits INTEGER NOT NULL DEFAULT 0,
            category TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS foods (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            long_description TEXT,
            cultural_significance TEXT,
            ingredients TEXT,
            origin_of_dish TEXT,
            serving_size TEXT,
            prep_time TEXT,
            spice_level TEXT,
            image_url TEXT,
            category TEXT,
            searches INTEGER NOT NULL DEFAULT 0,
            is_trending INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS restaurant_foods (
            id TEXT PRIMARY KEY,
            restaurant_id TEXT NOT NULL,
            food_id TEXT NOT NULL,
            price REAL NOT NULL DEFAULT 0,
            UNIQUE (restaurant_id, food_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS food_votes (
            id TEXT PRIMARY KEY,
            food_id TEXT NOT NULL,
            liked INTEGER NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS restaurant_votes (
            id TEXT PRIMARY KEY,
            restaurant_id TEXT NOT NULL,
            liked INTEGER NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vlogger_features (
            id TEXT PRIMARY KEY,
            restaurant_id TEXT NOT NULL,
            vlogger_name TEXT NOT NULL,
            content_type TEXT NOT NULL,
            content_url TEXT NOT NULL,
            feature_date TEXT NOT NULL,
            platform TEXT NOT NULL,
            description TEXT,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS food_variations (
            id TEXT PRIMARY KEY,
            food_id TEXT NOT NULL,
            parent_food_id TEXT,
            name TEXT NOT NULL,
            description TEXT,
            image_url TEXT,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Indexes for common lookups
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_restaurants_name ON restaurants(name);
        CREATE INDEX IF NOT EXISTS idx_restaurants_visits ON restaurants(visits);
        CREATE INDEX IF NOT EXISTS idx_foods_name ON foods(name);
        CREATE INDEX IF NOT EXISTS idx_foods_searches ON foods(searches);
        CREATE INDEX IF NOT EXISTS idx_restaurant_foods_restaurant ON restaurant_foods(restaurant_id);
        CREATE INDEX IF NOT EXISTS idx_restaurant_foods_food ON restaurant_foods(food_id);
        CREATE INDEX IF NOT EXISTS idx_food_votes_food ON food_votes(food_id);
        CREATE INDEX IF NOT EXISTS idx_restaurant_votes_restaurant ON restaurant_votes(restaurant_id);
        CREATE INDEX IF NOT EXISTS idx_vlogger_features_restaurant ON vlogger_features(restaurant_id);
        CREATE INDEX IF NOT EXISTS idx_food_variations_parent ON food_variations(parent_food_id);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
