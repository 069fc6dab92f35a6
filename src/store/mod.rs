use std::time::Duration;

use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

use crate::configuration::DatabaseSettings;

pub mod liked_quote;
pub mod quote;
pub mod user;

pub use liked_quote::LikedQuoteRepository;
pub use quote::QuoteRepository;
pub use user::UserRepository;

/// Open the database file and bring the schema up to date.
pub async fn init_database(settings: &DatabaseSettings) -> anyhow::Result<SqlitePool> {
    tracing::info!(path = %settings.path, "initializing database connection...");
    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(2))
        .connect_with(settings.connect_options())
        .await?;

    migrate(&pool).await?;

    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> anyhow::Result<()> {
    tracing::info!("running migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("finished running migrations!");
    Ok(())
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    // a single connection that never expires keeps the in-memory database alive
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");
    migrate(&pool).await.expect("failed to run migrations");
    pool
}
