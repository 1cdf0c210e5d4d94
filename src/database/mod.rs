pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

pub use models::event::Event;
pub use repository::{EventDraft, EventRepository, RepositoryError};

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Connect to Postgres and run the embedded migrations.
pub async fn connect(url: &str, config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(url)
        .await?;

    sqlx::migrate!().run(&pool).await?;

    Ok(pool)
}
