use std::sync::Arc;

use la_comedia_api::config::AppConfig;
use la_comedia_api::database::memory::MemoryEventRepository;
use la_comedia_api::database::postgres::PgEventRepository;
use la_comedia_api::database::EventRepository;
use la_comedia_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up ADMIN_PASSWORD, DATABASE_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    tracing::info!("starting La Comedia API in {:?} mode", config.environment);

    if config.security.admin_password.is_empty() {
        tracing::warn!("ADMIN_PASSWORD is not set; admin login is disabled");
    }

    let repository: Arc<dyn EventRepository> = match config.database.url.as_deref() {
        Some(url) => {
            let pool = la_comedia_api::database::connect(url, &config.database).await?;
            tracing::info!("connected to Postgres, migrations applied");
            Arc::new(PgEventRepository::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using the in-memory event repository");
            Arc::new(MemoryEventRepository::new())
        }
    };

    let port = config.server.port;
    let state = AppState::new(config, repository);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    println!("🎭 La Comedia API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
