//! Listboard server: settings from env, database bootstrap, HTTP routes.
//!
//! Run from repo root: `cargo run -p listboard-server`

use listboard::{app, ensure_database_exists, ensure_tables, AppState, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("listboard=info,tower_http=info")),
        )
        .init();

    ensure_database_exists(&settings.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.database_url)
        .await?;
    ensure_tables(&pool, &settings.db_schema).await?;

    let state = AppState::new(pool, settings.db_schema.as_str());
    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
