use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clinizad_api::build_app;
use shared_config::AppConfig;
use shared_database::AppState;
use shared_utils::bootstrap::seed_default_users;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Clinizad API server");

    let config = AppConfig::from_env();
    let addr = config
        .socket_addr()
        .with_context(|| format!("invalid API_HOST/API_PORT: {}:{}", config.api_host, config.api_port))?;

    let state = AppState::from_config(config).context("opening database")?;
    info!("Database ready at {}", state.config.database_path());

    let created = seed_default_users(&state.db).context("seeding default users")?;
    if created > 0 {
        info!("Created {} default users", created);
    }

    if state.config.seed_catalog {
        let report = state
            .db
            .transaction(|s| s.seed_catalog())
            .context("seeding site and company catalog")?;
        info!(
            "Catalog seeded: {} sites, {} companies added",
            report.sites_added, report.companies_added
        );
    }

    let app = build_app(Arc::new(state))?;

    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
