//! Payline API Server
//!
//! Main entry point for the Payline backend service.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payline_api::{AppState, create_router};
use payline_core::auth::hash_password;
use payline_db::repositories::RegisterError;
use payline_db::{CurrencyRepository, DatabaseConnection, UserRepository, connect};
use payline_rates::{RateClient, RateRefresher};
use payline_shared::{AppConfig, TokenService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "payline=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Connect to database
    let db = connect(&config.database.url, config.database.max_connections).await?;
    info!("Connected to database");

    // Create token service
    let tokens = TokenService::new(&config.auth.secret, config.auth.token_lifetime_minutes);

    // Seed the first account, which can register all subsequent ones
    seed_admin_account(&db, &config).await?;

    // Start the background rate refresher with a stop signal for shutdown
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let refresher = RateRefresher::new(
        RateClient::new(&config.rates)?,
        CurrencyRepository::new(db.clone()),
        Duration::from_secs(config.rates.update_interval_minutes * 60),
    );
    let refresher_task = tokio::spawn(refresher.run(shutdown_rx));

    // Create application state and router
    let state = AppState {
        db: Arc::new(db),
        tokens: Arc::new(tokens),
    };
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::signal::ctrl_c().await.ok();
            info!("shutdown signal received");
            shutdown_tx.send(true).ok();
        })
        .await?;

    refresher_task.await?;

    Ok(())
}

/// Registers the configured administrator account if it does not exist yet.
async fn seed_admin_account(db: &DatabaseConnection, config: &AppConfig) -> anyhow::Result<()> {
    let users = UserRepository::new(db.clone());
    let hash = hash_password(&config.seed.password)?;

    match users
        .register(
            &config.seed.email,
            &hash,
            config.seed.balance,
            &config.seed.currency,
        )
        .await
    {
        Ok(_) => info!(email = %config.seed.email, "seeded administrator account"),
        Err(RegisterError::AlreadyExists) => {
            info!(email = %config.seed.email, "administrator account already present");
        }
        Err(RegisterError::Database(e)) => return Err(e.into()),
    }

    Ok(())
}
