//! Assist AI Backend
//!
//! Classroom assistant for teachers: notes, tasks, syllabus progress,
//! reminders, reflective feedback and an AI chat helper.
//!
//! ## Architecture
//!
//! - Routes: HTTP request handling and identity extraction
//! - Services: business rules over owner-scoped collections
//! - Store: document store (PostgreSQL JSONB or in-memory)
//! - AI: Gemini generation and NLLB translation behind traits

use anyhow::{Context, Result};
use assist_ai_backend::{ai, config, db, routes, state::AppState};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = config::AppConfig::load()?;
    let production = config::AppConfig::is_production();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if production { "production" } else { "development" },
        "Starting Assist AI Backend"
    );

    if production {
        validate_production_config(&config)?;
    } else {
        for problem in config.timeout_errors() {
            warn!(
                request_timeout_secs = config.server.request_timeout_secs,
                "{}", problem
            );
        }
    }
    if config.auth.demo_mode {
        warn!(email = %config.auth.demo_email, "Demo mode enabled: requests without a token act as the demo teacher");
    }
    if config.admin.credentials().is_none() {
        warn!("No admin account configured; admin login is disabled");
    }

    // Migrations run from a separate job in production
    let store = db::connect_store(&config.database, !production).await?;

    let metrics = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    let gateway = ai::build_gateway(&config.ai)?;
    if gateway.is_none() {
        warn!("AI provider not configured; chat and feedback will use fallback replies");
    }
    let translator = ai::build_translator(&config.translation)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState::new(store, config)?
        .with_ai(gateway)
        .with_translator(translator)
        .with_metrics(metrics);

    let app = routes::create_router(state);

    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "assist_ai_backend=info,tower_http=info".into()
        } else {
            "assist_ai_backend=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Refuse to start with a configuration unfit for production
fn validate_production_config(config: &config::AppConfig) -> Result<()> {
    let errors = config.production_errors();

    if config.database.url.contains("localhost") || config.database.url.contains("127.0.0.1") {
        warn!("Database URL contains localhost - ensure this is intentional for production");
    }

    if !errors.is_empty() {
        for err in &errors {
            error!("Configuration error: {}", err);
        }
        anyhow::bail!("Invalid production configuration");
    }

    Ok(())
}

/// Graceful shutdown signal handler
///
/// A handler that fails to install is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
