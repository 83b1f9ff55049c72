mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod routes;
mod screening;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::OpenAiClient;
use crate::routes::build_router;
use crate::screening::extractor::PdfTextExtractor;
use crate::screening::notifier::SendGridNotifier;
use crate::screening::orchestrator::Screener;
use crate::screening::requirements::RequirementsProfile;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load and validate configuration first; any problem here aborts startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screener v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Requirements profile: file if configured, built-in ML engineer profile otherwise
    let profile = match &config.requirements_profile_path {
        Some(path) => RequirementsProfile::from_file(path)?,
        None => RequirementsProfile::default(),
    };
    info!("Screening against profile: {}", profile.position);

    // Initialize pipeline collaborators
    let llm = OpenAiClient::new(config.completion()).context("Failed to build completion client")?;
    info!("Completion client initialized (model: {})", llm.model());

    let notifier = SendGridNotifier::new(config.mail()).context("Failed to build mail client")?;
    let extractor = PdfTextExtractor::new(config.extraction_timeout);

    let screener = Screener::new(
        Arc::new(extractor),
        Arc::new(llm),
        Arc::new(notifier),
        Arc::new(profile),
        config.recruiter_email.clone(),
    );

    // Build app state
    let state = AppState {
        db,
        screener: Arc::new(screener),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the upload form's origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
