mod chatbot;
mod config;
mod db;
mod errors;
mod extract;
mod llm_client;
mod messaging;
mod models;
mod notify;
mod rate_limit;
mod routes;
mod state;
mod storage;
mod transcription;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::chatbot::catalog::Catalog;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::notify::EmailNotifier;
use crate::routes::build_router;
use crate::state::AppState;
use crate::transcription::transcode::FfmpegTranscoder;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Labour Hub API v{}", env!("CARGO_PKG_VERSION"));

    // Load the chatbot catalog
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("Could not load catalog from {}", path.display()))?,
        None => Catalog::builtin().context("Built-in catalog is invalid")?,
    };
    info!("Chatbot catalog loaded ({} entries)", catalog.len());

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url, config.db_max_connections).await?;

    // Initialize Redis
    let redis = redis::Client::open(config.redis_url.clone())?;
    info!(
        "Redis client initialized (rate limit: {}/min)",
        config.rate_limit_per_minute
    );

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    // Initialize model client
    let llm = LlmClient::new(config.openai_api_key.clone(), config.openai_timeout)?;
    info!(
        "Model client initialized (chat: {}, speech: {})",
        llm_client::CHAT_MODEL,
        llm_client::TRANSCRIPTION_MODEL
    );

    let transcoder = FfmpegTranscoder::new(config.ffmpeg_path.clone(), config.transcode_timeout);

    let notifier = EmailNotifier::new(
        config.sendgrid_api_key.clone(),
        config.sendgrid_sender.clone(),
        config.openai_timeout,
    )?;
    if !notifier.is_enabled() {
        info!("SendGrid not configured; message e-mails disabled");
    }

    // Build app state
    let state = AppState {
        db,
        redis,
        s3,
        llm: Arc::new(llm),
        transcoder: Arc::new(transcoder),
        notifier,
        catalog,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "labourhub-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
