use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use redis::Client as RedisClient;
use sqlx::PgPool;

use crate::chatbot::catalog::Catalog;
use crate::config::Config;
use crate::llm_client::LanguageModel;
use crate::notify::EmailNotifier;
use crate::transcription::transcode::AudioTranscoder;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Rate-limit counters.
    pub redis: RedisClient,
    pub s3: S3Client,
    /// Translation, fallback answers and speech-to-text. Default: `LlmClient`.
    pub llm: Arc<dyn LanguageModel>,
    /// Default: `FfmpegTranscoder`.
    pub transcoder: Arc<dyn AudioTranscoder>,
    pub notifier: EmailNotifier,
    /// Loaded once at startup, never mutated.
    pub catalog: Catalog,
    pub config: Config,
}
