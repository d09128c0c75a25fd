mod config;
mod errors;
mod matching;
mod resume;
mod routes;
mod state;
mod storage;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::matching::broadcast::{MatchSink, NoopMatchSink, RedisMatchSink};
use crate::matching::models::MatchWeights;
use crate::matching::WeightedJobScorer;
use crate::resume::{ExtractorRegistry, ResumeParser, SkillVocabulary};
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::postgres::PgJobCatalog;
use crate::storage::s3::S3DocumentStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Jobboard API v{}", env!("CARGO_PKG_VERSION"));

    // Job catalog (PostgreSQL)
    let catalog =
        Arc::new(PgJobCatalog::connect(&config.database_url, config.db_max_connections).await?);

    // Match broadcast (Redis pub/sub); an empty channel disables it
    let match_sink: Arc<dyn MatchSink> = if config.match_channel.trim().is_empty() {
        info!("Match broadcast disabled");
        Arc::new(NoopMatchSink)
    } else {
        let redis = redis::Client::open(config.redis_url.clone())?;
        info!("Redis client initialized (channel: {})", config.match_channel);
        Arc::new(RedisMatchSink::new(redis, config.match_channel.clone()))
    };

    // Resume storage (S3 / MinIO)
    let s3 = build_s3_client(&config).await;
    let documents = Arc::new(S3DocumentStore::new(s3, config.s3_bucket.clone()));
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    // Resume parser: PDF + DOCX extractors, skill vocabulary from file or built-in
    let vocabulary = match &config.skill_vocabulary_path {
        Some(path) => SkillVocabulary::from_file(path)?,
        None => SkillVocabulary::default(),
    };
    if vocabulary.is_empty() {
        warn!("Skill vocabulary is empty; no skills will be detected");
    } else {
        info!("Skill vocabulary loaded ({} keywords)", vocabulary.len());
    }
    let extractors = ExtractorRegistry::with_defaults();
    info!("Resume formats: {}", extractors.supported_types().join(", "));
    let parser = Arc::new(ResumeParser::new(extractors, Arc::new(vocabulary)));

    // Build app state
    let state = AppState {
        config: config.clone(),
        parser,
        scorer: Arc::new(WeightedJobScorer::new(MatchWeights::default())),
        documents,
        catalog,
        match_sink,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict allowed origins once the web client's domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "jobboard-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    // MinIO serves buckets by path rather than virtual host
    let s3_config = aws_sdk_s3::config::Builder::from(&s3_config)
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(s3_config)
}
