//! talks-indexer server binary.
//!
//! Reads configuration from `TALKS_INDEXER__*` environment variables (see
//! [`talks_indexer::config::AppConfig`]) and serves the reindex API and the
//! admin console until SIGINT or SIGTERM.

use std::error::Error;
use std::sync::Arc;

use talks_indexer::adapters::http::app_router;
use talks_indexer::adapters::{ElasticsearchClient, ElasticsearchConfig, MoresleepClient, MoresleepConfig};
use talks_indexer::application::{ConferenceCache, IndexNames, Indexer, IndexerService};
use talks_indexer::config::AppConfig;
use talks_indexer::ports::{SearchIndex, TalkSource};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let moresleep = &config.moresleep;
    let source: Arc<dyn TalkSource> = Arc::new(MoresleepClient::new(
        MoresleepConfig::new(&moresleep.url)
            .with_credentials(&moresleep.user, moresleep.password.clone())
            .with_timeout(moresleep.timeout()),
    )?);

    let es = &config.elasticsearch;
    let search: Arc<dyn SearchIndex> = Arc::new(ElasticsearchClient::new(
        ElasticsearchConfig::new(&es.url)
            .with_credentials(&es.username, es.password.clone())
            .with_timeout(es.timeout()),
    )?);

    let mut service = IndexerService::new(
        source.clone(),
        search,
        IndexNames::new(&es.public_index, &es.private_index),
    );
    if let Some(deadline) = config.sync.operation_timeout() {
        service = service.with_deadline(deadline);
    }
    let indexer: Arc<dyn Indexer> = Arc::new(service);
    let conferences = Arc::new(ConferenceCache::new(source));

    let app = app_router(indexer, conferences, config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        moresleep = %moresleep.url,
        elasticsearch = %es.url,
        public_index = %es.public_index,
        private_index = %es.private_index,
        "talks-indexer listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// JSON logs outside development, human-readable logs in development.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.server.environment.json_logs() {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
