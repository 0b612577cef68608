//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, queue and worker wiring, and the Axum server
//! lifecycle including graceful shutdown.

use crate::application::services::{
    LinkService, QrService, ReachabilityService, RedirectService, TokenBucketLimiter,
};
use crate::config::Config;
use crate::domain::queue;
use crate::domain::repositories::{ClickRepository, ShortUrlRepository};
use crate::infrastructure::cache::{QrCache, ReachabilityCache};
use crate::infrastructure::metrics::GaugeRegistry;
use crate::infrastructure::persistence::{
    InMemoryClickRepository, InMemoryShortUrlRepository, PgClickRepository, PgShortUrlRepository,
};
use crate::infrastructure::probe::{HttpProbe, ReqwestProbe};
use crate::infrastructure::qr::{QrRenderer, SvgQrRenderer};
use crate::routes::app_router;
use crate::state::AppState;
use crate::workers::{
    MetricsAggregator, MetricsScheduler, QrWorker, REDIRECT_COUNTER, ReachabilityWorker,
    URI_COUNTER, run_click_worker,
};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// How long in-flight jobs may run after the server stops accepting requests.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(15);

/// Running background tasks.
pub struct Workers {
    scheduler: JoinHandle<()>,
    consumers: Vec<JoinHandle<()>>,
}

impl Workers {
    /// Stops the scheduler and waits for the consumers to drain their queues.
    ///
    /// Consumers finish once every [`AppState`] clone is dropped. Those still
    /// running when `grace` expires are aborted.
    pub async fn shutdown(self, grace: Duration) {
        self.scheduler.abort();

        let deadline = tokio::time::Instant::now() + grace;
        for handle in self.consumers {
            let abort = handle.abort_handle();
            if tokio::time::timeout_at(deadline, handle).await.is_err() {
                tracing::warn!("Worker did not drain in time, aborting");
                abort.abort();
            }
        }
        tracing::info!("Background workers stopped");
    }
}

/// Creates the queues, caches and services, and spawns one worker per queue.
///
/// Must be called from within a Tokio runtime.
pub fn build_state(
    config: &Config,
    short_urls: Arc<dyn ShortUrlRepository>,
    clicks: Arc<dyn ClickRepository>,
    probe: Arc<dyn HttpProbe>,
    renderer: Arc<dyn QrRenderer>,
) -> (AppState, Workers) {
    let (reachability_tx, reachability_rx) =
        queue::bounded("reachability", config.reachability_queue_capacity);
    let (qr_tx, qr_rx) = queue::bounded("qr", config.qr_queue_capacity);
    let (click_tx, click_rx) = queue::bounded("click", config.click_queue_capacity);
    let (uri_tx, uri_rx) = queue::bounded(URI_COUNTER, config.metrics_queue_capacity);
    let (redirect_tx, redirect_rx) =
        queue::bounded(REDIRECT_COUNTER, config.metrics_queue_capacity);

    let reachability_cache = Arc::new(ReachabilityCache::new());
    let qr_cache = Arc::new(QrCache::new());
    let gauges = Arc::new(GaugeRegistry::new());
    let limiter = Arc::new(TokenBucketLimiter::new(config.rate_limit_window()));

    let consumers = vec![
        tokio::spawn(
            ReachabilityWorker::new(
                probe,
                reachability_cache.clone(),
                config.probe_retry_policy(),
            )
            .run(reachability_rx),
        ),
        tokio::spawn(QrWorker::new(renderer.clone(), qr_cache.clone()).run(qr_rx)),
        tokio::spawn(run_click_worker(click_rx, clicks.clone())),
        tokio::spawn(
            MetricsAggregator::new(URI_COUNTER, short_urls.clone(), gauges.clone()).run(uri_rx),
        ),
        tokio::spawn(
            MetricsAggregator::new(REDIRECT_COUNTER, clicks, gauges.clone()).run(redirect_rx),
        ),
    ];
    let scheduler = tokio::spawn(
        MetricsScheduler::new(config.metrics_interval())
            .target(URI_COUNTER, uri_tx)
            .target(REDIRECT_COUNTER, redirect_tx)
            .run(),
    );
    tracing::info!("Background workers started");

    let reachability_service = Arc::new(ReachabilityService::new(
        reachability_tx,
        reachability_cache,
    ));
    let qr_service = Arc::new(QrService::new(
        qr_tx,
        qr_cache,
        short_urls.clone(),
        renderer.content_type(),
    ));
    let link_service = Arc::new(LinkService::new(
        short_urls.clone(),
        reachability_service.clone(),
        qr_service.clone(),
        limiter.clone(),
        config.base_url.clone(),
    ));
    let redirect_service = Arc::new(RedirectService::new(
        short_urls.clone(),
        reachability_service.clone(),
        limiter.clone(),
    ));

    let state = AppState {
        link_service,
        redirect_service,
        reachability_service,
        qr_service,
        limiter,
        gauges,
        short_urls,
        click_sender: click_tx,
    };

    (
        state,
        Workers {
            scheduler,
            consumers,
        },
    )
}

/// Opens PostgreSQL storage when configured, in-memory storage otherwise.
async fn connect_storage(
    config: &Config,
) -> Result<(Arc<dyn ShortUrlRepository>, Arc<dyn ClickRepository>)> {
    let Some(ref database_url) = config.database_url else {
        tracing::info!("Storage: in-memory");
        return Ok((
            Arc::new(InMemoryShortUrlRepository::new()),
            Arc::new(InMemoryClickRepository::new()),
        ));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let pool = Arc::new(pool);
    Ok((
        Arc::new(PgShortUrlRepository::new(pool.clone())),
        Arc::new(PgClickRepository::new(pool)),
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL (with migrations) or in-memory storage
/// - Reachability, QR, click and metrics workers
/// - Axum HTTP server
///
/// Returns after Ctrl-C / SIGTERM once the workers have drained.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The HTTP probe client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (short_urls, clicks) = connect_storage(&config).await?;

    let probe = Arc::new(
        ReqwestProbe::new(config.probe_connect_timeout())
            .context("Failed to build HTTP probe client")?,
    );
    let renderer = Arc::new(SvgQrRenderer::default());

    let (state, workers) = build_state(&config, short_urls, clicks, probe, renderer);

    let app = NormalizePathLayer::trim_trailing_slash().layer(app_router(state));

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped, draining workers");
    workers.shutdown(SHUTDOWN_GRACE).await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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
    tracing::info!("Shutdown signal received");
}
