#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use axum_test::TestServer;
use dashmap::DashMap;
use linkgate::config::Config;
use linkgate::infrastructure::persistence::{InMemoryClickRepository, InMemoryShortUrlRepository};
use linkgate::infrastructure::probe::{HttpProbe, ProbeError};
use linkgate::infrastructure::qr::{QrRenderer, RenderError};
use linkgate::routes::app_router;
use linkgate::server::{Workers, build_state};
use linkgate::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tower::Layer;

/// Probe answering from a per-URI status table (200 when unset).
#[derive(Default)]
pub struct StubProbe {
    statuses: DashMap<String, u16>,
    calls: DashMap<String, usize>,
    delay: Option<Duration>,
}

impl StubProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe that sleeps before answering, keeping the worker busy.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn respond(self, uri: &str, status: u16) -> Self {
        self.set_status(uri, status);
        self
    }

    /// Changes the answer for `uri` on later calls.
    pub fn set_status(&self, uri: &str, status: u16) {
        self.statuses.insert(uri.to_string(), status);
    }

    pub fn calls(&self, uri: &str) -> usize {
        self.calls.get(uri).map(|c| *c).unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.iter().map(|c| *c.value()).sum()
    }
}

#[async_trait]
impl HttpProbe for StubProbe {
    async fn get(&self, uri: &str) -> Result<u16, ProbeError> {
        *self.calls.entry(uri.to_string()).or_insert(0) += 1;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.statuses.get(uri).map(|s| *s).unwrap_or(200))
    }
}

/// Renderer producing a tiny SVG that embeds the URL.
#[derive(Default)]
pub struct StubRenderer {
    pub renders: AtomicUsize,
}

impl QrRenderer for StubRenderer {
    fn render(&self, url: &str) -> Result<Vec<u8>, RenderError> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        Ok(format!("<svg><text>{}</text></svg>", url).into_bytes())
    }

    fn content_type(&self) -> &'static str {
        "image/svg+xml"
    }
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

pub fn test_config() -> Config {
    Config {
        base_url: "http://s.test".to_string(),
        probe_retry_delay_ms: 10,
        metrics_interval_seconds: 1,
        ..Config::default()
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub workers: Workers,
    pub short_urls: Arc<InMemoryShortUrlRepository>,
    pub clicks: Arc<InMemoryClickRepository>,
    pub probe: Arc<StubProbe>,
    pub renderer: Arc<StubRenderer>,
}

pub fn spawn_app(config: Config, probe: StubProbe) -> TestApp {
    let short_urls = Arc::new(InMemoryShortUrlRepository::new());
    let clicks = Arc::new(InMemoryClickRepository::new());
    let probe = Arc::new(probe);
    let renderer = Arc::new(StubRenderer::default());

    let (state, workers) = build_state(
        &config,
        short_urls.clone(),
        clicks.clone(),
        probe.clone(),
        renderer.clone(),
    );
    let app = app_router(state.clone()).layer(MockConnectInfoLayer);

    TestApp {
        server: TestServer::new(app).unwrap(),
        state,
        workers,
        short_urls,
        clicks,
        probe,
        renderer,
    }
}

/// Polls `condition` until it holds, panicking after five seconds.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !condition() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not met in time"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Creates a short URL through the API and returns its hash.
pub async fn create_link(server: &TestServer, body: serde_json::Value) -> String {
    let response = server.post("/api/link").json(&body).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<serde_json::Value>()["hash"]
        .as_str()
        .unwrap()
        .to_string()
}
