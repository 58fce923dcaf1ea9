//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the color, webhook and health handlers
//! - Wire up middleware (request ID, tracing, CORS, timeout, body limit)
//! - Inject the translator into handlers through `AppState`
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderName, Method},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::color::ColorTranslator;
use crate::config::{BridgeConfig, CorsConfig};
use crate::http::handlers::{health, set_color, webhook};
use crate::http::request::request_span;
use crate::mqtt::Publisher;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<ColorTranslator>,
}

/// HTTP front of the bridge.
pub struct HttpServer {
    router: Router,
    config: BridgeConfig,
}

impl HttpServer {
    /// Create a server publishing through `publisher`.
    pub fn new(config: BridgeConfig, publisher: Arc<dyn Publisher>) -> Self {
        let translator = ColorTranslator::from_config(&config.bridge, &config.mqtt, publisher);
        tracing::debug!(translator = ?translator, "Translator ready");

        let state = AppState {
            translator: Arc::new(translator),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &BridgeConfig, state: AppState) -> Router {
        let api = Router::new()
            .route("/set/{color}", post(set_color))
            .route("/change/{color}", get(set_color))
            .route("/webhook", post(webhook));

        let base_path = config.listener.base_path.as_str();
        let routes = if base_path.is_empty() {
            Router::new().merge(api)
        } else {
            Router::new().nest(base_path, api)
        };

        let mut router = routes
            .route("/health", get(health))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.listener.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        if config.cors.enabled {
            router = router.layer(cors_layer(&config.cors));
        }

        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            base_path = %self.config.listener.base_path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// CORS policy: mirror any origin, with the configured headers and methods.
///
/// Entries that are not valid header or method names are skipped; config
/// validation reports them before the server is built.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let headers: Vec<HeaderName> = config
        .allowed_headers
        .iter()
        .filter_map(|h| HeaderName::from_bytes(h.as_bytes()).ok())
        .collect();
    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| Method::from_bytes(m.as_bytes()).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(config.allow_credentials)
        .allow_headers(headers)
        .allow_methods(methods)
}
