use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::AdapterConfig;
use crate::invoker::InferenceInvoker;

/// Initialize dotenv and structured tracing based on RUST_LOG.
pub fn init_tracing() {
    let _ = dotenvy::dotenv();

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=info".into());
    let subscriber = fmt().with_env_filter(EnvFilter::new(filter)).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Get the bind address for the HTTP server from env or default to 0.0.0.0:8088.
pub fn env_bind_addr() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8088".into())
}

/// Build the outbound HTTP client. The configured total timeout doubles as
/// the per-request cap on Provider calls.
pub fn build_http_client(config: &AdapterConfig) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_millis(config.timeout_ms))
        .user_agent(format!("chat2workers/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Shared application state used by the HTTP server and handlers. Immutable
/// after startup; each request works on its own data.
pub struct AppState {
    pub config: Arc<AdapterConfig>,
    pub invoker: InferenceInvoker,
}

/// CORS policy for the adapter endpoint: POST plus preflight, with the
/// headers OpenAI clients send.
pub fn cors_layer() -> tower_http::cors::CorsLayer {
    use http::header::{AUTHORIZATION, CONTENT_TYPE};
    use http::Method;

    tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}
