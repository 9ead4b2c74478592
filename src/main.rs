use std::sync::Arc;

use chat2workers::config::AdapterConfig;
use chat2workers::invoker::{InferenceInvoker, InvokerConfig};
use chat2workers::provider::WorkersAiClient;
use chat2workers::server::build_router;
use chat2workers::util::{build_http_client, env_bind_addr, init_tracing, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Arc::new(AdapterConfig::from_env()?);

    let http = build_http_client(&config);
    let provider = Arc::new(WorkersAiClient::new(
        http,
        config.provider_base_url.clone(),
        config.provider_api_token.clone(),
    ));
    let invoker = InferenceInvoker::new(provider, InvokerConfig::from(config.as_ref()));

    if config.api_token.is_some() {
        tracing::info!("Auth mode: bearer token required");
    } else {
        tracing::info!("Auth mode: open (no CHAT2WORKERS_API_TOKEN configured)");
    }

    let addr = env_bind_addr();
    tracing::info!(
        model = %config.primary_model,
        fallback = %config.fallback_model,
        "chat2workers listening on http://{}",
        addr
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        invoker,
    });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, build_router(state)).await?;

    Ok(())
}
