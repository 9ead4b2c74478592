// Server entry tests (compile checks)
//
// These tests verify that the router and its state wire together correctly.

use std::sync::Arc;

use async_trait::async_trait;
use chat2workers::config::AdapterConfig;
use chat2workers::invoker::{InferenceInvoker, InvokerConfig};
use chat2workers::models::workers::{RunOptions, WorkersResponse};
use chat2workers::provider::{Provider, ProviderError};
use chat2workers::server::build_router;
use chat2workers::util::AppState;

struct NullProvider;

#[async_trait]
impl Provider for NullProvider {
    async fn run(
        &self,
        _model: &str,
        _options: &RunOptions,
    ) -> Result<WorkersResponse, ProviderError> {
        Ok(WorkersResponse::default())
    }
}

fn test_state() -> Arc<AppState> {
    let config = Arc::new(AdapterConfig::default());
    let invoker = InferenceInvoker::new(Arc::new(NullProvider), InvokerConfig::from(config.as_ref()));
    Arc::new(AppState { config, invoker })
}

#[test]
fn router_builds() {
    let _router = build_router(test_state());
}

#[test]
fn router_builds_with_auth_token_configured() {
    let mut config = AdapterConfig::default();
    config.api_token = Some("secret".into());
    let config = Arc::new(config);
    let invoker = InferenceInvoker::new(Arc::new(NullProvider), InvokerConfig::from(config.as_ref()));
    let _router = build_router(Arc::new(AppState { config, invoker }));
}
