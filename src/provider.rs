use async_trait::async_trait;
use serde::Deserialize;

use crate::models::workers::{RunOptions, WorkersResponse};

/// Errors raised by a Provider implementation. The invoker treats every
/// variant the same way (retry, then fallback), so the split exists for
/// logging and for direct library users.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("upstream reported failure: {0}")]
    Upstream(String),
}

/// The inference backend boundary: an opaque async call that may fail or
/// return a semantically empty success. All resilience lives above this
/// trait, in `crate::invoker`.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn run(&self, model: &str, options: &RunOptions)
        -> Result<WorkersResponse, ProviderError>;
}

/// REST envelope wrapping every Workers AI response.
#[derive(Debug, Deserialize)]
struct RunEnvelope {
    #[serde(default)]
    result: Option<WorkersResponse>,
    #[serde(default)]
    success: bool,
    #[serde(default)]
    errors: Vec<ApiMessage>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    code: Option<i64>,
    message: String,
}

/// Workers AI REST client: POSTs the run options as JSON to
/// `{base_url}/{model}` with bearer auth and unwraps the
/// `{result, success, errors}` envelope.
pub struct WorkersAiClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl WorkersAiClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_token: api_token.into(),
        }
    }

    fn run_url(&self, model: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), model)
    }
}

#[async_trait]
impl Provider for WorkersAiClient {
    async fn run(
        &self,
        model: &str,
        options: &RunOptions,
    ) -> Result<WorkersResponse, ProviderError> {
        let url = self.run_url(model);
        tracing::debug!(model, messages = options.messages.len(), "calling model");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(options)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: RunEnvelope = resp.json().await?;
        if !envelope.success {
            let detail = envelope
                .errors
                .iter()
                .map(|e| match e.code {
                    Some(code) => format!("{} ({code})", e.message),
                    None => e.message.clone(),
                })
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ProviderError::Upstream(detail));
        }

        envelope
            .result
            .ok_or_else(|| ProviderError::Upstream("missing result in success envelope".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_url_joins_without_duplicate_slash() {
        let client = WorkersAiClient::new(
            reqwest::Client::new(),
            "https://example.test/ai/run/",
            "tok",
        );
        assert_eq!(
            client.run_url("@cf/meta/llama-3.1-8b-instruct"),
            "https://example.test/ai/run/@cf/meta/llama-3.1-8b-instruct"
        );
    }

    #[test]
    fn envelope_decodes_errors() {
        let raw = r#"{"result":null,"success":false,"errors":[{"code":7009,"message":"model overloaded"}]}"#;
        let envelope: RunEnvelope = serde_json::from_str(raw).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.errors[0].message, "model overloaded");
        assert_eq!(envelope.errors[0].code, Some(7009));
    }

    #[test]
    fn envelope_decodes_result() {
        let raw = r#"{"result":{"response":"hi"},"success":true,"errors":[]}"#;
        let envelope: RunEnvelope = serde_json::from_str(raw).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.result.unwrap().response.as_deref(), Some("hi"));
    }
}
