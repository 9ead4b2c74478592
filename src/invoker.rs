use std::sync::Arc;
use std::time::Duration;

use crate::config::AdapterConfig;
use crate::models::workers::{
    RunOptions, WorkersMessage, WorkersParams, WorkersResponse, WorkersTool,
};
use crate::provider::Provider;

/// Returned when the primary attempts and the fallback all failed or came
/// back empty. This is the guaranteed terminal branch; it cannot fail.
pub const LAST_RESORT_RESPONSE: &str = "Desculpe, estou com dificuldades técnicas no momento. \
Por favor, tente novamente em alguns instantes.";

/// Invoker policy. Constructed from [`AdapterConfig`] in production; tests
/// pass their own values (typically a zero retry delay).
#[derive(Debug, Clone)]
pub struct InvokerConfig {
    pub primary_model: String,
    pub fallback_model: String,
    /// Retries after the first primary attempt.
    pub max_retries: u32,
    /// Fixed pause between primary attempts. No exponential backoff; attempt
    /// volume is small and the latency budget is bounded by the caller.
    pub retry_delay: Duration,
}

impl From<&AdapterConfig> for InvokerConfig {
    fn from(config: &AdapterConfig) -> Self {
        Self {
            primary_model: config.primary_model.clone(),
            fallback_model: config.fallback_model.clone(),
            max_retries: config.max_retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }
}

/// What the caller wants run: converted messages, tools and parameters.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    pub messages: Vec<WorkersMessage>,
    pub tools: Option<Vec<WorkersTool>>,
    pub params: WorkersParams,
}

/// One entry of the attempt plan: which model, with which options, and
/// whether to pause before moving on after an unsuccessful outcome.
struct Attempt {
    model: String,
    options: RunOptions,
    pause_after: bool,
}

/// Orchestrates Provider calls: bounded retries against the primary model,
/// one shot at the fallback model, then a synthetic last-resort response.
/// `invoke` never fails and never propagates a Provider error.
pub struct InferenceInvoker {
    provider: Arc<dyn Provider>,
    config: InvokerConfig,
}

/// A response counts as valid only when it carries non-empty free text or at
/// least one tool call; the model is empirically prone to empty successes, so
/// the absence of an error is not trusted.
fn is_valid(response: &WorkersResponse) -> bool {
    let has_text = response
        .response
        .as_deref()
        .map(|t| !t.trim().is_empty())
        .unwrap_or(false);
    let has_tool_calls = response
        .tool_calls
        .as_deref()
        .map(|calls| !calls.is_empty())
        .unwrap_or(false);
    has_text || has_tool_calls
}

impl InferenceInvoker {
    pub fn new(provider: Arc<dyn Provider>, config: InvokerConfig) -> Self {
        Self { provider, config }
    }

    /// The resilience policy as data: `max_retries + 1` primary attempts with
    /// a pause after each non-final one, then a single fallback attempt
    /// carrying only the message list and the temperature/max_tokens subset,
    /// no tools.
    fn plan(&self, options: &CallOptions) -> Vec<Attempt> {
        let primary_attempts = self.config.max_retries as usize + 1;
        let mut plan = Vec::with_capacity(primary_attempts + 1);

        for i in 0..primary_attempts {
            plan.push(Attempt {
                model: self.config.primary_model.clone(),
                options: RunOptions {
                    messages: options.messages.clone(),
                    tools: options.tools.clone().filter(|t| !t.is_empty()),
                    params: options.params.clone(),
                },
                pause_after: i + 1 < primary_attempts,
            });
        }

        plan.push(Attempt {
            model: self.config.fallback_model.clone(),
            options: RunOptions {
                messages: options.messages.clone(),
                tools: None,
                params: WorkersParams {
                    temperature: options.params.temperature,
                    max_tokens: options.params.max_tokens,
                    ..Default::default()
                },
            },
            pause_after: false,
        });

        plan
    }

    /// Run the attempt plan in order, short-circuiting on the first valid
    /// response. Attempts are strictly sequential; the only suspension points
    /// are the Provider call itself and the fixed retry pause.
    pub async fn invoke(&self, options: CallOptions) -> WorkersResponse {
        for (attempt_no, attempt) in self.plan(&options).into_iter().enumerate() {
            match self.provider.run(&attempt.model, &attempt.options).await {
                Ok(response) if is_valid(&response) => {
                    tracing::info!(model = %attempt.model, attempt = attempt_no, "model call succeeded");
                    return response;
                }
                Ok(_) => {
                    tracing::warn!(model = %attempt.model, attempt = attempt_no, "model returned an empty response");
                }
                Err(e) => {
                    tracing::error!(model = %attempt.model, attempt = attempt_no, error = %e, "model call failed");
                }
            }

            if attempt.pause_after && !self.config.retry_delay.is_zero() {
                tokio::time::sleep(self.config.retry_delay).await;
            }
        }

        tracing::error!(
            primary = %self.config.primary_model,
            fallback = %self.config.fallback_model,
            "all models failed; returning last-resort response"
        );
        WorkersResponse {
            response: Some(LAST_RESORT_RESPONSE.to_string()),
            tool_calls: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_responses_are_invalid() {
        assert!(!is_valid(&WorkersResponse::default()));
        assert!(!is_valid(&WorkersResponse {
            response: Some("   ".into()),
            tool_calls: Some(vec![]),
        }));
    }

    #[test]
    fn text_or_tool_calls_make_a_response_valid() {
        assert!(is_valid(&WorkersResponse {
            response: Some("hi".into()),
            tool_calls: None,
        }));
        assert!(is_valid(&WorkersResponse {
            response: None,
            tool_calls: Some(vec![crate::models::workers::WorkersToolCall {
                name: "t".into(),
                arguments: serde_json::json!({}),
            }]),
        }));
    }
}
