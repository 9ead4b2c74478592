use anyhow::{bail, Result};

/// Primary model; trained for function calling.
pub const DEFAULT_MODEL: &str = "@hf/nousresearch/hermes-2-pro-mistral-7b";

/// Fallback model used only after the primary is exhausted.
pub const DEFAULT_FALLBACK_MODEL: &str = "@cf/meta/llama-3.1-8b-instruct";

pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Adapter configuration, assembled once at startup and passed explicitly to
/// the invoker and server; there are no process-wide mutable constants.
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    pub primary_model: String,
    pub fallback_model: String,
    /// Retries after the first primary attempt (2 retries = 3 attempts).
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    /// Target total latency budget. Documented for callers; not enforced by
    /// a deadline inside the invoker.
    pub timeout_ms: u64,
    /// Inbound bearer token; auth is skipped when unset (development mode).
    pub api_token: Option<String>,
    /// Workers AI REST endpoint prefix, e.g.
    /// `https://api.cloudflare.com/client/v4/accounts/<id>/ai/run`.
    pub provider_base_url: String,
    pub provider_api_token: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            primary_model: DEFAULT_MODEL.to_string(),
            fallback_model: DEFAULT_FALLBACK_MODEL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            api_token: None,
            provider_base_url: String::new(),
            provider_api_token: String::new(),
        }
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AdapterConfig {
    /// Build the configuration from environment variables.
    ///
    /// Environment:
    /// - CHAT2WORKERS_MODEL / CHAT2WORKERS_FALLBACK_MODEL
    /// - CHAT2WORKERS_MAX_RETRIES / CHAT2WORKERS_RETRY_DELAY_MS / CHAT2WORKERS_TIMEOUT_MS
    /// - CHAT2WORKERS_API_TOKEN (inbound auth, optional)
    /// - WORKERS_AI_BASE_URL, or CLOUDFLARE_ACCOUNT_ID to derive the public endpoint
    /// - WORKERS_AI_API_TOKEN (mandatory)
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let provider_base_url = match env_nonempty("WORKERS_AI_BASE_URL") {
            Some(url) => url,
            None => match env_nonempty("CLOUDFLARE_ACCOUNT_ID") {
                Some(account) => format!(
                    "https://api.cloudflare.com/client/v4/accounts/{account}/ai/run"
                ),
                None => bail!("WORKERS_AI_BASE_URL or CLOUDFLARE_ACCOUNT_ID must be set"),
            },
        };

        let provider_api_token = match env_nonempty("WORKERS_AI_API_TOKEN") {
            Some(token) => token,
            None => bail!("WORKERS_AI_API_TOKEN must be set"),
        };

        Ok(Self {
            primary_model: env_nonempty("CHAT2WORKERS_MODEL").unwrap_or(defaults.primary_model),
            fallback_model: env_nonempty("CHAT2WORKERS_FALLBACK_MODEL")
                .unwrap_or(defaults.fallback_model),
            max_retries: env_nonempty("CHAT2WORKERS_MAX_RETRIES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_retries),
            retry_delay_ms: env_nonempty("CHAT2WORKERS_RETRY_DELAY_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.retry_delay_ms),
            timeout_ms: env_nonempty("CHAT2WORKERS_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_ms),
            api_token: env_nonempty("CHAT2WORKERS_API_TOKEN"),
            provider_base_url,
            provider_api_token,
        })
    }
}
