#![forbid(unsafe_code)]
#![doc = r#"
Chat2Workers

Translate OpenAI Chat Completions requests into Workers AI calls and adapt the results back into the Chat Completions dialect.

Crate highlights
- Library: pure conversion (`conversion`) plus a resilient invoker (`invoker`) over an opaque `Provider` trait.
- HTTP server (in `server`): an OpenAI-compatible `/v1/chat/completions` endpoint with optional bearer auth.
- Resilience: bounded retries on the primary model, one fallback-model attempt, and a guaranteed synthetic last-resort response; Provider flakiness never reaches the caller as an error.

Modules
- `models`: Data structures for the Chat Completions and Workers AI dialects.
- `conversion`: Mapping logic between the two dialects (messages, tools, params, response).
- `invoker`: Retry/fallback orchestration around the Provider.
- `provider`: The Provider trait and the Workers AI REST client.
- `config`: Adapter configuration from environment.
- `error`: OpenAI-style error envelope for the request boundary.
- `server`: Axum router/handlers (the binary uses this).
- `util`: Shared helpers (tracing, env, HTTP client, CORS).

Note: streaming, session persistence and token accounting are intentionally not implemented; usage is always reported as zero.
"#]

pub mod config;
pub mod conversion;
pub mod error;
pub mod invoker;
pub mod models;
pub mod provider;
pub mod server;
pub mod util;

// Re-export the primary conversion functions for ergonomic library use.
pub use crate::conversion::{convert_messages, convert_params, convert_tools, to_chat_response};

pub use crate::invoker::{CallOptions, InferenceInvoker, InvokerConfig};
pub use crate::provider::{Provider, ProviderError};

// Re-export model namespaces for convenience (downstream users can do `use chat2workers::chat`).
pub use crate::models::{chat, workers};
