use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::conversion::{convert_messages, convert_params, convert_tools, to_chat_response};
use crate::error::ApiError;
use crate::invoker::CallOptions;
use crate::models::chat::{ChatCompletionRequest, ChatCompletionResponse};
use crate::util::{cors_layer, AppState};

/// Build the Axum router. The completion endpoint is served both at the root
/// (the original worker URL shape) and at the OpenAI path.
pub fn build_router(state: Arc<AppState>) -> Router {
    let completions = Router::new()
        .route("/", post(chat_completions))
        .route("/v1/chat/completions", post(chat_completions))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/status", get(status))
        .merge(completions)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// Service status endpoint to expose configuration and available routes.
async fn status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "chat2workers",
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.config.primary_model,
        "fallback_model": state.config.fallback_model,
        "routes": ["/status", "/", "/v1/chat/completions"],
    }))
}

/// Bearer-token check for the completion routes. Skipped entirely when no
/// inbound token is configured (development mode).
async fn require_auth(State(state): State<Arc<AppState>>, req: Request, next: Next) -> Response {
    let Some(expected) = state.config.api_token.as_deref() else {
        return next.run(req).await;
    };

    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match header {
        None => ApiError::unauthorized("Missing Authorization header").into_response(),
        Some(value) => match value.strip_prefix("Bearer ") {
            Some(token) if token == expected => next.run(req).await,
            Some(_) => ApiError::unauthorized("Invalid API token").into_response(),
            None => {
                ApiError::unauthorized("Invalid Authorization format. Expected: Bearer <token>")
                    .into_response()
            }
        },
    }
}

/// Translate a Chat Completions request, run it against Workers AI, and
/// translate the result back.
///
/// Provider failures never surface here; the invoker converts them into a
/// usable (possibly apologetic) response, so this handler only rejects
/// structurally bad requests.
async fn chat_completions(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatCompletionRequest>, JsonRejection>,
) -> Result<Json<ChatCompletionResponse>, ApiError> {
    let Json(request) =
        payload.map_err(|e| ApiError::bad_request(format!("invalid request body: {e}")))?;

    if request.messages.is_empty() {
        return Err(ApiError::bad_request("messages array cannot be empty"));
    }

    let tools = request
        .tools
        .as_deref()
        .filter(|tools| !tools.is_empty());

    let messages = convert_messages(&request.messages, tools.is_some());
    let workers_tools = tools.map(convert_tools);
    let params = convert_params(&request.params);

    let result = state
        .invoker
        .invoke(CallOptions {
            messages,
            tools: workers_tools,
            params,
        })
        .await;

    // The caller sees the model it asked for, not the one actually run.
    let model = request
        .model
        .as_deref()
        .unwrap_or(&state.config.primary_model);

    Ok(Json(to_chat_response(&result, model)))
}
