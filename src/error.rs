use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde::Serialize;

/// OpenAI error taxonomy exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    InvalidRequestError,
    AuthenticationError,
    ApiError,
    RateLimitError,
}

impl ErrorType {
    fn status(self) -> StatusCode {
        match self {
            ErrorType::InvalidRequestError => StatusCode::BAD_REQUEST,
            ErrorType::AuthenticationError => StatusCode::UNAUTHORIZED,
            ErrorType::ApiError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorType::RateLimitError => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

/// A caller-visible failure, rendered as the OpenAI error envelope:
/// `{"error":{"message","type","code"?}}`.
///
/// Provider flakiness never becomes one of these; the invoker absorbs it.
/// These cover the request boundary (bad body, bad auth) and genuinely
/// unexpected internal failures.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub error_type: ErrorType,
    pub code: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_type: ErrorType::InvalidRequestError,
            code: None,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_type: ErrorType::AuthenticationError,
            code: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_type: ErrorType::ApiError,
            code: None,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    #[serde(rename = "type")]
    error_type: ErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'a str>,
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorBody<'a>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error_type.status();
        let body = ErrorEnvelope {
            error: ErrorBody {
                message: &self.message,
                error_type: self.error_type,
                code: self.code.as_deref(),
            },
        };
        (status, Json(serde_json::to_value(&body).unwrap_or_default())).into_response()
    }
}
