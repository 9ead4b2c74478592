use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use crate::models::chat::{
    ChatChoice, ChatCompletionResponse, ChatResponseMessage, ChatUsage, FunctionCall, ToolCall,
};
use crate::models::workers::{WorkersResponse, WorkersToolCall};

/// Substituted when the model produced neither tool calls nor usable text;
/// downstream consumers reject a response with empty content and no tool
/// calls.
pub const EMPTY_RESPONSE_FALLBACK: &str = "Desculpe, não consegui processar sua solicitação.";

fn generate_completion_id() -> String {
    format!("chatcmpl-{}", opaque_suffix())
}

fn generate_tool_call_id() -> String {
    format!("call_{}", opaque_suffix())
}

/// 12-char opaque suffix; unique enough within a response, no cross-request
/// guarantee needed.
fn opaque_suffix() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    id[..12].to_string()
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Convert Workers AI tool calls into the caller shape, minting a fresh call
/// id per entry. `arguments` already string-encoded passes through; anything
/// structured is JSON-encoded.
fn convert_tool_calls(calls: &[WorkersToolCall]) -> Vec<ToolCall> {
    calls
        .iter()
        .map(|call| ToolCall {
            id: generate_tool_call_id(),
            call_type: "function".to_string(),
            function: FunctionCall {
                name: call.name.clone(),
                arguments: match &call.arguments {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                },
            },
        })
        .collect()
}

/// Convert a Workers AI result into an OpenAI chat-completion response.
///
/// With tool calls: message content is `null` and finish_reason is
/// "tool_calls". Without: the free text, or the fixed fallback sentence when
/// the text is absent or whitespace-only, and finish_reason "stop". Usage is
/// always zeroed; token accounting is out of scope. This function cannot
/// fail, whatever the Provider returned.
pub fn to_chat_response(result: &WorkersResponse, model: &str) -> ChatCompletionResponse {
    let tool_calls = result
        .tool_calls
        .as_deref()
        .filter(|calls| !calls.is_empty())
        .map(convert_tool_calls);

    let content = if tool_calls.is_some() {
        None
    } else {
        let text = result
            .response
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        Some(match text {
            Some(_) => result.response.clone().unwrap_or_default(),
            None => EMPTY_RESPONSE_FALLBACK.to_string(),
        })
    };

    let finish_reason = if tool_calls.is_some() {
        "tool_calls"
    } else {
        "stop"
    };

    ChatCompletionResponse {
        id: generate_completion_id(),
        object: "chat.completion".to_string(),
        created: unix_now(),
        model: model.to_string(),
        choices: vec![ChatChoice {
            index: 0,
            message: ChatResponseMessage {
                role: "assistant".to_string(),
                content,
                tool_calls,
            },
            finish_reason: finish_reason.to_string(),
        }],
        usage: ChatUsage::default(),
    }
}
