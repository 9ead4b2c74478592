use std::collections::HashMap;

use serde_json::Value;

use crate::models::chat::{ChatMessage, Role, ToolCall};
use crate::models::workers::WorkersMessage;

/// Instruction block appended to the system prompt when the request carries
/// tools. The Workers AI model does not reliably self-select tool use, so the
/// prompt has to push it.
pub const TOOL_USE_INSTRUCTIONS: &str = "You have access to the tools declared in this request. \
When the user's request requires external data or an action, you must respond by calling the \
appropriate tool with JSON arguments instead of answering in plain text.";

/// Preamble for the synthesized system turn when the conversation has none.
pub const SYNTHESIZED_SYSTEM_PREAMBLE: &str = "You are a helpful assistant.";

/// Map a Chat Completions role onto the Workers AI role vocabulary.
///
/// The mapping is total: `Developer` is the OpenAI alias for system-level
/// instructions, and anything unrecognized degrades to "user" rather than
/// being rejected.
fn map_role(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::Developer => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::Tool => "tool",
        Role::Unknown => "user",
    }
}

/// Flatten an assistant turn's tool calls into a JSON array literal of
/// `{name, arguments}` objects, with `arguments` parsed back into structure.
///
/// Degraded branch: if any call's argument string is not valid JSON the whole
/// turn renders as the empty array literal. No partial list, no error.
fn render_tool_calls(calls: &[ToolCall]) -> String {
    let mut rendered = Vec::with_capacity(calls.len());
    for call in calls {
        match serde_json::from_str::<Value>(&call.function.arguments) {
            Ok(arguments) => rendered.push(serde_json::json!({
                "name": call.function.name,
                "arguments": arguments,
            })),
            Err(_) => return "[]".to_string(),
        }
    }
    Value::Array(rendered).to_string()
}

/// Convert an ordered Chat Completions history into Workers AI messages.
///
/// Single pass, order preserving. While scanning, every assistant tool call
/// registers its id→name pair; later tool-result turns resolve their `name`
/// through that map, falling back to the turn's own `name` field, and are
/// emitted nameless if neither is available.
///
/// When `tools_present` is true the tool-use instruction block is injected
/// exactly once: appended to the last system-mapped turn, or carried by a
/// synthesized system turn inserted at the head when the conversation has no
/// system turn at all. Output length equals input length except for that one
/// possible synthesized turn.
pub fn convert_messages(messages: &[ChatMessage], tools_present: bool) -> Vec<WorkersMessage> {
    let mut call_names: HashMap<&str, &str> = HashMap::new();
    let mut out = Vec::with_capacity(messages.len() + 1);

    for msg in messages {
        let role = map_role(msg.role);
        let mut content = msg.content.clone().unwrap_or_default();
        let mut name = None;

        if msg.role == Role::Tool {
            name = msg
                .tool_call_id
                .as_deref()
                .and_then(|id| call_names.get(id).map(|n| n.to_string()))
                .or_else(|| msg.name.clone());
        }

        if msg.role == Role::Assistant {
            if let Some(calls) = &msg.tool_calls {
                for call in calls {
                    call_names.insert(&call.id, &call.function.name);
                }
                // The Provider has no tool_calls field in history; the calls
                // replace whatever text the turn carried.
                content = render_tool_calls(calls);
            }
        }

        out.push(WorkersMessage {
            role: role.to_string(),
            content,
            name,
        });
    }

    if tools_present {
        inject_tool_instructions(&mut out);
    }

    out
}

/// Append the tool-use instruction block to the last system turn, or insert a
/// synthesized system turn at the head when none exists. Applied at most once
/// per request; message order is otherwise untouched.
fn inject_tool_instructions(messages: &mut Vec<WorkersMessage>) {
    match messages.iter().rposition(|m| m.role == "system") {
        Some(pos) => {
            let target = &mut messages[pos];
            if target.content.is_empty() {
                target.content = TOOL_USE_INSTRUCTIONS.to_string();
            } else {
                target.content.push_str("\n\n");
                target.content.push_str(TOOL_USE_INSTRUCTIONS);
            }
        }
        None => {
            messages.insert(
                0,
                WorkersMessage {
                    role: "system".to_string(),
                    content: format!("{SYNTHESIZED_SYSTEM_PREAMBLE}\n\n{TOOL_USE_INSTRUCTIONS}"),
                    name: None,
                },
            );
        }
    }
}
