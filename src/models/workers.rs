use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Workers AI message.
///
/// The Provider dialect has no native tool-call representation: assistant
/// tool invocations are flattened into `content` as a JSON array, and a
/// tool-result turn is tagged with the tool's `name` rather than a call id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkersMessage {
    /// "system" | "user" | "assistant" | "tool"
    pub role: String,
    /// Always present; empty string when the source turn had no content.
    pub content: String,
    /// Identifies which tool produced a tool-result turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Workers AI tool declaration: the flattened form of an OpenAI function tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkersTool {
    pub name: String,
    pub description: String,
    /// JSON Schema object; defaults to an empty object schema.
    pub parameters: serde_json::Value,
}

/// Tool call emitted by a Workers AI model.
///
/// `arguments` is usually a JSON object, but some models return it already
/// string-encoded; the response mapper handles both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkersToolCall {
    pub name: String,
    pub arguments: serde_json::Value,
}

/// Generation parameters in the Workers AI numeric ranges.
///
/// Produced by `conversion::params::convert_params`; every present field is
/// guaranteed in range. Absent fields are omitted from the wire payload so
/// the model applies its own defaults.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkersParams {
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub top_k: Option<u32>,
    pub max_tokens: Option<u32>,
    pub frequency_penalty: Option<f64>,
    pub presence_penalty: Option<f64>,
    pub repetition_penalty: Option<f64>,
    pub seed: Option<u64>,
    pub lora: Option<String>,
    pub response_format: Option<serde_json::Value>,
}

/// Options passed to `Provider::run`: messages plus optional tools, with the
/// generation parameters flattened alongside them (the Workers AI `AI.run`
/// options shape).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunOptions {
    pub messages: Vec<WorkersMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<WorkersTool>>,
    #[serde(flatten)]
    pub params: WorkersParams,
}

/// Workers AI model output: free text, tool calls, both, or (empirically)
/// neither — an empty success the invoker treats as a failed attempt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkersResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<WorkersToolCall>>,
}
