//! Data models for the two dialects the adapter bridges.
//!
//! This module groups two submodules:
//! - `chat`: Types representing a commonly used subset of the OpenAI Chat Completions request and response models.
//! - `workers`: Types representing the Workers AI message/tool contract and the `run` call options.
//!
//! The mapping logic between the two dialects lives in `crate::conversion`.

pub mod chat;
pub mod workers;

// Optional convenience re-exports for downstream users.
// These allow importing commonly-used types directly from `chat2workers::models::*`.
pub use chat::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, FunctionDef, GenerationParams,
    Role, ToolDefinition,
};
pub use workers::{
    RunOptions, WorkersMessage, WorkersParams, WorkersResponse, WorkersTool, WorkersToolCall,
};
