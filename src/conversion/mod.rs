//! Mapping logic between the Chat Completions dialect and the Workers AI
//! dialect.
//!
//! Each submodule is a pure, synchronous mapper:
//! - `messages`: conversation history, role mapping and tool-call-id reconciliation.
//! - `tools`: function tool declarations (structural flatten).
//! - `params`: generation parameters, clamped into the Workers AI ranges.
//! - `response`: Workers AI result back into an OpenAI chat-completion object.

pub mod messages;
pub mod params;
pub mod response;
pub mod tools;

pub use messages::convert_messages;
pub use params::convert_params;
pub use response::to_chat_response;
pub use tools::convert_tools;
