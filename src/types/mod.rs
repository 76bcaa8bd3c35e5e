//! Type definitions for Cursor API entities
//!
//! Rust structs representing the JSON payloads exchanged with the
//! Cursor background-agents API. All wire fields are camelCase.

pub mod account;
pub mod agent;
pub mod conversation;
pub mod repo;

pub use account::{ApiKeyInfo, ModelList};
pub use agent::{
    Agent, AgentList, AgentRef, AgentStatus, AgentTarget, ImageDimension, Prompt, PromptImage,
    Source, Target, Webhook,
};
pub use conversation::{Conversation, ConversationMessage, MessageType};
pub use repo::{Repository, RepositoryList};
