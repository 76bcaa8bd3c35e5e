//! Tool parameter types
//!
//! Input schemas for every tool, derived via schemars. Field names are
//! camelCase on the wire to match the Cursor API. [`LaunchAgentParams`]
//! is also the exact request body of `POST /v0/agents`, so it derives
//! `Serialize` as well.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::{Prompt, Source, Target, Webhook};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LaunchAgentParams {
    #[schemars(description = "The instruction for the agent")]
    pub prompt: Prompt,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "The LLM to use (optional, auto if not provided)")]
    pub model: Option<String>,
    #[schemars(description = "The repository to work on")]
    pub source: Source,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Where the agent should land its work")]
    pub target: Option<Target>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Webhook to notify on agent lifecycle events")]
    pub webhook: Option<Webhook>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddFollowupParams {
    #[schemars(description = "Unique identifier for the background agent")]
    pub agent_id: String,
    #[schemars(description = "The follow-up instruction")]
    pub prompt: Prompt,
}

/// Shared input for tools addressing one agent by id
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgentIdParams {
    #[schemars(description = "Unique identifier for the background agent")]
    pub agent_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListAgentsParams {
    #[schemars(description = "Number of agents to return (1-100, default: 20)")]
    pub limit: Option<u32>,
    #[schemars(description = "Pagination cursor from the previous response")]
    pub cursor: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListRepositoriesParams {
    #[schemars(description = "Case-insensitive substring filter on repository name")]
    pub search: Option<String>,
    #[schemars(description = "Exact owner (user or organization) filter")]
    pub owner: Option<String>,
    #[schemars(description = "Number of repositories to return (1-100, default: 20)")]
    pub limit: Option<usize>,
    #[schemars(description = "Number of repositories to skip (default: 0)")]
    pub offset: Option<usize>,
}
