//! Background agent types
//!
//! Structs describing agents and the payloads used to launch and steer
//! them. The launch-side types double as tool input schemas, so they
//! carry `JsonSchema` derives alongside serde.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Pixel dimensions of an attached image
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageDimension {
    pub width: u32,
    pub height: u32,
}

/// A base64-encoded image attached to a prompt
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromptImage {
    #[schemars(description = "Base64 encoded image data")]
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension: Option<ImageDimension>,
}

/// An instruction for an agent, optionally with image attachments
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    #[schemars(description = "The instruction text")]
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Optional array of base64 encoded images (max 5)")]
    pub images: Option<Vec<PromptImage>>,
}

/// The repository an agent works against
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    #[schemars(description = "The GitHub repository URL")]
    pub repository: String,
    /// Git ref (branch/tag) to use as the base branch
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Git ref (branch/tag) to use as the base branch")]
    pub git_ref: Option<String>,
}

/// Options controlling where an agent lands its work
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(
        description = "Whether to automatically create a pull request when the agent completes"
    )]
    pub auto_create_pr: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Custom branch name for the agent to create")]
    pub branch_name: Option<String>,
}

/// Webhook notification settings for agent lifecycle events
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    #[schemars(description = "URL to receive webhook notifications")]
    pub url: String,
    #[schemars(description = "Secret key for webhook payload verification (32-256 characters)")]
    pub secret: String,
}

/// Lifecycle state of a background agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentStatus {
    Creating,
    Running,
    Finished,
    Error,
    Expired,
}

/// Where an agent's work ended up, as reported by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    /// Web URL of the agent session
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_create_pr: Option<bool>,
}

/// A background agent as reported by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub status: AgentStatus,
    pub source: Source,
    pub target: AgentTarget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub created_at: String,
}

/// One page of agents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentList {
    pub agents: Vec<Agent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Bare agent reference, returned by delete and followup calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRef {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_deserializes_camel_case() {
        let json = r#"{
            "id": "bc_abc123",
            "name": "Fix flaky test",
            "status": "RUNNING",
            "source": {"repository": "https://github.com/acme/widgets", "ref": "main"},
            "target": {"url": "https://cursor.com/agents/bc_abc123", "branchName": "cursor/fix-flaky-test"},
            "createdAt": "2025-01-01T00:00:00Z"
        }"#;

        let agent: Agent = serde_json::from_str(json).unwrap();
        assert_eq!(agent.status, AgentStatus::Running);
        assert_eq!(agent.source.git_ref.as_deref(), Some("main"));
        assert_eq!(
            agent.target.branch_name.as_deref(),
            Some("cursor/fix-flaky-test")
        );
        assert!(agent.summary.is_none());
    }

    #[test]
    fn source_serializes_ref_keyword() {
        let source = Source {
            repository: "https://github.com/acme/widgets".to_string(),
            git_ref: Some("develop".to_string()),
        };
        let value = serde_json::to_value(&source).unwrap();
        assert_eq!(value["ref"], "develop");
    }

    #[test]
    fn prompt_omits_absent_images() {
        let prompt = Prompt {
            text: "add a changelog".to_string(),
            images: None,
        };
        let value = serde_json::to_value(&prompt).unwrap();
        assert!(value.get("images").is_none());
    }
}
