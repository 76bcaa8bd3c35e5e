//! MCP Server implementation for Cursor background agents
//!
//! This module defines the main MCP server that exposes agent
//! management, model listing, and cached repository listing as tools
//! and resources.

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        AnnotateAble, CallToolResult, Content, ListResourceTemplatesResult, ListResourcesResult,
        PaginatedRequestParam, RawResource, RawResourceTemplate, ReadResourceRequestParam,
        ReadResourceResult, Resource, ResourceContents, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use serde::Serialize;
use std::sync::Arc;

use crate::api::{ApiError, CursorClient};
use crate::cache::{CacheError, RepositoryCache};
use crate::config::Config;
use crate::listing::{paginate, ListingQuery};
use crate::params::{
    AddFollowupParams, AgentIdParams, LaunchAgentParams, ListAgentsParams, ListRepositoriesParams,
};

/// The main Cursor Agents MCP Server
#[derive(Clone)]
pub struct CursorAgentsMcpServer {
    client: Arc<CursorClient>,
    repositories: Arc<RepositoryCache>,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Tool Router Implementation
// ============================================================================

#[tool_router]
impl CursorAgentsMcpServer {
    pub fn new(config: &Config) -> Self {
        let client = Arc::new(CursorClient::new(
            config.api_url.clone(),
            config.api_key.clone(),
        ));
        let repositories = Arc::new(RepositoryCache::new(client.clone()));

        Self {
            client,
            repositories,
            tool_router: Self::tool_router(),
        }
    }

    // ========================================================================
    // Agent Tools
    // ========================================================================

    #[tool(description = "Start a new background agent to work on a GitHub repository")]
    async fn launch_agent(
        &self,
        Parameters(params): Parameters<LaunchAgentParams>,
    ) -> Result<CallToolResult, McpError> {
        if let Some(images) = &params.prompt.images {
            if images.len() > 5 {
                return Err(McpError::invalid_params(
                    "prompt accepts at most 5 images",
                    None,
                ));
            }
        }
        if let Some(webhook) = &params.webhook {
            if webhook.secret.len() < 32 || webhook.secret.len() > 256 {
                return Err(McpError::invalid_params(
                    "webhook secret must be 32-256 characters",
                    None,
                ));
            }
        }

        let agent = self
            .client
            .launch_agent(&params)
            .await
            .map_err(api_to_mcp_error)?;
        json_result(&agent)
    }

    #[tool(description = "Add a follow-up instruction to an existing background agent")]
    async fn add_followup(
        &self,
        Parameters(params): Parameters<AddFollowupParams>,
    ) -> Result<CallToolResult, McpError> {
        require_agent_id(&params.agent_id)?;

        let reference = self
            .client
            .add_followup(&params.agent_id, &params.prompt)
            .await
            .map_err(api_to_mcp_error)?;
        json_result(&reference)
    }

    #[tool(
        description = "Delete a background agent. This action is permanent and cannot be undone."
    )]
    async fn delete_agent(
        &self,
        Parameters(params): Parameters<AgentIdParams>,
    ) -> Result<CallToolResult, McpError> {
        require_agent_id(&params.agent_id)?;

        let reference = self
            .client
            .delete_agent(&params.agent_id)
            .await
            .map_err(api_to_mcp_error)?;
        json_result(&reference)
    }

    #[tool(description = "List all background agents for the authenticated user")]
    async fn list_agents(
        &self,
        Parameters(params): Parameters<ListAgentsParams>,
    ) -> Result<CallToolResult, McpError> {
        let agents = self
            .client
            .list_agents(params.limit, params.cursor.as_deref())
            .await
            .map_err(api_to_mcp_error)?;
        json_result(&agents)
    }

    #[tool(description = "Retrieve the current status and results of a background agent")]
    async fn get_agent_status(
        &self,
        Parameters(params): Parameters<AgentIdParams>,
    ) -> Result<CallToolResult, McpError> {
        require_agent_id(&params.agent_id)?;

        let agent = self
            .client
            .get_agent(&params.agent_id)
            .await
            .map_err(api_to_mcp_error)?;
        json_result(&agent)
    }

    #[tool(description = "Retrieve the conversation history of a background agent")]
    async fn get_agent_conversation(
        &self,
        Parameters(params): Parameters<AgentIdParams>,
    ) -> Result<CallToolResult, McpError> {
        require_agent_id(&params.agent_id)?;

        let conversation = self
            .client
            .get_agent_conversation(&params.agent_id)
            .await
            .map_err(api_to_mcp_error)?;
        json_result(&conversation)
    }

    // ========================================================================
    // Account & Catalog Tools
    // ========================================================================

    #[tool(description = "Get information about the API key being used for authentication")]
    async fn get_me(&self) -> Result<CallToolResult, McpError> {
        let info = self.client.get_me().await.map_err(api_to_mcp_error)?;
        json_result(&info)
    }

    #[tool(
        description = "List available models for background agents. Includes 'Auto' option for automatic model selection."
    )]
    async fn list_models(&self) -> Result<CallToolResult, McpError> {
        let models = self.client.list_models().await.map_err(api_to_mcp_error)?;
        json_result(&models)
    }

    #[tool(
        description = "List accessible GitHub repositories, with optional name search, owner filter, and pagination. Results are served from a 5-minute cache because the upstream endpoint is strictly rate limited (1/user/minute)."
    )]
    async fn list_repositories(
        &self,
        Parameters(params): Parameters<ListRepositoriesParams>,
    ) -> Result<CallToolResult, McpError> {
        let repositories = self
            .repositories
            .get_repositories()
            .await
            .map_err(cache_to_mcp_error)?;

        let page = paginate(
            &repositories,
            &ListingQuery {
                search: params.search,
                owner: params.owner,
                limit: params.limit,
                offset: params.offset,
            },
        );
        json_result(&page)
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for CursorAgentsMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Cursor Background Agents MCP Server - provides tools for launching, \
                 steering, and inspecting Cursor background agents, plus model and \
                 repository listings. Requires a CURSOR_API_KEY."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            meta: None,
            next_cursor: None,
            resources: vec![
                resource(
                    "agents://list",
                    "All Agents",
                    "List of all background agents for the authenticated user",
                ),
                resource(
                    "models://list",
                    "Available Models",
                    "List of available models for background agents",
                ),
                resource(
                    "repositories://list",
                    "GitHub Repositories",
                    "List of accessible GitHub repositories (served from cache)",
                ),
            ],
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        Ok(ListResourceTemplatesResult {
            meta: None,
            next_cursor: None,
            resource_templates: vec![
                RawResourceTemplate {
                    uri_template: "agents://{agentId}".into(),
                    name: "Agent Details".into(),
                    title: Some("Agent Details".into()),
                    description: Some("Details of a specific background agent".into()),
                    mime_type: Some("application/json".into()),
                    icons: None,
                }
                .no_annotation(),
                RawResourceTemplate {
                    uri_template: "agents://{agentId}/conversation".into(),
                    name: "Agent Conversation".into(),
                    title: Some("Agent Conversation".into()),
                    description: Some(
                        "Conversation history of a specific background agent".into(),
                    ),
                    mime_type: Some("application/json".into()),
                    icons: None,
                }
                .no_annotation(),
            ],
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let uri = request.uri;
        let json = match uri.as_str() {
            "agents://list" => {
                let agents = self
                    .client
                    .list_agents(None, None)
                    .await
                    .map_err(api_to_mcp_error)?;
                to_pretty_json(&agents)?
            }
            "models://list" => {
                let models = self.client.list_models().await.map_err(api_to_mcp_error)?;
                to_pretty_json(&models)?
            }
            "repositories://list" => {
                let repositories = self
                    .repositories
                    .get_repositories()
                    .await
                    .map_err(cache_to_mcp_error)?;
                to_pretty_json(&serde_json::json!({ "repositories": &*repositories }))?
            }
            other => self.read_agent_resource(other).await?,
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(json, uri)],
        })
    }
}

impl CursorAgentsMcpServer {
    /// Resolve `agents://{id}` and `agents://{id}/conversation` URIs
    async fn read_agent_resource(&self, uri: &str) -> Result<String, McpError> {
        let rest = uri
            .strip_prefix("agents://")
            .ok_or_else(|| resource_not_found(uri))?;

        if let Some(id) = rest.strip_suffix("/conversation") {
            if id.is_empty() || id.contains('/') {
                return Err(resource_not_found(uri));
            }
            let conversation = self
                .client
                .get_agent_conversation(id)
                .await
                .map_err(api_to_mcp_error)?;
            to_pretty_json(&conversation)
        } else if !rest.is_empty() && !rest.contains('/') {
            let agent = self.client.get_agent(rest).await.map_err(api_to_mcp_error)?;
            to_pretty_json(&agent)
        } else {
            Err(resource_not_found(uri))
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value).map_err(|e| McpError::internal_error(e.to_string(), None))
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = to_pretty_json(value)?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn require_agent_id(agent_id: &str) -> Result<(), McpError> {
    if agent_id.trim().is_empty() {
        return Err(McpError::invalid_params("agentId must not be empty", None));
    }
    Ok(())
}

/// Convert an [`ApiError`] to an MCP error, keeping the classification
/// tag both in the message and as structured data
fn api_to_mcp_error(e: ApiError) -> McpError {
    McpError::internal_error(
        format!("{}: {}", e.kind(), e),
        Some(serde_json::json!({ "kind": e.kind() })),
    )
}

fn cache_to_mcp_error(e: CacheError) -> McpError {
    McpError::internal_error(
        format!("{}: {}", e.kind(), e),
        Some(serde_json::json!({ "kind": e.kind(), "cause": e.source_kind() })),
    )
}

fn resource_not_found(uri: &str) -> McpError {
    McpError::resource_not_found(format!("unknown resource URI: {uri}"), None)
}

fn resource(uri: &str, name: &str, description: &str) -> Resource {
    RawResource {
        uri: uri.into(),
        name: name.into(),
        title: Some(name.into()),
        description: Some(description.into()),
        mime_type: Some("application/json".into()),
        size: None,
        icons: None,
        meta: None,
    }
    .no_annotation()
}
