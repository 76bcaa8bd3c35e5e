//! Cursor Background Agents MCP Library
//!
//! MCP-compatible tools and resources for the Cursor background-agents
//! API.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use cursor_agents_mcp::{config::Config, CursorAgentsMcpServer};
//!
//! let config = Config::from_env()?;
//! let server = CursorAgentsMcpServer::new(&config);
//! // Serve via stdio or mount as a streamable HTTP service
//! ```
//!
//! # Features
//! - Agents: launch, follow up, delete, list, status, conversation
//! - Account: API key info, available models
//! - Repositories: cached listing with search, owner filter, pagination
//!
//! # Requirements
//! - `CURSOR_API_KEY` set in the environment

pub mod api;
pub mod cache;
pub mod config;
pub mod listing;
pub mod params;
pub mod server;
pub mod types;

// Re-export main server type
pub use server::CursorAgentsMcpServer;
