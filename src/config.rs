//! Process configuration
//!
//! Read once at startup from the environment:
//! - `CURSOR_API_KEY` (required) - bearer credential for the Cursor API
//! - `CURSOR_API_URL` - API base URL override
//! - `MCP_SERVER_MODE=http` or `--http` - serve over streamable HTTP
//! - `PORT` - HTTP mode listen port
//!
//! A missing API key is a fatal startup condition, not a runtime error.

use anyhow::{bail, Context, Result};

/// Default API base URL
pub const DEFAULT_API_URL: &str = "https://api.cursor.com";
/// Default listen port in HTTP mode
pub const DEFAULT_PORT: u16 = 3000;

/// Startup configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer credential, valid for the process lifetime
    pub api_key: String,
    /// API base URL, fixed at startup
    pub api_url: String,
    /// Serve MCP over streamable HTTP instead of stdio
    pub http_mode: bool,
    pub port: u16,
}

impl Config {
    /// Load configuration from the environment
    pub fn from_env() -> Result<Self> {
        let api_key = match std::env::var("CURSOR_API_KEY") {
            Ok(key) if !key.is_empty() => key,
            _ => bail!("CURSOR_API_KEY environment variable is required"),
        };

        let api_url =
            std::env::var("CURSOR_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let http_mode = std::env::var("MCP_SERVER_MODE")
            .map(|mode| mode.eq_ignore_ascii_case("http"))
            .unwrap_or(false)
            || std::env::args().any(|arg| arg == "--http");

        let port = match std::env::var("PORT") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("invalid PORT value: {value}"))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            api_key,
            api_url,
            http_mode,
            port,
        })
    }
}
