//! Cursor API access
//!
//! A thin, validated HTTP adapter over the Cursor background-agents API.
//! Every call sends the bearer credential, decodes the body as JSON, and
//! validates the payload against the expected response type before it is
//! handed to a tool handler.

pub mod client;
pub mod error;

pub use client::CursorClient;
pub use error::{ApiError, ApiResult};
