//! Integration tests for cursor-agents-mcp
//!
//! These tests run against the real Cursor API. They require:
//! - CURSOR_API_KEY set in the environment
//! - Network access to api.cursor.com
//!
//! # Running tests
//!
//! ```bash
//! # Run read-only tests (safe, no side effects)
//! CURSOR_API_KEY=... cargo test --test integration -- --ignored
//! ```
//!
//! All tests here are read-only; nothing launches or deletes agents.

use std::sync::Arc;

use cursor_agents_mcp::api::CursorClient;
use cursor_agents_mcp::cache::RepositoryCache;
use cursor_agents_mcp::config::DEFAULT_API_URL;

/// Build a client from the environment, or None to skip the test
fn live_client() -> Option<CursorClient> {
    let api_key = std::env::var("CURSOR_API_KEY").ok()?;
    let api_url =
        std::env::var("CURSOR_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    Some(CursorClient::new(api_url, api_key))
}

#[tokio::test]
#[ignore = "integration test - requires CURSOR_API_KEY and network"]
async fn read_api_key_info() {
    let Some(client) = live_client() else {
        eprintln!("Skipping: CURSOR_API_KEY not set");
        return;
    };

    let info = client.get_me().await.expect("get_me failed");
    assert!(!info.api_key_name.is_empty());
    println!("API key: {}", info.api_key_name);
}

#[tokio::test]
#[ignore = "integration test - requires CURSOR_API_KEY and network"]
async fn read_models() {
    let Some(client) = live_client() else {
        eprintln!("Skipping: CURSOR_API_KEY not set");
        return;
    };

    let models = client.list_models().await.expect("list_models failed");
    assert!(!models.models.is_empty(), "expected at least one model");
    println!("Models: {:?}", models.models);
}

#[tokio::test]
#[ignore = "integration test - requires CURSOR_API_KEY and network"]
async fn read_agents_list() {
    let Some(client) = live_client() else {
        eprintln!("Skipping: CURSOR_API_KEY not set");
        return;
    };

    let page = client
        .list_agents(Some(5), None)
        .await
        .expect("list_agents failed");
    println!("Agents returned: {}", page.agents.len());
}

#[tokio::test]
#[ignore = "integration test - requires CURSOR_API_KEY, network, and repository rate-limit headroom"]
async fn repository_cache_serves_second_call_without_refetch() {
    let Some(client) = live_client() else {
        eprintln!("Skipping: CURSOR_API_KEY not set");
        return;
    };

    // The listing endpoint allows 1 call/user/minute; the cache must make
    // both reads cost a single upstream call.
    let cache = RepositoryCache::new(Arc::new(client));

    let first = cache.get_repositories().await.expect("refresh failed");
    let second = cache.get_repositories().await.expect("cache read failed");

    assert!(Arc::ptr_eq(&first, &second));
    println!("Repositories: {}", first.len());
}
