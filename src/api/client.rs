//! Validated request adapter for the Cursor API
//!
//! One HTTP call per invocation: build the URL, attach the bearer
//! credential, decode the body as JSON, classify failures, and validate
//! the payload against the expected response type. No retries; failures
//! are surfaced to the caller, which decides what to do with them.
//!
//! Adding an endpoint is a response shape in [`crate::types`] plus a
//! two-line wrapper here.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::error::{ApiError, ApiResult, ErrorResponse};
use crate::cache::RepositorySource;
use crate::types::{
    Agent, AgentList, AgentRef, ApiKeyInfo, Conversation, ModelList, Prompt, Repository,
    RepositoryList,
};

/// HTTP client for the Cursor background-agents API
///
/// Base URL and credential are injected at construction; there is no
/// ambient global state, so tests can point an instance at a mock
/// server.
#[derive(Clone)]
pub struct CursorClient {
    http: Client,
    base_url: String,
    api_key: String,
}

/// Body of `POST /v0/agents/{id}/followup`
#[derive(Debug, Serialize)]
struct FollowupRequest<'a> {
    prompt: &'a Prompt,
}

impl CursorClient {
    /// Create a client against the given base URL
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let http = Client::builder()
            .user_agent(concat!("cursor-agents-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Perform one validated API call
    ///
    /// The declarative serde shape of `T` is the response schema; the
    /// generic deserializer is the validator. See [`ApiError`] for how
    /// failures are classified.
    async fn request<T, B>(&self, method: Method, endpoint: &str, body: Option<&B>) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%method, %url, "calling Cursor API");

        let mut request = self.http.request(method, &url).bearer_auth(&self.api_key);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        // The body must be JSON whatever the status; the raw text is kept
        // for the error message when it is not.
        let decoded: Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(_) => return Err(ApiError::Decode { body: text }),
        };

        if !status.is_success() {
            if let Ok(parsed) = serde_json::from_value::<ErrorResponse>(decoded) {
                return Err(ApiError::Upstream {
                    status: status.as_u16(),
                    message: parsed.error.message,
                    code: parsed.error.code,
                });
            }
            return Err(ApiError::Transport {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
                body: text,
            });
        }

        serde_json::from_value(decoded).map_err(|e| ApiError::Validation {
            detail: e.to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.request(Method::GET, endpoint, None::<&()>).await
    }

    async fn post<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, endpoint, Some(body)).await
    }

    async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.request(Method::DELETE, endpoint, None::<&()>).await
    }

    // ========================================================================
    // Endpoints
    // ========================================================================

    /// Launch a new background agent
    pub async fn launch_agent<B: Serialize + ?Sized>(&self, request: &B) -> ApiResult<Agent> {
        self.post("/v0/agents", request).await
    }

    /// Send a follow-up instruction to a running agent
    pub async fn add_followup(&self, agent_id: &str, prompt: &Prompt) -> ApiResult<AgentRef> {
        let endpoint = format!("/v0/agents/{agent_id}/followup");
        self.post(&endpoint, &FollowupRequest { prompt }).await
    }

    /// Delete an agent permanently
    pub async fn delete_agent(&self, agent_id: &str) -> ApiResult<AgentRef> {
        self.delete(&format!("/v0/agents/{agent_id}")).await
    }

    /// List agents, newest first
    pub async fn list_agents(
        &self,
        limit: Option<u32>,
        cursor: Option<&str>,
    ) -> ApiResult<AgentList> {
        let mut endpoint = String::from("/v0/agents");

        let query = {
            let mut params = url::form_urlencoded::Serializer::new(String::new());
            if let Some(limit) = limit {
                params.append_pair("limit", &limit.to_string());
            }
            if let Some(cursor) = cursor {
                params.append_pair("cursor", cursor);
            }
            params.finish()
        };
        if !query.is_empty() {
            endpoint.push('?');
            endpoint.push_str(&query);
        }

        self.get(&endpoint).await
    }

    /// Fetch the current status of one agent
    pub async fn get_agent(&self, agent_id: &str) -> ApiResult<Agent> {
        self.get(&format!("/v0/agents/{agent_id}")).await
    }

    /// Fetch the conversation history of one agent
    pub async fn get_agent_conversation(&self, agent_id: &str) -> ApiResult<Conversation> {
        self.get(&format!("/v0/agents/{agent_id}/conversation")).await
    }

    /// Fetch metadata about the API key in use
    pub async fn get_me(&self) -> ApiResult<ApiKeyInfo> {
        self.get("/v0/me").await
    }

    /// List models available for background agents
    pub async fn list_models(&self) -> ApiResult<ModelList> {
        self.get("/v0/models").await
    }

    /// List accessible repositories
    ///
    /// Strictly rate limited upstream (1/user/minute); production reads
    /// go through [`crate::cache::RepositoryCache`] instead of calling
    /// this directly.
    pub async fn list_repositories(&self) -> ApiResult<Vec<Repository>> {
        let listing: RepositoryList = self.get("/v0/repositories").await?;
        Ok(listing.repositories)
    }
}

#[async_trait]
impl RepositorySource for CursorClient {
    async fn fetch_repositories(&self) -> ApiResult<Vec<Repository>> {
        self.list_repositories().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client(server: &mockito::ServerGuard) -> CursorClient {
        CursorClient::new(server.url(), "sk-test")
    }

    #[tokio::test]
    async fn success_returns_validated_value() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v0/models")
            .match_header("authorization", "Bearer sk-test")
            .with_status(200)
            .with_body(r#"{"models":["claude-4-sonnet","Auto"]}"#)
            .create_async()
            .await;

        let models = client(&server).list_models().await.unwrap();
        assert_eq!(models.models, vec!["claude-4-sonnet", "Auto"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn success_with_wrong_shape_is_validation_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v0/models")
            .with_status(200)
            .with_body(r#"{"modelz":["oops"]}"#)
            .create_async()
            .await;

        let err = client(&server).list_models().await.unwrap_err();
        assert_eq!(err.kind(), "validation-error");
        assert!(matches!(err, ApiError::Validation { .. }));
    }

    #[tokio::test]
    async fn recognized_error_body_is_upstream_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v0/me")
            .with_status(401)
            .with_body(r#"{"error":{"message":"Invalid API key","code":"unauthorized"}}"#)
            .create_async()
            .await;

        let err = client(&server).get_me().await.unwrap_err();
        assert_eq!(err.kind(), "upstream-error");
        match err {
            ApiError::Upstream {
                status,
                message,
                code,
            } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid API key");
                assert_eq!(code.as_deref(), Some("unauthorized"));
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unrecognized_error_body_is_transport_error_with_raw_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v0/me")
            .with_status(503)
            .with_body(r#"{"detail":"maintenance window"}"#)
            .create_async()
            .await;

        let err = client(&server).get_me().await.unwrap_err();
        assert_eq!(err.kind(), "transport-error");
        match err {
            ApiError::Transport { status, body, .. } => {
                assert_eq!(status, 503);
                assert_eq!(body, r#"{"detail":"maintenance window"}"#);
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_decode_error_even_on_failure_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v0/models")
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let err = client(&server).list_models().await.unwrap_err();
        assert_eq!(err.kind(), "decode-error");
        match err {
            ApiError::Decode { body } => assert_eq!(body, "<html>Bad Gateway</html>"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_sends_no_content_type() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v0/models")
            .match_header("content-type", Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"models":[]}"#)
            .create_async()
            .await;

        client(&server).list_models().await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn post_sends_json_content_type_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v0/agents/bc_1/followup")
            .match_header("authorization", "Bearer sk-test")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!({
                "prompt": {"text": "also update the docs"}
            })))
            .with_status(200)
            .with_body(r#"{"id":"bc_1"}"#)
            .create_async()
            .await;

        let prompt = Prompt {
            text: "also update the docs".to_string(),
            images: None,
        };
        let reference = client(&server).add_followup("bc_1", &prompt).await.unwrap();
        assert_eq!(reference.id, "bc_1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn list_agents_builds_query_string() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v0/agents")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("limit".into(), "5".into()),
                Matcher::UrlEncoded("cursor".into(), "abc/def".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"agents":[]}"#)
            .create_async()
            .await;

        let page = client(&server)
            .list_agents(Some(5), Some("abc/def"))
            .await
            .unwrap();
        assert!(page.agents.is_empty());
        assert!(page.next_cursor.is_none());
        mock.assert_async().await;
    }
}
