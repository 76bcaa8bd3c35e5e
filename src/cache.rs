//! Time-bounded repository cache
//!
//! The repository listing endpoint is strictly rate limited (1/user/minute),
//! so the server keeps a single snapshot of the listing and refreshes it at
//! most once per TTL window. Concurrent callers that hit a stale or absent
//! snapshot join one shared in-flight refresh instead of each issuing their
//! own upstream call.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::{BoxFuture, Shared};
use futures_util::FutureExt;
use parking_lot::Mutex;
use thiserror::Error;
use tokio::time::Instant;
use tracing::debug;

use crate::api::{ApiError, ApiResult};
use crate::types::Repository;

/// How long a fetched snapshot stays fresh
pub const REPOSITORY_TTL: Duration = Duration::from_secs(5 * 60);

/// Source of the repository listing
///
/// Implemented by [`crate::api::CursorClient`]; test code substitutes
/// a mock to observe call counts and inject failures.
#[async_trait]
pub trait RepositorySource: Send + Sync {
    async fn fetch_repositories(&self) -> ApiResult<Vec<Repository>>;
}

/// Errors surfaced by the cache
#[derive(Error, Debug, Clone)]
pub enum CacheError {
    /// The upstream refresh failed; delivered to every caller that was
    /// waiting on it
    #[error("repository refresh failed: {0}")]
    Refresh(Arc<ApiError>),
}

impl CacheError {
    /// Stable classification tag for this error
    pub fn kind(&self) -> &'static str {
        "cache-refresh-error"
    }

    /// Classification tag of the wrapped API error
    pub fn source_kind(&self) -> &'static str {
        match self {
            CacheError::Refresh(inner) => inner.kind(),
        }
    }
}

/// One fetched snapshot of the listing
#[derive(Clone)]
struct CacheEntry {
    repositories: Arc<Vec<Repository>>,
    fetched_at: Instant,
}

type RefreshFuture = Shared<BoxFuture<'static, Result<CacheEntry, CacheError>>>;

struct CacheState {
    entry: Option<CacheEntry>,
    in_flight: Option<RefreshFuture>,
}

/// TTL cache over the repository listing endpoint
///
/// Holds at most one snapshot at a time. The snapshot is replaced
/// wholesale behind the mutex, so a reader sees either the old entry or
/// the fully installed new one, never a partial update.
pub struct RepositoryCache {
    source: Arc<dyn RepositorySource>,
    ttl: Duration,
    state: Mutex<CacheState>,
}

impl RepositoryCache {
    pub fn new(source: Arc<dyn RepositorySource>) -> Self {
        Self {
            source,
            ttl: REPOSITORY_TTL,
            state: Mutex::new(CacheState {
                entry: None,
                in_flight: None,
            }),
        }
    }

    /// Return the full cached listing, refreshing it if stale
    ///
    /// A fresh snapshot is returned without any network call. Otherwise
    /// exactly one upstream fetch runs, no matter how many callers are
    /// waiting; all of them receive the result of that one fetch. A
    /// failed refresh is reported to every waiter; the stale snapshot
    /// is never served in its place.
    pub async fn get_repositories(&self) -> Result<Arc<Vec<Repository>>, CacheError> {
        let refresh = {
            let mut state = self.state.lock();

            if let Some(entry) = &state.entry {
                if entry.fetched_at.elapsed() < self.ttl {
                    debug!("repository cache hit");
                    return Ok(Arc::clone(&entry.repositories));
                }
            }

            match state.in_flight.clone() {
                Some(refresh) => {
                    debug!("joining in-flight repository refresh");
                    refresh
                }
                None => {
                    debug!("starting repository refresh");
                    let source = Arc::clone(&self.source);
                    let refresh = async move {
                        let repositories = source
                            .fetch_repositories()
                            .await
                            .map_err(|e| CacheError::Refresh(Arc::new(e)))?;
                        Ok(CacheEntry {
                            repositories: Arc::new(repositories),
                            fetched_at: Instant::now(),
                        })
                    }
                    .boxed()
                    .shared();
                    state.in_flight = Some(refresh.clone());
                    refresh
                }
            }
            // lock released before awaiting
        };

        let result = refresh.clone().await;

        let mut state = self.state.lock();
        if state
            .in_flight
            .as_ref()
            .is_some_and(|current| current.ptr_eq(&refresh))
        {
            state.in_flight = None;
            if let Ok(entry) = &result {
                state.entry = Some(entry.clone());
            }
        }

        result.map(|entry| entry.repositories)
    }
}
