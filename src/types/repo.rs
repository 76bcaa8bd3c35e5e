//! Repository listing types
//!
//! Repositories accessible to the authenticated user. The listing
//! endpoint is strictly rate limited upstream, which is why reads go
//! through [`crate::cache::RepositoryCache`] rather than the API.

use serde::{Deserialize, Serialize};

/// A GitHub repository the API key can launch agents against
///
/// Uniqueness key is (owner, name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name without the owner
    pub name: String,
    /// Full repository URL
    pub repository: String,
}

/// Response shape of the repository listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryList {
    pub repositories: Vec<Repository>,
}
