//! Filtered, paginated view over the cached repository listing
//!
//! Pure functions only; filtering and slicing never touch the network
//! or trigger a cache refresh.

use serde::Serialize;

use crate::types::Repository;

/// Page size when the caller does not specify one
pub const DEFAULT_LIMIT: usize = 20;
/// Largest page a single call may request
pub const MAX_LIMIT: usize = 100;

/// Filter and pagination options for one listing call
#[derive(Debug, Clone, Default)]
pub struct ListingQuery {
    /// Case-insensitive substring match on the repository name
    pub search: Option<String>,
    /// Exact, case-sensitive match on the owner
    pub owner: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// One page of the filtered listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryPage {
    pub repositories: Vec<Repository>,
    /// Matches after filtering, before pagination
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

/// Apply a [`ListingQuery`] to the full cached listing
///
/// Out-of-range offsets yield an empty page, never an error. Limits
/// outside 1..=[`MAX_LIMIT`] are clamped into range.
pub fn paginate(repositories: &[Repository], query: &ListingQuery) -> RepositoryPage {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = query.offset.unwrap_or(0);
    let search = query.search.as_deref().map(str::to_lowercase);

    let filtered: Vec<&Repository> = repositories
        .iter()
        .filter(|repo| match &search {
            Some(term) => repo.name.to_lowercase().contains(term),
            None => true,
        })
        .filter(|repo| match &query.owner {
            Some(owner) => repo.owner == *owner,
            None => true,
        })
        .collect();

    let total = filtered.len();
    let page: Vec<Repository> = filtered
        .into_iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect();

    RepositoryPage {
        repositories: page,
        total,
        limit,
        offset,
        has_more: offset + limit < total,
    }
}
