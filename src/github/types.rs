// GitHub API response types.
// Typed deserialization doubles as schema validation: a repository listing
// is parsed as a whole, so one malformed record fails the entire batch and
// the caller treats the service as degraded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A public repository as returned by the listing endpoint.
///
/// Immutable once deserialized; display-ready derivations are separate
/// copies (see `repos::format`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub fork: bool,
    pub private: bool,
    pub homepage: Option<String>,
}

/// Profile-level fields from `/users/{account}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub public_repos: u64,
    pub followers: u64,
    pub following: u64,
    pub public_gists: u64,
    pub avatar_url: Option<String>,
}

/// Entry from `/repos/{owner}/{repo}/contributors`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contributor {
    pub login: String,
    pub contributions: u64,
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}
