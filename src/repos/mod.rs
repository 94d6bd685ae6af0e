// Repository showcase module.
// Owns the GitHub client and the session caches, and exposes the pipeline:
// fetch -> filter -> categorize, plus display formatting and profile stats.

pub mod categorize;
pub mod fetcher;
pub mod format;
pub mod stats;

pub use categorize::{CategorizedRepos, activity_score, categorize, featured_showcase};
pub use format::{DisplayRepository, language_color};
pub use stats::{LanguageShare, RepoStats, UserStats};

use crate::cache::{DiskCache, MemoryCache};
use crate::config::SiteConfig;
use crate::github::{GitHubClient, Repository};

/// Facade over the repository pipeline with an explicit lifecycle: create
/// one per session, drop it at teardown. All cache state lives here, not in
/// globals.
pub struct RepoService {
    client: GitHubClient,
    config: SiteConfig,
    repos: MemoryCache<Vec<Repository>>,
    sorted: MemoryCache<CategorizedRepos>,
    user_stats: MemoryCache<UserStats>,
    repo_stats: MemoryCache<RepoStats>,
    disk: DiskCache,
}

impl RepoService {
    /// Build a service for the configured account, with persistence under
    /// the platform cache directory.
    pub fn new(config: SiteConfig) -> crate::error::Result<Self> {
        let client = GitHubClient::new(config.token.as_deref())?;
        Ok(Self::with_client(client, config, DiskCache::new("folio")))
    }

    /// Build a service around an existing client and disk cache.
    pub fn with_client(client: GitHubClient, config: SiteConfig, disk: DiskCache) -> Self {
        Self {
            client,
            config,
            repos: MemoryCache::new(),
            sorted: MemoryCache::new(),
            user_stats: MemoryCache::new(),
            repo_stats: MemoryCache::new(),
            disk,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Drop all session cache state.
    pub fn clear_caches(&mut self) {
        self.repos.clear();
        self.sorted.clear();
        self.user_stats.clear();
        self.repo_stats.clear();
        self.disk.clear();
    }
}
