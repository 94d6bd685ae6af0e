// Repository fetching.
// Cache-first listing of the account's public repositories with the one
// resilience mechanism this system has: fall back to a stale cached value
// when a live refresh fails. No retries, no backoff.

use tracing::{debug, warn};

use crate::error::Result;
use crate::github::Repository;

use super::RepoService;

/// Cache key for the filtered repository list.
pub const REPOS_CACHE_KEY: &str = "repositories";

/// Keep only repositories that are neither forks nor private.
///
/// Applied once at fetch time; nothing downstream re-checks it.
pub fn filter_public_sources(repos: Vec<Repository>) -> Vec<Repository> {
    repos
        .into_iter()
        .filter(|repo| !repo.fork && !repo.private)
        .collect()
}

impl RepoService {
    /// Fetch the account's public, non-fork repositories.
    ///
    /// Fails soft: on any error (network, timeout, non-2xx, malformed
    /// response) this returns the last cached value even if expired, or an
    /// empty list when nothing was ever cached.
    pub async fn fetch_repositories(&mut self) -> Vec<Repository> {
        if let Some(repos) = self.repos.peek(REPOS_CACHE_KEY) {
            debug!("using cached repositories");
            return repos;
        }

        match self.fetch_remote().await {
            Ok(repos) => {
                self.repos.set(REPOS_CACHE_KEY, repos.clone());
                repos
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch repositories");
                match self.repos.peek_stale(REPOS_CACHE_KEY) {
                    Some(stale) => {
                        debug!("using expired repository cache as fallback");
                        stale
                    }
                    None => Vec::new(),
                }
            }
        }
    }

    async fn fetch_remote(&mut self) -> Result<Vec<Repository>> {
        let account = self.config.account.clone();
        let repos = self.client.list_user_repos(&account).await?;
        debug!(count = repos.len(), "fetched repositories");
        Ok(filter_public_sources(repos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::DiskCache;
    use crate::config::SiteConfig;
    use crate::github::GitHubClient;
    use crate::repos::testutil::sample_repo;
    use std::time::Duration;

    /// Service whose client points at a closed local port, so every live
    /// fetch fails immediately.
    fn unreachable_service() -> RepoService {
        let client = GitHubClient::with_base_url(None, "http://127.0.0.1:1").unwrap();
        RepoService::with_client(client, SiteConfig::new("octocat"), DiskCache::disabled())
    }

    #[test]
    fn test_filter_drops_forks_and_private() {
        let mut fork = sample_repo("a-fork", 3, &[]);
        fork.fork = true;
        let mut hidden = sample_repo("hidden", 0, &[]);
        hidden.private = true;
        let kept = sample_repo("kept", 1, &[]);

        let filtered = filter_public_sources(vec![fork, hidden, kept]);
        assert_eq!(filtered.len(), 1);
        assert!(filtered.iter().all(|r| !r.fork && !r.private));
        assert_eq!(filtered[0].name, "kept");
    }

    #[tokio::test]
    async fn test_failed_fetch_returns_empty_without_cache() {
        let mut service = unreachable_service();
        let repos = service.fetch_repositories().await;
        assert!(repos.is_empty());
    }

    #[tokio::test]
    async fn test_failed_fetch_falls_back_to_stale_cache() {
        let mut service = unreachable_service();

        // A prior successful fetch populated the cache; its TTL has since
        // run out.
        service.repos.set_with_ttl(
            REPOS_CACHE_KEY,
            vec![sample_repo("survivor", 2, &[])],
            Duration::ZERO,
        );
        std::thread::sleep(Duration::from_millis(5));
        assert!(service.repos.peek(REPOS_CACHE_KEY).is_none());

        let repos = service.fetch_repositories().await;
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].name, "survivor");
    }

    #[tokio::test]
    async fn test_fresh_cache_short_circuits() {
        let mut service = unreachable_service();
        service
            .repos
            .set(REPOS_CACHE_KEY, vec![sample_repo("cached", 0, &[])]);

        let repos = service.fetch_repositories().await;
        assert_eq!(repos[0].name, "cached");
    }
}
