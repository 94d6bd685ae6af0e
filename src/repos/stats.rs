// Profile and per-repository statistics.
// Aggregates the numbers the stats dashboard renders: profile counters,
// star/fork totals, a top-languages breakdown, and per-repo commit and
// contributor counts. All fetch paths fail soft to zeroed values.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::github::{Repository, UserProfile};

use super::RepoService;
use super::format::language_color;

const USER_STATS_CACHE_KEY: &str = "user-stats";

/// How many languages the breakdown keeps.
pub const TOP_LANGUAGE_COUNT: usize = 6;

/// One language's share of the repository list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub name: String,
    /// Percentage of repositories naming this as primary language, rounded.
    pub percentage: u32,
    pub color: String,
}

/// Profile-level statistics for the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserStats {
    pub public_repos: u64,
    pub followers: u64,
    pub following: u64,
    pub public_gists: u64,
    pub total_stars: u64,
    pub total_forks: u64,
    pub top_languages: Vec<LanguageShare>,
}

/// Per-repository statistics.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RepoStats {
    pub total_commits: u64,
    pub contributors_count: u64,
}

/// Combine the profile record with totals derived from the repo list.
pub fn aggregate_user_stats(profile: &UserProfile, repos: &[Repository]) -> UserStats {
    let total_stars = repos.iter().map(|r| r.stargazers_count).sum();
    let total_forks = repos.iter().map(|r| r.forks_count).sum();

    UserStats {
        public_repos: profile.public_repos,
        followers: profile.followers,
        following: profile.following,
        public_gists: profile.public_gists,
        total_stars,
        total_forks,
        top_languages: top_languages(repos),
    }
}

/// The most used primary languages as a share of the repo list, largest
/// first, capped at `TOP_LANGUAGE_COUNT`.
fn top_languages(repos: &[Repository]) -> Vec<LanguageShare> {
    if repos.is_empty() {
        return Vec::new();
    }

    let mut counts: std::collections::BTreeMap<&str, usize> = std::collections::BTreeMap::new();
    for repo in repos {
        if let Some(language) = repo.language.as_deref() {
            *counts.entry(language).or_insert(0) += 1;
        }
    }

    let total = repos.len() as f64;
    let mut shares: Vec<LanguageShare> = counts
        .into_iter()
        .map(|(name, count)| LanguageShare {
            name: name.to_string(),
            percentage: ((count as f64 / total) * 100.0).round() as u32,
            color: language_color(Some(name)).to_string(),
        })
        .collect();

    // BTreeMap iteration already ordered by name, so equal shares stay in a
    // stable alphabetical order.
    shares.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    shares.truncate(TOP_LANGUAGE_COUNT);
    shares
}

impl RepoService {
    /// Statistics for the account's profile, cached per session.
    ///
    /// Fails soft: any fetch error yields `UserStats::default()`.
    pub async fn user_stats(&mut self) -> UserStats {
        if let Some(stats) = self.user_stats.get(USER_STATS_CACHE_KEY) {
            return stats;
        }

        match self.fetch_user_stats().await {
            Ok(stats) => {
                self.user_stats.set(USER_STATS_CACHE_KEY, stats.clone());
                stats
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch user stats");
                UserStats::default()
            }
        }
    }

    async fn fetch_user_stats(&mut self) -> Result<UserStats> {
        let account = self.config.account.clone();
        let profile = self.client.get_user(&account).await?;
        let repos = self.fetch_repositories().await;
        Ok(aggregate_user_stats(&profile, &repos))
    }

    /// Commit and contributor counts for one repository, cached per session.
    ///
    /// Fails soft to zeroed stats.
    pub async fn repo_stats(&mut self, repo: &str) -> RepoStats {
        let key = format!("stats-{}", repo);
        if let Some(stats) = self.repo_stats.get(&key) {
            return stats;
        }

        match self.fetch_repo_stats(repo).await {
            Ok(stats) => {
                self.repo_stats.set(key, stats);
                stats
            }
            Err(err) => {
                warn!(repo, error = %err, "failed to fetch repo stats");
                RepoStats::default()
            }
        }
    }

    async fn fetch_repo_stats(&mut self, repo: &str) -> Result<RepoStats> {
        let account = self.config.account.clone();
        let total_commits = self.client.get_repo_commit_count(&account, repo).await?;
        let contributors = self.client.get_repo_contributors(&account, repo).await?;

        Ok(RepoStats {
            total_commits,
            contributors_count: contributors.len() as u64,
        })
    }

    /// Byte counts per language for one repository; empty on failure.
    pub async fn repo_languages(&mut self, repo: &str) -> std::collections::BTreeMap<String, u64> {
        let account = self.config.account.clone();
        match self.client.get_repo_languages(&account, repo).await {
            Ok(languages) => languages,
            Err(err) => {
                warn!(repo, error = %err, "failed to fetch repo languages");
                Default::default()
            }
        }
    }
}
