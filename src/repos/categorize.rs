// Repository categorization and ranking.
// Splits the filtered repository list into pinned / featured / others using
// the configured name lists and a stars+recency heuristic, then orders each
// bucket. Pure and deterministic; re-run on every cache-miss refresh.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CategoryConfig;
use crate::github::Repository;

use super::RepoService;

/// Cache key for the categorized set.
pub const SORTED_CACHE_KEY: &str = "all-repositories-sorted";

/// Showcase cap carried over from the site's featured grid.
pub const FEATURED_SHOWCASE_LIMIT: usize = 12;

/// The three disjoint showcase buckets, each already ordered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategorizedRepos {
    /// Caller-declared priority repositories, in configured order.
    pub pinned: Vec<Repository>,
    /// Promoted by name list or popularity heuristic, best score first.
    pub featured: Vec<Repository>,
    /// Everything else, most recently updated first.
    pub others: Vec<Repository>,
}

impl CategorizedRepos {
    /// All repositories in bucket order: pinned, featured, others.
    pub fn all(&self) -> Vec<Repository> {
        let mut all = Vec::with_capacity(self.len());
        all.extend(self.pinned.iter().cloned());
        all.extend(self.featured.iter().cloned());
        all.extend(self.others.iter().cloned());
        all
    }

    pub fn len(&self) -> usize {
        self.pinned.len() + self.featured.len() + self.others.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Composite activity score: stars weighted against recency.
///
/// The divisor down-weights the update timestamp so that two repositories
/// with equal stars order by recency, while a modest star edge outweighs
/// typical update-date spreads (a year of recency is worth about 31 points,
/// so roughly 16 stars).
pub fn activity_score(repo: &Repository) -> f64 {
    repo.stargazers_count as f64 * 2.0 + repo.updated_at.timestamp() as f64 / 1_000_000.0
}

fn qualifies_as_featured(repo: &Repository, config: &CategoryConfig) -> bool {
    config.featured.contains(&repo.name) || repo.stargazers_count > 5 || repo.topics.len() > 2
}

/// Partition repositories into pinned / featured / others and order each
/// bucket. Every input repository lands in exactly one bucket.
pub fn categorize(repos: Vec<Repository>, config: &CategoryConfig) -> CategorizedRepos {
    let mut pinned = Vec::new();
    let mut featured = Vec::new();
    let mut others = Vec::new();

    for repo in repos {
        if config.pinned.iter().any(|name| *name == repo.name) {
            pinned.push(repo);
        } else if qualifies_as_featured(&repo, config) {
            featured.push(repo);
        } else {
            others.push(repo);
        }
    }

    // Pinned: the configured list order is the display order.
    pinned.sort_by_key(|repo| {
        config
            .pinned
            .iter()
            .position(|name| *name == repo.name)
            .unwrap_or(usize::MAX)
    });

    featured.sort_by(|a, b| activity_score(b).total_cmp(&activity_score(a)));

    // Others carry no noteworthiness signal, so recency alone decides.
    others.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    CategorizedRepos {
        pinned,
        featured,
        others,
    }
}

/// A single capped list for the featured grid: pinned first (in configured
/// order), then every other qualifying repository by activity score.
pub fn featured_showcase(
    repos: Vec<Repository>,
    config: &CategoryConfig,
    limit: usize,
) -> Vec<Repository> {
    let mut set = categorize(repos, config);
    let mut showcase = std::mem::take(&mut set.pinned);
    showcase.append(&mut set.featured);
    showcase.truncate(limit);
    showcase
}

impl RepoService {
    /// Fetch, categorize, and order the account's repositories.
    ///
    /// Consults the session cache, then the persistent cache, before doing
    /// live work; fails soft to an empty set like the fetcher.
    pub async fn all_repositories_sorted(&mut self) -> CategorizedRepos {
        if let Some(sorted) = self.sorted.get(SORTED_CACHE_KEY) {
            debug!("using cached sorted repositories");
            return sorted;
        }
        if let Some(sorted) = self.disk.get::<CategorizedRepos>(SORTED_CACHE_KEY) {
            debug!("using persisted sorted repositories");
            self.sorted.set(SORTED_CACHE_KEY, sorted.clone());
            return sorted;
        }

        // Categorization needs the repository list first; the name lists are
        // already in hand from configuration.
        let repos = self.fetch_repositories().await;
        let sorted = categorize(repos, &self.config.category);

        if !sorted.is_empty() {
            self.sorted.set(SORTED_CACHE_KEY, sorted.clone());
            self.disk.set(SORTED_CACHE_KEY, &sorted);
        }
        sorted
    }

    /// The capped featured grid for the front page.
    pub async fn featured_repositories(&mut self) -> Vec<Repository> {
        let repos = self.fetch_repositories().await;
        featured_showcase(repos, &self.config.category, FEATURED_SHOWCASE_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::testutil::sample_repo;
    use chrono::{TimeZone, Utc};
    use std::collections::HashSet;

    fn config(pinned: &[&str], featured: &[&str]) -> CategoryConfig {
        CategoryConfig {
            pinned: pinned.iter().map(|s| s.to_string()).collect(),
            featured: featured.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_partition_is_total_and_exclusive() {
        let repos = vec![
            sample_repo("pin-me", 0, &[]),
            sample_repo("by-name", 0, &[]),
            sample_repo("by-stars", 9, &[]),
            sample_repo("by-topics", 0, &["a", "b", "c"]),
            sample_repo("plain", 1, &["x"]),
        ];
        let config = config(&["pin-me"], &["by-name"]);

        let set = categorize(repos, &config);
        assert_eq!(set.pinned.len(), 1);
        assert_eq!(set.featured.len(), 3);
        assert_eq!(set.others.len(), 1);
        assert_eq!(set.all().len(), set.len());

        let names: HashSet<String> = set.all().into_iter().map(|r| r.name).collect();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn test_pinned_ordered_by_configured_list() {
        let repos = vec![
            sample_repo("a", 0, &[]),
            sample_repo("b", 0, &[]),
            sample_repo("c", 0, &[]),
        ];
        let config = config(&["b", "a"], &[]);

        let set = categorize(repos, &config);
        let pinned: Vec<&str> = set.pinned.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(pinned, vec!["b", "a"]);
        assert_eq!(set.others[0].name, "c");
    }

    #[test]
    fn test_featured_equal_stars_tie_breaks_on_recency() {
        let mut old = sample_repo("old", 8, &[]);
        old.updated_at = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
        let mut new = sample_repo("new", 8, &[]);
        new.updated_at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let set = categorize(vec![old, new], &config(&[], &[]));
        let featured: Vec<&str> = set.featured.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(featured, vec!["new", "old"]);
    }

    #[test]
    fn test_star_margin_outweighs_recency_gap() {
        // A four-year update gap is worth ~126 score points; a 94-star
        // margin (188 points) beats it.
        let mut starred = sample_repo("starred", 100, &[]);
        starred.updated_at = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let fresh = sample_repo("fresh", 6, &[]);

        assert!(activity_score(&starred) > activity_score(&fresh));
        let set = categorize(vec![fresh, starred], &config(&[], &[]));
        assert_eq!(set.featured[0].name, "starred");
    }

    #[test]
    fn test_others_ordered_by_update_date() {
        let mut stale = sample_repo("stale", 0, &[]);
        stale.updated_at = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
        let recent = sample_repo("recent", 0, &[]);

        let set = categorize(vec![stale, recent], &config(&[], &[]));
        let others: Vec<&str> = set.others.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(others, vec!["recent", "stale"]);
    }

    #[test]
    fn test_heuristic_promotion_end_to_end() {
        // alpha qualifies via stars > 5, beta via topics > 2.
        let alpha = sample_repo("alpha", 10, &[]);
        let beta = sample_repo("beta", 1, &["x", "y", "z", "w"]);

        let set = categorize(vec![alpha, beta], &CategoryConfig::empty());
        assert!(set.pinned.is_empty());
        assert!(set.others.is_empty());
        let featured: Vec<&str> = set.featured.iter().map(|r| r.name.as_str()).collect();
        // Same update time, so alpha's higher star score wins.
        assert_eq!(featured, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_featured_showcase_pins_first_and_caps() {
        let mut repos = vec![sample_repo("pinned-repo", 0, &[])];
        for i in 0..15 {
            repos.push(sample_repo(&format!("starred-{:02}", i), 10 + i, &[]));
        }

        let showcase = featured_showcase(repos, &config(&["pinned-repo"], &[]), 12);
        assert_eq!(showcase.len(), 12);
        assert_eq!(showcase[0].name, "pinned-repo");
        // Remainder ordered by score, best first.
        assert_eq!(showcase[1].name, "starred-14");
    }
}
