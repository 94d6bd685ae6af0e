// GitHub API endpoint functions.
// Typed methods for the calls the portfolio consumes: the public repo
// listing, the user profile, and per-repo language/commit/contributor stats.

use std::collections::BTreeMap;

use crate::error::Result;

use super::client::GitHubClient;
use super::types::{Contributor, Repository, UserProfile};

impl GitHubClient {
    /// List an account's public repositories, most recently updated first.
    ///
    /// Single page of up to 100; repositories beyond that are unreachable by
    /// design.
    pub async fn list_user_repos(&mut self, account: &str) -> Result<Vec<Repository>> {
        let params = [
            ("type", "public"),
            ("sort", "updated"),
            ("direction", "desc"),
            ("per_page", "100"),
        ];
        let response = self
            .get_with_params(&format!("/users/{}/repos", account), &params)
            .await?;
        let repos: Vec<Repository> = response.json().await?;
        Ok(repos)
    }

    /// Get an account's profile.
    pub async fn get_user(&mut self, account: &str) -> Result<UserProfile> {
        let response = self.get(&format!("/users/{}", account)).await?;
        let profile: UserProfile = response.json().await?;
        Ok(profile)
    }

    /// Get byte counts per language for a repository.
    pub async fn get_repo_languages(
        &mut self,
        owner: &str,
        repo: &str,
    ) -> Result<BTreeMap<String, u64>> {
        let params: [(&str, &str); 0] = [];
        let response = self
            .get_secondary(&format!("/repos/{}/{}/languages", owner, repo), &params)
            .await?;
        let languages: BTreeMap<String, u64> = response.json().await?;
        Ok(languages)
    }

    /// Get the total commit count for a repository.
    ///
    /// Fetches one commit per page and reads the last-page number from the
    /// Link header; a missing header means a single page, so one commit.
    pub async fn get_repo_commit_count(&mut self, owner: &str, repo: &str) -> Result<u64> {
        let params = [("per_page", "1")];
        let response = self
            .get_secondary(&format!("/repos/{}/{}/commits", owner, repo), &params)
            .await?;

        let count = response
            .headers()
            .get("link")
            .and_then(|v| v.to_str().ok())
            .and_then(last_page_from_link)
            .unwrap_or(1);
        Ok(count)
    }

    /// Get up to 100 contributors for a repository.
    pub async fn get_repo_contributors(
        &mut self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<Contributor>> {
        let params = [("per_page", "100")];
        let response = self
            .get_secondary(&format!("/repos/{}/{}/contributors", owner, repo), &params)
            .await?;
        let contributors: Vec<Contributor> = response.json().await?;
        Ok(contributors)
    }
}

/// Extract the `page` number of the `rel="last"` target from a Link header.
fn last_page_from_link(link: &str) -> Option<u64> {
    let segment = link.split(',').find(|s| s.contains(r#"rel="last""#))?;
    let url = segment.trim().strip_prefix('<')?;
    let url = &url[..url.find('>')?];
    let query = url.split('?').nth(1)?;
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("page="))
        .and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_page_from_link() {
        let link = r#"<https://api.github.com/repositories/1/commits?per_page=1&page=2>; rel="next", <https://api.github.com/repositories/1/commits?per_page=1&page=347>; rel="last""#;
        assert_eq!(last_page_from_link(link), Some(347));
    }

    #[test]
    fn test_last_page_ignores_per_page_param() {
        let link = r#"<https://api.github.com/x?page=9&per_page=1>; rel="last""#;
        assert_eq!(last_page_from_link(link), Some(9));
    }

    #[test]
    fn test_last_page_absent() {
        assert_eq!(last_page_from_link(""), None);
        let link = r#"<https://api.github.com/x?page=2>; rel="next""#;
        assert_eq!(last_page_from_link(link), None);
    }
}
