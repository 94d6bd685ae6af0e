// Site configuration.
// The account, token, and showcase name lists are explicit values injected
// into the service rather than module-level singletons, so tests can swap
// them freely.

use std::collections::HashSet;

/// The account whose public repositories the site displays.
pub const DEFAULT_ACCOUNT: &str = "antonvice";

/// Repositories promoted to the top of the showcase, in display order.
/// GitHub has no public endpoint for pinned status, so this is code-level
/// configuration by necessity.
pub const DEFAULT_PINNED: &[&str] = &[
    "DreamDiffusion",
    "SelfTUI",
    "moondream",
    "my-blog",
    "arasaka2",
    "mondr",
];

/// Repositories promoted to the featured bucket by name, regardless of the
/// stars/topics heuristic.
pub const DEFAULT_FEATURED: &[&str] = &[
    "selflayer-dash",
    "pocker",
    "vice",
    "slbrowser",
    "v07",
    "sf_bot",
    "sl_landings",
];

/// Name lists driving the pinned/featured/others partition.
#[derive(Debug, Clone)]
pub struct CategoryConfig {
    /// Ordered: index in this list is the pinned bucket's sort key.
    pub pinned: Vec<String>,
    /// Unordered: membership only.
    pub featured: HashSet<String>,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            pinned: DEFAULT_PINNED.iter().map(|s| s.to_string()).collect(),
            featured: DEFAULT_FEATURED.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CategoryConfig {
    /// Config with empty name lists, leaving only the popularity heuristic.
    pub fn empty() -> Self {
        Self {
            pinned: Vec::new(),
            featured: HashSet::new(),
        }
    }
}

/// Configuration for the portfolio data layer.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// GitHub account whose repositories are fetched.
    pub account: String,
    /// Optional API token. Absence is not an error, just a lower rate limit.
    pub token: Option<String>,
    pub category: CategoryConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ACCOUNT)
    }
}

impl SiteConfig {
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            token: None,
            category: CategoryConfig::default(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Pick up a token from the GITHUB_TOKEN environment variable if set.
    pub fn token_from_env(mut self) -> Self {
        self.token = std::env::var("GITHUB_TOKEN").ok();
        self
    }

    pub fn with_category(mut self, category: CategoryConfig) -> Self {
        self.category = category;
        self
    }
}
