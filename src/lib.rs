// folio: data core for a personal portfolio site.
// Fetches, caches, categorizes, and formats the account's public GitHub
// repositories, aggregates profile statistics, and loads the markdown blog.
// Everything here is consumed in-process by whatever renders the site.

pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod posts;
pub mod repos;

pub use config::{CategoryConfig, SiteConfig};
pub use error::{FolioError, Result};
pub use github::{GitHubClient, Repository, UserProfile};
pub use posts::{BlogPost, DateFallback, PostLoader};
pub use repos::{CategorizedRepos, DisplayRepository, RepoService, RepoStats, UserStats};
