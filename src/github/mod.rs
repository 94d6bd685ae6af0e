// GitHub API module.
// Provides client and types for the slice of the REST API the site consumes.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::GitHubClient;
pub use types::*;
