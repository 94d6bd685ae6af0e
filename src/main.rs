// CLI preview of the portfolio data pipeline.
// Runs one fetch/categorize pass and prints the showcase buckets, profile
// stats, and blog listing the site would render.

use folio::posts::PostLoader;
use folio::repos::DisplayRepository;
use folio::{CategorizedRepos, Repository, RepoService, Result, SiteConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = SiteConfig::default().token_from_env();
    let mut service = RepoService::new(config)?;

    let sorted = service.all_repositories_sorted().await;
    print_showcase(&sorted);

    let stats = service.user_stats().await;
    println!("\nprofile: {} repos, {} stars, {} forks, {} followers",
        stats.public_repos, stats.total_stars, stats.total_forks, stats.followers);
    for lang in &stats.top_languages {
        println!("  {:>3}% {}", lang.percentage, lang.name);
    }

    let posts = PostLoader::new("posts").load_all();
    if !posts.is_empty() {
        println!("\nblog:");
        for post in &posts {
            println!("  {} - {}", post.date.format("%Y-%m-%d"), post.title);
        }
    }

    Ok(())
}

fn print_showcase(sorted: &CategorizedRepos) {
    print_bucket("pinned", &sorted.pinned);
    print_bucket("featured", &sorted.featured);
    print_bucket("others", &sorted.others);
}

fn print_bucket(label: &str, repos: &[Repository]) {
    println!("{} ({}):", label, repos.len());
    for repo in repos {
        let display = DisplayRepository::from(repo);
        println!(
            "  {:<24} {:>5}* {:<12} {}  {}",
            display.name,
            display.stargazers_count,
            display.language.as_deref().unwrap_or("-"),
            display.formatted_date,
            display.short_description
        );
    }
}
