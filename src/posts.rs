// Markdown blog post loader.
// Reads a directory of front-matter-less markdown files named
// `YYYY-MM-DD-slug.md`, deriving title, date, cleaned content, and an
// excerpt from each. Listing order is filename-descending, which the naming
// convention turns into newest-first.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::warn;

use crate::error::Result;

/// Maximum characters of excerpt shown in the listing.
pub const EXCERPT_LIMIT: usize = 200;

/// A loaded blog post.
#[derive(Debug, Clone, Serialize)]
pub struct BlogPost {
    /// Filename without the `.md` extension.
    pub slug: String,
    pub filename: String,
    pub title: String,
    pub date: DateTime<Utc>,
    /// Raw text with formatting-marker lines stripped.
    pub content: String,
    /// First paragraph, truncated.
    pub excerpt: String,
}

/// Date assigned to a post whose filename carries no `YYYY-MM-DD` prefix.
///
/// `Now` matches the site's historical behavior but makes listing order of
/// such files unstable across runs; `Fixed` pins it down.
#[derive(Debug, Clone, Copy, Default)]
pub enum DateFallback {
    #[default]
    Now,
    Fixed(DateTime<Utc>),
}

impl DateFallback {
    fn resolve(&self) -> DateTime<Utc> {
        match self {
            DateFallback::Now => Utc::now(),
            DateFallback::Fixed(date) => *date,
        }
    }
}

/// Loads posts from a directory of markdown files.
#[derive(Debug, Clone)]
pub struct PostLoader {
    dir: PathBuf,
    date_fallback: DateFallback,
}

impl PostLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            date_fallback: DateFallback::default(),
        }
    }

    pub fn with_date_fallback(mut self, fallback: DateFallback) -> Self {
        self.date_fallback = fallback;
        self
    }

    /// Load every post, newest filename first. An unreadable directory
    /// yields an empty list, not an error.
    pub fn load_all(&self) -> Vec<BlogPost> {
        let listing = match fs::read_dir(&self.dir) {
            Ok(listing) => listing,
            Err(err) => {
                warn!(dir = %self.dir.display(), error = %err, "failed to read posts directory");
                return Vec::new();
            }
        };

        let mut filenames: Vec<String> = listing
            .flatten()
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.ends_with(".md"))
            .collect();
        filenames.sort_by(|a, b| b.cmp(a));

        filenames
            .into_iter()
            .filter_map(|filename| match fs::read_to_string(self.dir.join(&filename)) {
                Ok(raw) => Some(self.parse(&filename, &raw)),
                Err(err) => {
                    warn!(filename, error = %err, "failed to read post");
                    None
                }
            })
            .collect()
    }

    /// Load one post by slug. A missing file is `Ok(None)`, distinct from a
    /// read fault.
    pub fn load_by_slug(&self, slug: &str) -> Result<Option<BlogPost>> {
        let filename = format!("{}.md", slug);
        let path = self.dir.join(&filename);
        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&path)?;
        Ok(Some(self.parse(&filename, &raw)))
    }

    fn parse(&self, filename: &str, raw: &str) -> BlogPost {
        let slug = filename.trim_end_matches(".md").to_string();

        let title = title_from_content(raw).unwrap_or_else(|| title_from_slug(&slug));
        let date = date_from_slug(&slug)
            .map(|d| d.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc())
            .unwrap_or_else(|| self.date_fallback.resolve());

        let content = clean_content(raw);
        let excerpt = excerpt_of(&content);

        BlogPost {
            slug,
            filename: filename.to_string(),
            title,
            date,
            content,
            excerpt,
        }
    }
}

/// First `# ` heading, trimmed.
fn title_from_content(raw: &str) -> Option<String> {
    raw.lines()
        .find(|line| line.starts_with("# "))
        .map(|line| line[2..].trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Slug with any date prefix stripped and dashes turned into spaces.
fn title_from_slug(slug: &str) -> String {
    strip_date_prefix(slug).replace('-', " ")
}

fn strip_date_prefix(slug: &str) -> &str {
    if date_from_slug(slug).is_some() && slug.len() > 11 && slug.as_bytes()[10] == b'-' {
        &slug[11..]
    } else {
        slug
    }
}

/// Leading `YYYY-MM-DD` from the slug, if present and a real date.
fn date_from_slug(slug: &str) -> Option<NaiveDate> {
    // get() rather than slicing: byte 10 of an arbitrary filename may fall
    // inside a multibyte character.
    let prefix = slug.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

fn is_marker_line(line: &str) -> bool {
    let trimmed = line.trim_end();
    trimmed.starts_with('#')
        || (trimmed.len() > 1 && trimmed.starts_with('*') && trimmed.ends_with('*'))
        || trimmed == "section-divider"
        || trimmed == "| section-content"
        || (!trimmed.is_empty() && trimmed.chars().all(|c| c == '-'))
}

/// Strip formatting-marker lines (headings, full-line italics like
/// "*Published on ...*", divider tokens) and collapse blank runs, keeping
/// paragraphs separated by a single blank line.
fn clean_content(raw: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut last_blank = true;

    for line in raw.lines() {
        let blank = line.trim().is_empty() || is_marker_line(line);
        if blank {
            if !last_blank {
                lines.push("");
            }
            last_blank = true;
        } else {
            lines.push(line);
            last_blank = false;
        }
    }

    lines.join("\n").trim().to_string()
}

/// First paragraph of the cleaned content, truncated.
fn excerpt_of(content: &str) -> String {
    let first_paragraph = content.split("\n\n").next().unwrap_or("");
    if first_paragraph.chars().count() > EXCERPT_LIMIT {
        let truncated: String = first_paragraph.chars().take(EXCERPT_LIMIT).collect();
        format!("{}...", truncated)
    } else {
        first_paragraph.to_string()
    }
}

/// Long-form post date, e.g. "January 5, 2024".
pub fn format_post_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn write_post(dir: &TempDir, filename: &str, content: &str) {
        fs::write(dir.path().join(filename), content).unwrap();
    }

    #[test]
    fn test_title_date_and_slug_extraction() {
        let dir = TempDir::new().unwrap();
        write_post(
            &dir,
            "2024-01-05-hello-world.md",
            "# Hello, World!\n\nFirst paragraph here.\n",
        );

        let posts = PostLoader::new(dir.path()).load_all();
        assert_eq!(posts.len(), 1);
        let post = &posts[0];
        assert_eq!(post.title, "Hello, World!");
        assert_eq!(post.slug, "2024-01-05-hello-world");
        assert_eq!(post.date, Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap());
        assert_eq!(post.excerpt, "First paragraph here.");
    }

    #[test]
    fn test_title_falls_back_to_slug() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "2024-02-10-notes-on-caching.md", "Just body text.\n");

        let posts = PostLoader::new(dir.path()).load_all();
        assert_eq!(posts[0].title, "notes on caching");
    }

    #[test]
    fn test_missing_date_prefix_uses_fallback() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "undated-thoughts.md", "# Thoughts\n\nBody.\n");

        let pinned = Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap();
        let posts = PostLoader::new(dir.path())
            .with_date_fallback(DateFallback::Fixed(pinned))
            .load_all();
        assert_eq!(posts[0].date, pinned);
        assert_eq!(posts[0].title, "Thoughts");
    }

    #[test]
    fn test_listing_sorted_by_filename_descending() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "2023-05-01-old.md", "# Old\n");
        write_post(&dir, "2024-03-15-new.md", "# New\n");
        write_post(&dir, "2023-12-31-mid.md", "# Mid\n");
        fs::write(dir.path().join("notes.txt"), "not a post").unwrap();

        let posts = PostLoader::new(dir.path()).load_all();
        let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Mid", "Old"]);
    }

    #[test]
    fn test_marker_lines_stripped_from_content() {
        let dir = TempDir::new().unwrap();
        write_post(
            &dir,
            "2024-01-01-markers.md",
            "# Heading\n*Published on Jan 1*\nsection-divider\n---\n| section-content\n\nReal opening paragraph.\n\nSecond paragraph.\n",
        );

        let posts = PostLoader::new(dir.path()).load_all();
        let post = &posts[0];
        assert_eq!(
            post.content,
            "Real opening paragraph.\n\nSecond paragraph."
        );
        assert_eq!(post.excerpt, "Real opening paragraph.");
    }

    #[test]
    fn test_excerpt_truncated() {
        let dir = TempDir::new().unwrap();
        let body = "word ".repeat(100);
        write_post(&dir, "2024-01-02-long.md", &format!("# Long\n\n{}\n", body));

        let posts = PostLoader::new(dir.path()).load_all();
        let excerpt = &posts[0].excerpt;
        assert!(excerpt.ends_with("..."));
        assert_eq!(excerpt.chars().count(), EXCERPT_LIMIT + 3);
    }

    #[test]
    fn test_load_by_slug() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "2024-01-05-hello-world.md", "# Hello, World!\n");

        let loader = PostLoader::new(dir.path());
        let post = loader.load_by_slug("2024-01-05-hello-world").unwrap();
        assert_eq!(post.unwrap().title, "Hello, World!");

        // Missing is not-found, not a fault.
        assert!(loader.load_by_slug("does-not-exist").unwrap().is_none());
    }

    #[test]
    fn test_non_ascii_filename_loads_without_date() {
        let dir = TempDir::new().unwrap();
        // Byte 10 of this slug falls inside a multibyte character.
        write_post(&dir, "aaaaaaaaaé-post.md", "# Accented\n\nBody.\n");

        let pinned = Utc.with_ymd_and_hms(2021, 3, 1, 0, 0, 0).unwrap();
        let posts = PostLoader::new(dir.path())
            .with_date_fallback(DateFallback::Fixed(pinned))
            .load_all();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Accented");
        assert_eq!(posts[0].date, pinned);
        assert_eq!(posts[0].slug, "aaaaaaaaaé-post");
    }

    #[test]
    fn test_missing_directory_yields_empty_listing() {
        let posts = PostLoader::new("/nonexistent/posts").load_all();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_format_post_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        assert_eq!(format_post_date(&date), "January 5, 2024");
    }
}
