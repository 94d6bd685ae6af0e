// Display formatting for repository records.
// Derives the presentation fields the cards render: language swatch color,
// a human date, and a bounded description. Pure and total.

use serde::Serialize;

use crate::github::Repository;

/// Maximum characters of description shown on a card.
pub const DESCRIPTION_LIMIT: usize = 100;

/// Placeholder when a repository has no description.
pub const NO_DESCRIPTION: &str = "No description available";

const NEUTRAL_COLOR: &str = "#6b7280";

/// A repository plus its derived display fields. Always a separate copy;
/// the source record is never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayRepository {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub homepage: Option<String>,
    pub language: Option<String>,
    pub language_color: &'static str,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub topics: Vec<String>,
    /// `updated_at` rendered as e.g. "Jan 5, 2024". Presentation only.
    pub formatted_date: String,
    pub short_description: String,
}

impl From<&Repository> for DisplayRepository {
    fn from(repo: &Repository) -> Self {
        Self {
            name: repo.name.clone(),
            full_name: repo.full_name.clone(),
            html_url: repo.html_url.clone(),
            homepage: repo.homepage.clone(),
            language: repo.language.clone(),
            language_color: language_color(repo.language.as_deref()),
            stargazers_count: repo.stargazers_count,
            forks_count: repo.forks_count,
            topics: repo.topics.clone(),
            formatted_date: repo.updated_at.format("%b %-d, %Y").to_string(),
            short_description: short_description(repo.description.as_deref()),
        }
    }
}

fn short_description(description: Option<&str>) -> String {
    match description {
        None => NO_DESCRIPTION.to_string(),
        Some(text) if text.chars().count() > DESCRIPTION_LIMIT => {
            let truncated: String = text.chars().take(DESCRIPTION_LIMIT).collect();
            format!("{}...", truncated)
        }
        Some(text) => text.to_string(),
    }
}

/// Hex swatch color for a language name. Cosmetic data only; unknown or
/// absent languages map to a neutral gray.
pub fn language_color(language: Option<&str>) -> &'static str {
    let Some(language) = language else {
        return NEUTRAL_COLOR;
    };

    match language {
        "JavaScript" => "#f1e05a",
        "TypeScript" => "#2b7489",
        "Python" => "#3572A5",
        "Java" => "#b07219",
        "C++" => "#f34b7d",
        "C" => "#555555",
        "C#" => "#178600",
        "Go" => "#00ADD8",
        "Rust" => "#dea584",
        "Swift" => "#ffac45",
        "Kotlin" => "#F18E33",
        "Ruby" => "#701516",
        "PHP" => "#4F5D95",
        "HTML" => "#e34c26",
        "CSS" => "#563d7c",
        "SCSS" => "#c6538c",
        "Vue" => "#4FC08D",
        "Svelte" => "#ff3e00",
        "Astro" => "#ff5a03",
        "Shell" => "#89e051",
        "Dockerfile" => "#384d54",
        "Makefile" => "#427819",
        "Jupyter Notebook" => "#DA5B0B",
        "Markdown" => "#083fa1",
        "YAML" => "#cb171e",
        "JSON" => "#292929",
        "XML" => "#0060ac",
        "SQL" => "#e38c00",
        "GraphQL" => "#e10098",
        "R" => "#198CE7",
        "MATLAB" => "#e16737",
        "Scala" => "#c22d40",
        "Perl" => "#0298c3",
        "Lua" => "#000080",
        "Dart" => "#00B4AB",
        "Elixir" => "#6e4a7e",
        "Clojure" => "#db5855",
        "Haskell" => "#5e5086",
        "Objective-C" => "#438eff",
        "Assembly" => "#6E4C13",
        "WebAssembly" => "#04133b",
        "Solidity" => "#AA6746",
        "Vim script" => "#199f4b",
        "TeX" => "#3D6117",
        "Processing" => "#0096D8",
        "Arduino" => "#bd79d1",
        "Fortran" => "#4d41b1",
        "COBOL" => "#0D597F",
        "Pascal" => "#E3F171",
        "Groovy" => "#e69f56",
        "Erlang" => "#B83998",
        "Zig" => "#ec915c",
        "Julia" => "#a270ba",
        "Nim" => "#ffc200",
        "Crystal" => "#000100",
        "OCaml" => "#3be133",
        "F#" => "#b845fc",
        "ReScript" => "#e6484f",
        "Reason" => "#ff5847",
        "Elm" => "#60B5CC",
        "PureScript" => "#1D222D",
        "CoffeeScript" => "#244776",
        _ => NEUTRAL_COLOR,
    }
}
