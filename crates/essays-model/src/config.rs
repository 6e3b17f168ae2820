use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ORIGIN: &str = "https://paulgraham.com";
pub const DEFAULT_LISTING_PATH: &str = "articles.html";
pub const DEFAULT_CONTENT_FACE: &str = "verdana";
pub const DEFAULT_USER_AGENT: &str = "essays/0.1 (essay archive tool)";
pub const DEFAULT_OUTPUT_DIR: &str = "output/essays";
pub const DEFAULT_MANIFEST: &str = "conf/essays-list.txt";

/// Titles whose markup does not survive the LaTeX toolchain downstream.
pub const DEFAULT_EXCLUDED_TITLES: &[&str] = &["Revenge of the Nerds"];

/// Where the essays come from and how the source site is laid out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteConfig {
    /// Scheme and host, e.g. `https://paulgraham.com`. Relative links are
    /// resolved by prefixing this value.
    pub origin: String,
    /// Path of the listing page relative to `origin`.
    pub listing_path: String,
    /// `face` attribute of the `<font>` element wrapping each essay body.
    pub content_face: String,
    /// Listing entries with exactly these titles are never fetched.
    pub excluded_titles: Vec<String>,
    pub user_agent: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            listing_path: DEFAULT_LISTING_PATH.to_string(),
            content_face: DEFAULT_CONTENT_FACE.to_string(),
            excluded_titles: DEFAULT_EXCLUDED_TITLES
                .iter()
                .map(|t| t.to_string())
                .collect(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl SiteConfig {
    pub fn listing_url(&self) -> String {
        self.absolute_url(&self.listing_path)
    }

    /// Prefix a same-origin path with the configured origin.
    pub fn absolute_url(&self, path: &str) -> String {
        join_origin(&self.origin, path)
    }

    pub fn is_excluded(&self, title: &str) -> bool {
        self.excluded_titles.iter().any(|t| t == title)
    }
}

/// Join `origin` and a site-relative `path` with exactly one slash.
pub fn join_origin(origin: &str, path: &str) -> String {
    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        path.trim().trim_start_matches('/')
    )
}

/// Where converted essays and the manifest are written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
    pub manifest_path: PathBuf,
    /// Process only the first N listing entries.
    pub limit: Option<usize>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            manifest_path: PathBuf::from(DEFAULT_MANIFEST),
            limit: None,
        }
    }
}
