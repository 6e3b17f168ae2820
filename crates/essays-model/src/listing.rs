use serde::{Deserialize, Serialize};

/// One essay discovered on the listing page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListingEntry {
    pub title: String,
    /// Absolute url of the essay page.
    pub url: String,
}

impl ListingEntry {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}
