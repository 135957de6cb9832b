use serde::{Deserialize, Serialize};

use super::RepoId;

/// Number of registry entries shown per releases page.
pub const RELEASES_PAGE_SIZE: usize = 15;

/// The parts of a provider release that the releases listing shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseSummary {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl ReleaseSummary {
    /// `YYYY-MM-DD` part of the publication timestamp.
    pub fn published_date(&self) -> Option<&str> {
        self.published_at
            .as_deref()
            .map(|ts| ts.get(..10).unwrap_or(ts))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseEntry {
    pub repo: RepoId,
    pub release: Option<ReleaseSummary>,
}

/// One page of the latest-release listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleasePage {
    pub page: usize,
    /// Total tracked repositories across all pages.
    pub total: usize,
    pub entries: Vec<ReleaseEntry>,
    pub has_next: bool,
}

impl ReleasePage {
    /// 1-based index of the first entry on this page.
    pub fn first_index(&self) -> usize {
        self.page * RELEASES_PAGE_SIZE + 1
    }

    pub fn last_index(&self) -> usize {
        self.page * RELEASES_PAGE_SIZE + self.entries.len()
    }
}
