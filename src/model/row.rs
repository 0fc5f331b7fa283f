use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::Serialize;

/// One normalized directory entry.
///
/// Rows are created once during enrichment and never mutated; filtering and
/// sorting only ever produce new derived orderings over them.
#[derive(Debug, Clone, Serialize)]
pub struct Row {
    /// Sequential id assigned in enrichment order.
    pub id: u64,
    pub title: String,
    /// At most the configured word limit, `...`-terminated when truncated.
    pub description: String,
    /// Lowercased, trimmed tags in source order.
    pub tags: IndexSet<String>,
    pub image_path: String,
    pub link_url: String,
    pub timestamp: DateTime<Utc>,
    /// Younger than the enrichment pass's cutoff (30 days by default).
    pub is_new: bool,
    pub is_featured: bool,
    /// Own category slug, then the immediate parent slug if any. Ancestors
    /// beyond the parent are deliberately not included.
    pub memberships: Vec<String>,
}

impl Row {
    /// The row's tags joined by single spaces, as searched by text queries.
    pub fn tags_joined(&self) -> String {
        self.tags.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
    }
}
