//! Author data model matching Semantic Scholar API schema.

use serde::{Deserialize, Serialize};

use super::Paper;

/// Author search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorSearchResult {
    /// Total matching authors.
    #[serde(default)]
    pub total: i64,

    /// Offset for pagination.
    #[serde(default)]
    pub offset: i32,

    /// Next offset if more results.
    #[serde(default)]
    pub next: Option<i32>,

    /// List of authors.
    #[serde(default)]
    pub data: Vec<Author>,
}

/// A research author from Semantic Scholar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Unique Semantic Scholar author ID.
    pub author_id: String,

    /// Author name.
    #[serde(default)]
    pub name: Option<String>,

    /// Total number of papers by this author.
    #[serde(default)]
    pub paper_count: Option<i32>,

    /// Total citation count across all papers.
    #[serde(default)]
    pub citation_count: Option<i32>,

    /// h-index metric.
    #[serde(default)]
    pub h_index: Option<i32>,
}

impl Author {
    /// Get the author name, falling back to "Unknown" if not available.
    #[must_use]
    pub fn name_or_default(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }

    /// Get paper count or 0 if not available.
    #[must_use]
    pub fn papers(&self) -> i32 {
        self.paper_count.unwrap_or(0)
    }
}

/// An author together with their full publication list.
///
/// This is the unit persisted in the snapshot cache: one fetch resolves the
/// author and every publication, so later runs never touch the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorProfile {
    /// The resolved author record.
    pub author: Author,

    /// Ordered publication list.
    pub publications: Vec<Paper>,
}

impl AuthorProfile {
    /// Publications with at least one citation, in original order.
    pub fn cited_publications(&self) -> impl Iterator<Item = &Paper> {
        self.publications.iter().filter(|p| p.has_citations())
    }
}
