//! Paper data model matching Semantic Scholar API schema.

use serde::{Deserialize, Serialize};

/// A publication from Semantic Scholar.
///
/// `paper_id` doubles as the citations cache key, so it is the only
/// required field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    /// Unique Semantic Scholar paper ID.
    pub paper_id: String,

    /// Paper title.
    #[serde(default)]
    pub title: Option<String>,

    /// Publication year.
    #[serde(default)]
    pub year: Option<i32>,

    /// Number of citations this paper has received.
    #[serde(default)]
    pub citation_count: Option<i32>,
}

impl Paper {
    /// Get the paper title, falling back to "Untitled" if not available.
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }

    /// Check if this paper has at least one citation.
    #[must_use]
    pub const fn has_citations(&self) -> bool {
        matches!(self.citation_count, Some(c) if c > 0)
    }

    /// Get citation count or 0 if not available.
    #[must_use]
    pub fn citations(&self) -> i32 {
        self.citation_count.unwrap_or(0)
    }

    #[cfg(test)]
    pub(crate) fn stub(id: &str, title: &str, citation_count: Option<i32>) -> Self {
        Self {
            paper_id: id.to_string(),
            title: Some(title.to_string()),
            year: None,
            citation_count,
        }
    }
}

/// One page of an author's publication list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorPapersResult {
    /// Current offset in the result set.
    #[serde(default)]
    pub offset: i32,

    /// Next offset if more results are available.
    #[serde(default)]
    pub next: Option<i32>,

    /// Publications in this page.
    #[serde(default)]
    pub data: Vec<Paper>,
}

impl AuthorPapersResult {
    /// Check if there are more results available.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.next.is_some()
    }
}

/// Citation entry wrapping the citing paper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationContext {
    /// The citing paper.
    #[serde(alias = "citingPaper")]
    pub paper: Option<Paper>,
}

/// One page of a paper's citation list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CitationResult {
    /// Offset for pagination.
    #[serde(default)]
    pub offset: i32,

    /// Next offset if more results available.
    #[serde(default)]
    pub next: Option<i32>,

    /// Citation data.
    #[serde(default)]
    pub data: Vec<CitationContext>,
}

impl CitationResult {
    /// Check if there are more results available.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.next.is_some()
    }
}
