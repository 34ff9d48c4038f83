//! Error types for the citation tally pipeline.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::path::PathBuf;

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Rate limited by the API (429 response)
    #[error("Rate limited by the API, suggested wait {retry_after_secs}s")]
    RateLimited {
        /// Suggested wait time in seconds, from the Retry-After header
        retry_after_secs: u64,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with a retry-after hint.
    #[must_use]
    pub const fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after_secs: seconds }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }
}

/// Errors from the on-disk snapshot cache.
#[derive(thiserror::Error, Debug)]
pub enum CacheError {
    /// Filesystem error, with the path that triggered it.
    #[error("Cache I/O failed for {path}: {source}")]
    Io {
        /// Path of the cache file or directory
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A cache file exists but its contents do not parse.
    #[error("Malformed cache entry at {path}: {source}")]
    Malformed {
        /// Path of the cache file
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

impl CacheError {
    /// Wrap an I/O error with its path.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Wrap a JSON error with its path.
    #[must_use]
    pub fn malformed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Malformed { path: path.into(), source }
    }
}

/// Errors from the tally pipeline.
#[derive(thiserror::Error, Debug)]
pub enum TallyError {
    /// Author search returned no matches.
    #[error("No author found for query: {query}")]
    AuthorNotFound {
        /// The search query that matched nothing
        query: String,
    },

    /// Error from the API client.
    #[error("API error: {0}")]
    Client(#[from] ClientError),

    /// Error from the snapshot cache.
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

impl TallyError {
    /// Create an author-not-found error.
    #[must_use]
    pub fn author_not_found(query: impl Into<String>) -> Self {
        Self::AuthorNotFound { query: query.into() }
    }
}

/// Errors from chart rendering.
#[derive(thiserror::Error, Debug)]
pub enum ChartError {
    /// Nothing to plot.
    #[error("Tally is empty, nothing to plot")]
    Empty,

    /// Backend drawing failure.
    #[error("Failed to render chart: {0}")]
    Render(String),
}

/// Errors from tally export.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    /// Filesystem error, with the path that triggered it.
    #[error("Export to {path} failed: {source}")]
    Io {
        /// Output path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Serialization failure.
    #[error("Failed to serialize tally: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for pipeline operations.
pub type TallyResult<T> = Result<T, TallyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_display() {
        let err = ClientError::not_found("author 12345");
        assert!(err.to_string().contains("author 12345"));

        let err = ClientError::server(503, "unavailable");
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_tally_error_from_client() {
        let err: TallyError = ClientError::bad_request("invalid query").into();
        assert!(matches!(err, TallyError::Client(ClientError::BadRequest { .. })));
    }

    #[test]
    fn test_author_not_found_message() {
        let err = TallyError::author_not_found("J. Doe");
        assert!(err.to_string().contains("J. Doe"));
    }

    #[test]
    fn test_cache_error_carries_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CacheError::io("cache/author.json", io);
        assert!(err.to_string().contains("cache/author.json"));
    }
}
