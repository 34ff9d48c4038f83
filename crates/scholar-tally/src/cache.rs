//! On-disk snapshot cache for API responses.
//!
//! One JSON file per snapshot: `author.json` for the author profile and
//! `<paper_id>.json` for each publication's citing-works list. Files persist
//! indefinitely and are overwritten whole. Every payload is wrapped in an
//! [`Envelope`] carrying a schema number; an envelope with an unexpected
//! schema is treated as a miss so stale formats are refetched rather than
//! misparsed.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// Current cache payload schema.
pub const SCHEMA_VERSION: u32 = 1;

/// Versioned wrapper around a cached payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Payload schema number, compared against [`SCHEMA_VERSION`] on load.
    pub schema: u32,

    /// When the payload was fetched from the remote index.
    pub fetched_at: DateTime<Utc>,

    /// The cached response.
    pub payload: T,
}

/// Directory of JSON snapshots keyed by stable identifiers.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    dir: PathBuf,
}

impl SnapshotCache {
    /// Open a cache directory, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| CacheError::io(&dir, e))?;
        Ok(Self { dir })
    }

    /// Path of the author profile snapshot.
    #[must_use]
    pub fn author_path(&self) -> PathBuf {
        self.dir.join("author.json")
    }

    /// Path of a publication's citing-works snapshot.
    #[must_use]
    pub fn citations_path(&self, paper_id: &str) -> PathBuf {
        self.dir.join(format!("{paper_id}.json"))
    }

    /// Load a snapshot.
    ///
    /// Returns `Ok(None)` if the file does not exist or carries a stale
    /// schema number. A file that exists but does not parse is an error:
    /// the schema tag protects against format drift, not corruption.
    ///
    /// # Errors
    ///
    /// Returns error on I/O failure or malformed JSON.
    pub fn load<T>(&self, path: &Path) -> Result<Option<T>, CacheError>
    where
        T: DeserializeOwned,
    {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::io(path, e)),
        };

        let envelope: Envelope<T> =
            serde_json::from_slice(&bytes).map_err(|e| CacheError::malformed(path, e))?;

        if envelope.schema != SCHEMA_VERSION {
            tracing::debug!(
                path = %path.display(),
                found = envelope.schema,
                expected = SCHEMA_VERSION,
                "stale cache schema, treating as miss"
            );
            return Ok(None);
        }

        Ok(Some(envelope.payload))
    }

    /// Store a snapshot, overwriting any existing file.
    ///
    /// # Errors
    ///
    /// Returns error on I/O or serialization failure.
    pub fn store<T>(&self, path: &Path, payload: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let envelope =
            Envelope { schema: SCHEMA_VERSION, fetched_at: Utc::now(), payload };
        let bytes = serde_json::to_vec(&envelope)
            .map_err(|e| CacheError::malformed(path, e))?;
        fs::write(path, bytes).map_err(|e| CacheError::io(path, e))
    }
}
