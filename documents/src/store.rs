use crate::error::Result;
use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// One entry returned by [`DocumentStore::list_documents`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEntry {
    /// Store-relative path. Directories end in `/`.
    pub path: String,
    /// Final path component, without the trailing `/` for directories.
    pub name: String,
    pub is_dir: bool,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

impl DocumentEntry {
    pub fn file(path: impl Into<String>, size: u64) -> Self {
        let path = path.into();
        Self {
            name: file_name(&path).to_string(),
            path,
            is_dir: false,
            size,
            modified: None,
        }
    }

    pub fn dir(path: impl Into<String>) -> Self {
        let mut path = path.into();
        if !path.ends_with('/') {
            path.push('/');
        }
        Self {
            name: file_name(&path).to_string(),
            path,
            is_dir: true,
            size: 0,
            modified: None,
        }
    }

    pub fn with_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }
}

/// Last component of a `/`-separated path, ignoring a trailing separator.
pub fn file_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// The document collaborator: lists and reads the searchable corpus.
///
/// Listing is not recursive unless an implementation says otherwise;
/// sub-collections come back as directory entries.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list_documents(&self, prefix: &str) -> Result<Vec<DocumentEntry>>;

    async fn read_document(&self, path: &str) -> Result<String>;
}
