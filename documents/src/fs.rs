use crate::error::DocumentError;
use crate::error::Result;
use crate::store::DocumentEntry;
use crate::store::DocumentStore;
use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use log::debug;
use std::io::ErrorKind;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Document store over a directory on the local filesystem.
///
/// Paths handed in and out are relative to `root` and use `/` separators.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
    recursive: bool,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            recursive: false,
        }
    }

    /// List nested directories' contents as well, instead of returning them
    /// as directory entries only.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, relative: &str) -> Result<PathBuf> {
        let relative = Path::new(relative);
        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                _ => {
                    return Err(DocumentError::InvalidPath(
                        relative.display().to_string(),
                    ));
                }
            }
        }
        Ok(self.root.join(relative))
    }

    fn relative_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn list_documents(&self, prefix: &str) -> Result<Vec<DocumentEntry>> {
        let dir = self.resolve(prefix)?;
        let list_failed = |reason: String| DocumentError::ListFailed {
            prefix: prefix.to_string(),
            reason,
        };
        if !dir.is_dir() {
            return Err(list_failed(format!("{} is not a directory", dir.display())));
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut entries = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(max_depth)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| list_failed(e.to_string()))?;
            let Some(relative) = self.relative_path(entry.path()) else {
                continue;
            };
            let metadata = entry.metadata().map_err(|e| list_failed(e.to_string()))?;

            let document = if entry.file_type().is_dir() {
                DocumentEntry::dir(relative)
            } else {
                DocumentEntry::file(relative, metadata.len())
            };
            entries.push(match metadata.modified() {
                Ok(modified) => document.with_modified(DateTime::<Utc>::from(modified)),
                Err(_) => document,
            });
        }

        debug!(
            "Listed {} entries under '{}' in {}",
            entries.len(),
            prefix,
            self.root.display()
        );
        Ok(entries)
    }

    async fn read_document(&self, path: &str) -> Result<String> {
        let full_path = self.resolve(path)?;
        tokio::fs::read_to_string(&full_path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => DocumentError::NotFound(path.to_string()),
                _ => DocumentError::ReadFailed {
                    path: path.to_string(),
                    reason: e.to_string(),
                },
            })
    }
}
