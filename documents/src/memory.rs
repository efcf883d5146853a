use crate::error::DocumentError;
use crate::error::Result;
use crate::store::DocumentEntry;
use crate::store::DocumentStore;
use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct MemoryDocument {
    content: String,
    modified: Option<DateTime<Utc>>,
}

/// Flat in-memory corpus.
///
/// Every document under the requested prefix is listed as a file, whatever
/// its depth, so hosts that keep their corpus in memory need no directory
/// walking.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<BTreeMap<String, MemoryDocument>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_documents<I, P, C>(documents: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<String>,
        C: Into<String>,
    {
        let documents = documents
            .into_iter()
            .map(|(path, content)| {
                (
                    path.into(),
                    MemoryDocument {
                        content: content.into(),
                        modified: None,
                    },
                )
            })
            .collect();
        Self {
            documents: RwLock::new(documents),
        }
    }

    /// Add or replace a document, stamping it with `modified`.
    pub async fn insert(
        &self,
        path: impl Into<String>,
        content: impl Into<String>,
        modified: Option<DateTime<Utc>>,
    ) {
        self.documents.write().await.insert(
            path.into(),
            MemoryDocument {
                content: content.into(),
                modified,
            },
        );
    }

    pub async fn remove(&self, path: &str) -> bool {
        self.documents.write().await.remove(path).is_some()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list_documents(&self, prefix: &str) -> Result<Vec<DocumentEntry>> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|(path, _)| path.starts_with(prefix))
            .map(|(path, document)| {
                let entry = DocumentEntry::file(path.clone(), document.content.len() as u64);
                match document.modified {
                    Some(modified) => entry.with_modified(modified),
                    None => entry,
                }
            })
            .collect())
    }

    async fn read_document(&self, path: &str) -> Result<String> {
        self.documents
            .read()
            .await
            .get(path)
            .map(|document| document.content.clone())
            .ok_or_else(|| DocumentError::NotFound(path.to_string()))
    }
}
