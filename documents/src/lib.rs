//! Document collaborator for the search engine.
//!
//! [`DocumentStore`] is the boundary the engine reads through: it lists a
//! collection and reads individual documents, and either call may fail.
//! [`FsDocumentStore`] and [`MemoryDocumentStore`] implement it.
//! [`ContentIndex`] sits in front of any store as a TTL-bounded read-through
//! cache of analyzed [`DocumentRecord`]s.

mod error;
mod fs;
mod index;
mod memory;
mod record;
mod store;

pub use error::DocumentError;
pub use error::Result;
pub use fs::FsDocumentStore;
pub use index::ContentIndex;
pub use index::DEFAULT_INDEX_CAPACITY;
pub use memory::MemoryDocumentStore;
pub use record::DocumentRecord;
pub use store::DocumentEntry;
pub use store::DocumentStore;
pub use store::file_name;
