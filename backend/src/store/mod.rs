//! Document store
//!
//! Every record the service keeps is a [`Document`] addressed by
//! `(collection, owner email, id)`. Handlers never see a store without an
//! owner: all reads and writes are scoped to the caller resolved by the
//! identity extractor, so another account's document is simply absent.

mod document;
mod memory;
mod postgres;

pub use document::{Document, Entity, TeacherRecord};
pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Named group of documents of one kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Teachers,
    AdminSessions,
    Notes,
    Tasks,
    Subjects,
    Reminders,
    Feedback,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Teachers => "teachers",
            Collection::AdminSessions => "admin_sessions",
            Collection::Notes => "notes",
            Collection::Tasks => "tasks",
            Collection::Subjects => "subjects",
            Collection::Reminders => "reminders",
            Collection::Feedback => "feedback",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{collection} document '{id}' already exists")]
    Duplicate { collection: String, id: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored body did not decode to the kind its collection holds
    #[error("Corrupt document in {collection}: {id}")]
    Corrupt { collection: String, id: String },
}

impl StoreError {
    pub(crate) fn duplicate(collection: Collection, id: &str) -> Self {
        StoreError::Duplicate {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}

/// Owner-scoped document persistence
///
/// Implementations must make `insert` atomic with respect to the key: of two
/// concurrent inserts of the same `(collection, owner, id)` exactly one
/// succeeds and the other returns [`StoreError::Duplicate`].
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document owned by `owner`
    async fn insert(&self, owner: &str, doc: Document) -> Result<(), StoreError>;

    /// All documents of a collection owned by `owner`, in insertion order
    async fn find(&self, collection: Collection, owner: &str)
        -> Result<Vec<Document>, StoreError>;

    /// One document by id, if `owner` has it
    async fn find_one(
        &self,
        collection: Collection,
        owner: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError>;

    /// Replace an existing document; returns whether one matched
    async fn replace(&self, owner: &str, doc: Document) -> Result<bool, StoreError>;

    /// Delete a document; returns whether one was removed
    async fn delete(&self, collection: Collection, owner: &str, id: &str)
        -> Result<bool, StoreError>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> Result<(), StoreError>;
}
