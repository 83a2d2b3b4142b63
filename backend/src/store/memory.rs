//! In-process document store for tests and local demos

use super::{Collection, Document, DocumentStore, StoreError};
use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::RwLock;

type Key = (Collection, String, String);

/// Document store held in a `HashMap` behind a tokio `RwLock`
///
/// Every trait call bumps a counter so tests can assert that a rejected
/// request never touched storage.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<Key, (u64, Document)>>,
    seq: AtomicU64,
    calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations performed so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn key(collection: Collection, owner: &str, id: &str) -> Key {
        (collection, owner.to_string(), id.to_string())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, owner: &str, doc: Document) -> Result<(), StoreError> {
        self.record_call();
        let collection = doc.collection();
        let key = Self::key(collection, owner, doc.id());

        let mut documents = self.documents.write().await;
        match documents.entry(key) {
            Entry::Occupied(entry) => Err(StoreError::duplicate(collection, &entry.key().2)),
            Entry::Vacant(entry) => {
                let seq = self.seq.fetch_add(1, Ordering::SeqCst);
                entry.insert((seq, doc));
                Ok(())
            }
        }
    }

    async fn find(
        &self,
        collection: Collection,
        owner: &str,
    ) -> Result<Vec<Document>, StoreError> {
        self.record_call();
        let documents = self.documents.read().await;

        let mut found: Vec<&(u64, Document)> = documents
            .iter()
            .filter(|((c, o, _), _)| *c == collection && o == owner)
            .map(|(_, entry)| entry)
            .collect();
        found.sort_by_key(|(seq, _)| *seq);

        Ok(found.into_iter().map(|(_, doc)| doc.clone()).collect())
    }

    async fn find_one(
        &self,
        collection: Collection,
        owner: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        self.record_call();
        let documents = self.documents.read().await;
        Ok(documents
            .get(&Self::key(collection, owner, id))
            .map(|(_, doc)| doc.clone()))
    }

    async fn replace(&self, owner: &str, doc: Document) -> Result<bool, StoreError> {
        self.record_call();
        let key = Self::key(doc.collection(), owner, doc.id());

        let mut documents = self.documents.write().await;
        match documents.get_mut(&key) {
            Some((_, existing)) => {
                *existing = doc;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(
        &self,
        collection: Collection,
        owner: &str,
        id: &str,
    ) -> Result<bool, StoreError> {
        self.record_call();
        let mut documents = self.documents.write().await;
        Ok(documents.remove(&Self::key(collection, owner, id)).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
