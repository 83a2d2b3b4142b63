//! Typed, owner-scoped access to the document store
//!
//! A [`Repository`] binds a store to one owner and one entity type, so
//! services work with `Note`/`Subject`/... values instead of raw
//! [`Document`]s and cannot forget the ownership key.

use crate::store::{Document, DocumentStore, Entity, StoreError};
use std::marker::PhantomData;
use tracing::error;

pub struct Repository<'a, T> {
    store: &'a dyn DocumentStore,
    owner: &'a str,
    _entity: PhantomData<T>,
}

impl<'a, T: Entity> Repository<'a, T> {
    pub fn new(store: &'a dyn DocumentStore, owner: &'a str) -> Self {
        Self {
            store,
            owner,
            _entity: PhantomData,
        }
    }

    pub async fn insert(&self, entity: T) -> Result<(), StoreError> {
        self.store.insert(self.owner, entity.into_document()).await
    }

    /// All of the owner's entities, in insertion order
    pub async fn list(&self) -> Result<Vec<T>, StoreError> {
        self.store
            .find(T::COLLECTION, self.owner)
            .await?
            .into_iter()
            .map(decode::<T>)
            .collect()
    }

    pub async fn get(&self, id: &str) -> Result<Option<T>, StoreError> {
        self.store
            .find_one(T::COLLECTION, self.owner, id)
            .await?
            .map(decode::<T>)
            .transpose()
    }

    /// Returns false when the owner has no entity with this id
    pub async fn replace(&self, entity: T) -> Result<bool, StoreError> {
        self.store.replace(self.owner, entity.into_document()).await
    }

    /// Returns false when the owner has no entity with this id
    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        self.store.delete(T::COLLECTION, self.owner, id).await
    }
}

fn decode<T: Entity>(doc: Document) -> Result<T, StoreError> {
    let id = doc.id().to_string();
    T::from_document(doc).ok_or_else(|| {
        error!(collection = %T::COLLECTION, id = %id, "Stored document has unexpected kind");
        StoreError::Corrupt {
            collection: T::COLLECTION.to_string(),
            id,
        }
    })
}
