//! # Entity Collections
//!
//! One generic, slot-backed repository covering every entity kind in the
//! system. A collection is the full ordered list of records of one kind,
//! held in a single slot; every mutation computes the new list in memory
//! and commits it with exactly one slot write at the end.
//!
//! The per-kind repositories (children, teachers, lessons, photos,
//! messages, events) are instantiations of [`CollectionRepository`] over
//! their record type — see the aliases in the storage module.

use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;

use super::connection::SlotConnection;
use crate::domain::error::DomainError;

/// A record kind that lives in its own persistent collection slot.
pub trait EntityRecord: Clone + Serialize + DeserializeOwned + Send + Sync {
    /// Singular kind label, used in ids and error messages ("child")
    const KIND: &'static str;

    /// Name of the slot holding the collection ("children")
    const SLOT: &'static str;

    /// Unique id of this record within its collection
    fn id(&self) -> &str;

    /// Default records for a collection whose slot is absent or unreadable.
    /// Collections are total: there is no "missing" state, only this seed.
    fn seed() -> Vec<Self>;
}

/// Slot-backed repository for one entity kind.
pub struct CollectionRepository<R: EntityRecord> {
    connection: Arc<SlotConnection>,
    _record: PhantomData<R>,
}

impl<R: EntityRecord> Clone for CollectionRepository<R> {
    fn clone(&self) -> Self {
        Self {
            connection: Arc::clone(&self.connection),
            _record: PhantomData,
        }
    }
}

impl<R: EntityRecord> CollectionRepository<R> {
    /// Create a new repository over the given connection
    pub fn new(connection: Arc<SlotConnection>) -> Self {
        Self {
            connection,
            _record: PhantomData,
        }
    }

    /// Snapshot of the whole collection in stored order
    pub fn list(&self) -> Vec<R> {
        self.connection.load_slot(R::SLOT, R::seed())
    }

    /// Retrieve a specific record by id
    pub fn get(&self, id: &str) -> Option<R> {
        self.list().into_iter().find(|r| r.id() == id)
    }

    /// Append a record at the end of the collection and persist
    pub fn append(&self, record: &R) {
        let mut records = self.list();
        records.push(record.clone());
        self.commit(&records);
        debug!("Appended {} {}", R::KIND, record.id());
    }

    /// Insert a record at the front of the collection and persist.
    /// Used by feeds whose display order is newest-first.
    pub fn prepend(&self, record: &R) {
        let mut records = self.list();
        records.insert(0, record.clone());
        self.commit(&records);
        debug!("Prepended {} {}", R::KIND, record.id());
    }

    /// Replace the stored record carrying the same id
    pub fn replace(&self, record: &R) -> Result<(), DomainError> {
        let mut records = self.list();
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => *existing = record.clone(),
            None => {
                warn!("Attempted to update a missing {}: {}", R::KIND, record.id());
                return Err(DomainError::not_found(R::KIND, record.id()));
            }
        }
        self.commit(&records);
        Ok(())
    }

    /// Apply `mutate` to the record with the given id, persist, and return
    /// the updated record
    pub fn modify<F>(&self, id: &str, mutate: F) -> Result<R, DomainError>
    where
        F: FnOnce(&mut R),
    {
        let mut records = self.list();
        let updated = match records.iter_mut().find(|r| r.id() == id) {
            Some(record) => {
                mutate(record);
                record.clone()
            }
            None => {
                warn!("Attempted to modify a missing {}: {}", R::KIND, id);
                return Err(DomainError::not_found(R::KIND, id));
            }
        };
        self.commit(&records);
        Ok(updated)
    }

    /// Apply `mutate` to every record in one persisted write and return the
    /// number of records touched
    pub fn modify_all<F>(&self, mut mutate: F) -> usize
    where
        F: FnMut(&mut R),
    {
        let mut records = self.list();
        for record in records.iter_mut() {
            mutate(record);
        }
        self.commit(&records);
        records.len()
    }

    /// Remove the record with the given id. Removal of an id that is
    /// already absent is a no-op: the record being gone is the outcome the
    /// caller asked for. Returns whether a record was actually removed.
    pub fn remove(&self, id: &str) -> bool {
        let mut records = self.list();
        let before = records.len();
        records.retain(|r| r.id() != id);

        if records.len() == before {
            debug!("Removal of absent {} {} is a no-op", R::KIND, id);
            return false;
        }

        self.commit(&records);
        info!("Removed {} {}", R::KIND, id);
        true
    }

    fn commit(&self, records: &[R]) {
        self.connection.save_slot(R::SLOT, &records);
    }
}
