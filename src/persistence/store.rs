use super::kv::KeyValueStore;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A persisted record with a derived uniqueness key
pub trait Record: Serialize + DeserializeOwned {
    type Key: PartialEq;

    fn key(&self) -> Self::Key;
}

/// Ordered collection of records, at most one per key, written back to
/// storage as a whole after every mutation.
///
/// Loading never fails: missing or unreadable data starts an empty collection.
#[derive(Debug)]
pub struct DatedRecordStore<T, S> {
    storage: S,
    storage_key: &'static str,
    records: Vec<T>,
}

impl<T: Record, S: KeyValueStore> DatedRecordStore<T, S> {
    pub fn load(storage: S, storage_key: &'static str) -> Self {
        let records = read_records(&storage, storage_key);
        tracing::debug!(key = storage_key, count = records.len(), "loaded records");
        Self {
            storage,
            storage_key,
            records,
        }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[cfg(test)]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    #[cfg(test)]
    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn find_by_key(&self, key: &T::Key) -> Option<&T> {
        self.records.iter().find(|record| record.key() == *key)
    }

    /// Add a new record. Goes through upsert so a reused key still replaces.
    pub fn add(&mut self, record: T) -> Result<()> {
        self.upsert(record)
    }

    /// Replace the record with the same key in place, or append
    pub fn upsert(&mut self, record: T) -> Result<()> {
        let key = record.key();
        match self.records.iter().position(|existing| existing.key() == key) {
            Some(index) => self.records[index] = record,
            None => self.records.push(record),
        }
        self.save()
    }

    /// Remove the first record matching `predicate`
    pub fn remove<P>(&mut self, predicate: P) -> Result<Option<T>>
    where
        P: FnMut(&T) -> bool,
    {
        let Some(index) = self.records.iter().position(predicate) else {
            return Ok(None);
        };
        let removed = self.records.remove(index);
        self.save()?;
        Ok(Some(removed))
    }

    /// Flip a boolean field on the first record matching `predicate`.
    /// Returns false when nothing matched.
    pub fn toggle_field<P, F>(&mut self, predicate: P, field: F) -> Result<bool>
    where
        P: FnMut(&T) -> bool,
        F: FnOnce(&mut T) -> &mut bool,
    {
        let Some(index) = self.records.iter().position(predicate) else {
            return Ok(false);
        };
        let flag = field(&mut self.records[index]);
        *flag = !*flag;
        self.save()?;
        Ok(true)
    }

    fn save(&mut self) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&self.records)
            .with_context(|| format!("Failed to serialize {}", self.storage_key))?;
        self.storage
            .set(self.storage_key, &bytes)
            .with_context(|| format!("Failed to save {}", self.storage_key))?;
        tracing::debug!(key = self.storage_key, count = self.records.len(), "saved records");
        Ok(())
    }
}

fn read_records<T: Record, S: KeyValueStore>(storage: &S, key: &str) -> Vec<T> {
    let bytes = match storage.get(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "could not read stored records, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(key, error = %e, "stored records are unreadable, starting empty");
            Vec::new()
        }
    }
}
