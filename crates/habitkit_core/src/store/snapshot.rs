//! JSON snapshots of the habit, completion and note collections.
//!
//! # Invariants
//! - Each collection lives under its own fixed key as a JSON array.
//! - Writes always carry the full collection; there is no partial update.
//! - No schema version is stored; field shape changes break old data.

use super::kv::KeyValueStore;
use super::{StoreError, StoreResult};
use crate::model::entry::{Completion, HabitNote};
use crate::model::habit::Habit;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Fixed storage keys for the three collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKey {
    Habits,
    Completions,
    Notes,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 3] = [Self::Habits, Self::Completions, Self::Notes];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Habits => "habit-tracker-habits",
            Self::Completions => "habit-tracker-completions",
            Self::Notes => "habit-tracker-notes",
        }
    }
}

/// Collections as loaded at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub habits: Vec<Habit>,
    pub completions: Vec<Completion>,
    pub notes: Vec<HabitNote>,
}

/// Snapshot reader/writer over any key-value backend.
pub struct SnapshotStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SnapshotStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn backend(&self) -> &S {
        &self.store
    }

    pub fn into_backend(self) -> S {
        self.store
    }

    /// Loads all three collections.
    ///
    /// # Errors
    /// - `StoreError::Malformed` when a present blob fails to parse.
    /// - `StoreError::Db` on backend failure.
    pub fn load(&self) -> StoreResult<Snapshot> {
        let snapshot = Snapshot {
            habits: self.load_collection(CollectionKey::Habits)?,
            completions: self.load_collection(CollectionKey::Completions)?,
            notes: self.load_collection(CollectionKey::Notes)?,
        };
        info!(
            "event=snapshot_load module=store status=ok habits={} completions={} notes={}",
            snapshot.habits.len(),
            snapshot.completions.len(),
            snapshot.notes.len()
        );
        Ok(snapshot)
    }

    pub fn save_habits(&mut self, habits: &[Habit]) -> StoreResult<()> {
        self.save_collection(CollectionKey::Habits, habits)
    }

    pub fn save_completions(&mut self, completions: &[Completion]) -> StoreResult<()> {
        self.save_collection(CollectionKey::Completions, completions)
    }

    pub fn save_notes(&mut self, notes: &[HabitNote]) -> StoreResult<()> {
        self.save_collection(CollectionKey::Notes, notes)
    }

    fn load_collection<T: DeserializeOwned>(&self, key: CollectionKey) -> StoreResult<Vec<T>> {
        let Some(raw) = self.store.get(key.as_str())? else {
            debug!(
                "event=collection_load module=store status=absent key={}",
                key.as_str()
            );
            return Ok(Vec::new());
        };

        serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
            key: key.as_str(),
            source,
        })
    }

    fn save_collection<T: Serialize>(&mut self, key: CollectionKey, items: &[T]) -> StoreResult<()> {
        let encoded = serde_json::to_string(items).map_err(|source| StoreError::Encode {
            key: key.as_str(),
            source,
        })?;
        self.store.set(key.as_str(), &encoded)?;
        debug!(
            "event=collection_save module=store status=ok key={} items={}",
            key.as_str(),
            items.len()
        );
        Ok(())
    }
}
