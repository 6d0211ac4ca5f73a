//! Persistent store adapter for the three habit collections.
//!
//! # Responsibility
//! - Provide a key-value storage contract with SQLite and in-memory backends.
//! - Serialize full-collection snapshots to JSON under fixed keys.
//!
//! # Invariants
//! - The adapter never mutates collections; it only reads and writes snapshots.
//! - An absent key loads as an empty collection.
//! - A present but malformed blob is a load failure, never silently reset.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod kv;
pub mod snapshot;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage adapter error.
#[derive(Debug)]
pub enum StoreError {
    /// Backend transport failure.
    Db(DbError),
    /// Stored blob under `key` is not a valid collection.
    Malformed {
        key: &'static str,
        source: serde_json::Error,
    },
    /// Collection could not be encoded for `key`.
    Encode {
        key: &'static str,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Malformed { key, source } => {
                write!(f, "malformed stored data under `{key}`: {source}")
            }
            Self::Encode { key, source } => {
                write!(f, "failed to encode collection `{key}`: {source}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Malformed { source, .. } | Self::Encode { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
