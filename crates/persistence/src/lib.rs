// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Durable offline queue for field unit status changes.
//!
//! Status changes that could not be delivered are written here and replayed
//! later in queue order. The queue is built on Diesel over `SQLite`.
//!
//! ## Storage
//!
//! - In-memory databases are used for tests. Each call to
//!   [`OfflineQueueStore::new_in_memory`] gets its own shared-cache database.
//! - File databases enable WAL so queued rows survive a crash.
//! - Migrations are embedded and run when a store is opened.
//!
//! ## Ordering
//!
//! Entries are identified by a monotonically increasing queue ID and are
//! always listed in ascending ID order.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

use diesel::SqliteConnection;
use field_status_domain::QueuedStatusChange;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

pub use data_models::QueuedEntry;
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID so
/// concurrently running tests never share a database.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// The offline queue store.
///
/// Owns a single connection; callers that share a store across tasks wrap it
/// in a mutex.
pub struct OfflineQueueStore {
    conn: SqliteConnection,
}

impl std::fmt::Debug for OfflineQueueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OfflineQueueStore").finish_non_exhaustive()
    }
}

impl OfflineQueueStore {
    /// Creates a store backed by a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_queue_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        Ok(Self { conn })
    }

    /// Creates a store backed by a database file, creating it if needed.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;

        info!(path = path_str, "Opened offline queue");

        Ok(Self { conn })
    }

    /// Appends a change to the queue and returns its queue ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be stored.
    pub fn enqueue(&mut self, change: &QueuedStatusChange) -> Result<i64, PersistenceError> {
        mutations::queue::enqueue(&mut self.conn, change)
    }

    /// Lists pending entries, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn list_pending(&mut self) -> Result<Vec<QueuedEntry>, PersistenceError> {
        queries::queue::list_pending(&mut self.conn)
    }

    /// Returns the number of pending entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn pending_count(&mut self) -> Result<usize, PersistenceError> {
        queries::queue::pending_count(&mut self.conn)
    }

    /// Fetches one entry.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` if there is no entry with this ID.
    pub fn get_entry(&mut self, queue_id: i64) -> Result<QueuedEntry, PersistenceError> {
        queries::queue::get_entry(&mut self.conn, queue_id)
    }

    /// Records a failed delivery attempt for an entry.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` if there is no entry with this ID.
    pub fn record_attempt_failure(
        &mut self,
        queue_id: i64,
        message: &str,
    ) -> Result<(), PersistenceError> {
        mutations::queue::record_attempt_failure(&mut self.conn, queue_id, message)
    }

    /// Removes a delivered entry.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` if there is no entry with this ID.
    pub fn mark_delivered(&mut self, queue_id: i64) -> Result<(), PersistenceError> {
        mutations::queue::mark_delivered(&mut self.conn, queue_id)
    }

    /// Removes every entry and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn purge(&mut self) -> Result<usize, PersistenceError> {
        mutations::queue::purge(&mut self.conn)
    }

    /// Returns the database journal mode, lowercased.
    ///
    /// # Errors
    ///
    /// Returns an error if the PRAGMA query fails.
    pub fn journal_mode(&mut self) -> Result<String, PersistenceError> {
        backend::sqlite::journal_mode(&mut self.conn)
    }
}
