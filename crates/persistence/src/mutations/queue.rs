// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Offline queue mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use field_status_domain::QueuedStatusChange;
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::offline_status_changes;
use crate::error::PersistenceError;

/// Appends a change to the end of the queue.
///
/// Returns the assigned queue ID.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn enqueue(
    conn: &mut SqliteConnection,
    change: &QueuedStatusChange,
) -> Result<i64, PersistenceError> {
    let role_assignments_json: String = serde_json::to_string(&change.role_assignments)?;
    let position_json: Option<String> = change
        .position
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(offline_status_changes::table)
            .values((
                offline_status_changes::unit_id.eq(&change.unit_id),
                offline_status_changes::status_type_id.eq(&change.status_type_id),
                offline_status_changes::note.eq(&change.note),
                offline_status_changes::responding_to_id.eq(&change.responding_to_id),
                offline_status_changes::role_assignments_json.eq(&role_assignments_json),
                offline_status_changes::timestamp_local.eq(change.timestamp_local.as_deref()),
                offline_status_changes::timestamp_utc.eq(change.timestamp_utc.as_deref()),
                offline_status_changes::position_json.eq(position_json.as_deref()),
            ))
            .execute(conn)?;

        let queue_id: i64 = get_last_insert_rowid(conn)?;

        info!(
            queue_id,
            unit_id = %change.unit_id,
            status_id = %change.status_type_id,
            "Queued status change for later delivery"
        );

        Ok(queue_id)
    })
}

/// Records a failed delivery attempt.
///
/// # Errors
///
/// Returns `EntryNotFound` if the entry does not exist.
pub fn record_attempt_failure(
    conn: &mut SqliteConnection,
    queue_id: i64,
    message: &str,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        offline_status_changes::table.filter(offline_status_changes::queue_id.eq(queue_id)),
    )
    .set((
        offline_status_changes::attempts.eq(offline_status_changes::attempts + 1),
        offline_status_changes::last_error.eq(Some(message)),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::EntryNotFound(queue_id));
    }

    debug!(queue_id, error = message, "Recorded failed delivery attempt");
    Ok(())
}

/// Removes an entry once it has been delivered.
///
/// # Errors
///
/// Returns `EntryNotFound` if the entry does not exist.
pub fn mark_delivered(conn: &mut SqliteConnection, queue_id: i64) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(
        offline_status_changes::table.filter(offline_status_changes::queue_id.eq(queue_id)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::EntryNotFound(queue_id));
    }

    info!(queue_id, "Removed delivered status change from queue");
    Ok(())
}

/// Removes every entry. Returns the number removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn purge(conn: &mut SqliteConnection) -> Result<usize, PersistenceError> {
    let deleted: usize = diesel::delete(offline_status_changes::table).execute(conn)?;
    info!(deleted, "Purged offline queue");
    Ok(deleted)
}
