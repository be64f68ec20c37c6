// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Offline queue queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use field_status_domain::{PositionFields, QueuedStatusChange, RoleAssignment};
use tracing::debug;

use crate::data_models::QueuedEntry;
use crate::diesel_schema::offline_status_changes;
use crate::error::PersistenceError;

/// Diesel Queryable struct for queue rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = offline_status_changes)]
struct QueueRow {
    queue_id: i64,
    unit_id: String,
    status_type_id: String,
    note: String,
    responding_to_id: String,
    role_assignments_json: String,
    timestamp_local: Option<String>,
    timestamp_utc: Option<String>,
    position_json: Option<String>,
    attempts: i32,
    last_error: Option<String>,
    queued_at: String,
}

impl TryFrom<QueueRow> for QueuedEntry {
    type Error = PersistenceError;

    fn try_from(row: QueueRow) -> Result<Self, Self::Error> {
        let role_assignments: Vec<RoleAssignment> =
            serde_json::from_str(&row.role_assignments_json)?;
        let position: Option<PositionFields> = row
            .position_json
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;

        Ok(Self {
            queue_id: row.queue_id,
            change: QueuedStatusChange {
                unit_id: row.unit_id,
                status_type_id: row.status_type_id,
                note: row.note,
                responding_to_id: row.responding_to_id,
                role_assignments,
                timestamp_local: row.timestamp_local,
                timestamp_utc: row.timestamp_utc,
                position,
            },
            attempts: u32::try_from(row.attempts).unwrap_or(0),
            last_error: row.last_error,
            queued_at: row.queued_at,
        })
    }
}

/// Lists every pending entry in delivery order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be decoded.
pub fn list_pending(conn: &mut SqliteConnection) -> Result<Vec<QueuedEntry>, PersistenceError> {
    let rows: Vec<QueueRow> = offline_status_changes::table
        .select(QueueRow::as_select())
        .order(offline_status_changes::queue_id.asc())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded pending offline status changes");

    rows.into_iter().map(QueuedEntry::try_from).collect()
}

/// Counts pending entries.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn pending_count(conn: &mut SqliteConnection) -> Result<usize, PersistenceError> {
    let count: i64 = offline_status_changes::table.count().get_result(conn)?;
    Ok(usize::try_from(count).unwrap_or(0))
}

/// Fetches a single entry by its queue ID.
///
/// # Errors
///
/// Returns `EntryNotFound` if no such entry exists.
pub fn get_entry(
    conn: &mut SqliteConnection,
    queue_id: i64,
) -> Result<QueuedEntry, PersistenceError> {
    let row: Option<QueueRow> = offline_status_changes::table
        .filter(offline_status_changes::queue_id.eq(queue_id))
        .select(QueueRow::as_select())
        .first(conn)
        .optional()?;

    row.ok_or(PersistenceError::EntryNotFound(queue_id))
        .and_then(QueuedEntry::try_from)
}
