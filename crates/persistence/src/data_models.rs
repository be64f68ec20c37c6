// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use field_status_domain::QueuedStatusChange;
use serde::{Deserialize, Serialize};

/// A pending status change as stored in the offline queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedEntry {
    /// Queue position; entries are delivered in ascending order.
    pub queue_id: i64,
    /// The change to deliver.
    pub change: QueuedStatusChange,
    /// Failed delivery attempts so far.
    pub attempts: u32,
    /// Message from the most recent failed attempt.
    pub last_error: Option<String>,
    /// When the entry was queued (`SQLite` `CURRENT_TIMESTAMP`, UTC).
    pub queued_at: String,
}
