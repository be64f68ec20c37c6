// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use field_status_domain::{PositionFields, QueuedStatusChange, RoleAssignment};

use crate::OfflineQueueStore;

pub fn create_test_store() -> OfflineQueueStore {
    OfflineQueueStore::new_in_memory().expect("in-memory queue")
}

pub fn create_test_change(status_type_id: &str) -> QueuedStatusChange {
    QueuedStatusChange {
        unit_id: String::from("unit-7"),
        status_type_id: String::from(status_type_id),
        note: String::from("en route"),
        responding_to_id: String::from("call-42"),
        role_assignments: vec![
            RoleAssignment::new("driver", "user-1"),
            RoleAssignment::new("medic", "user-2"),
        ],
        timestamp_local: Some(String::from("2026-03-01T10:30:00-05:00")),
        timestamp_utc: Some(String::from("2026-03-01T15:30:00Z")),
        position: Some(PositionFields {
            latitude: String::from("39.5"),
            longitude: String::from("-104.25"),
            accuracy: String::from("5"),
            altitude: String::new(),
            speed: String::new(),
            heading: String::new(),
        }),
    }
}
