// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fire-and-forget reconciliation of the unit record.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::ports::Reconciler;

/// Requests a refresh of the unit record in the background.
///
/// Failures are logged and never retried. The handle is returned for tests;
/// callers normally drop it.
pub fn spawn_reconciliation(reconciler: Arc<dyn Reconciler>, unit_id: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        match reconciler.refresh_active_unit(&unit_id).await {
            Ok(()) => debug!(unit_id = %unit_id, "Unit record reconciled"),
            Err(e) => warn!(unit_id = %unit_id, error = %e, "Unit reconciliation failed"),
        }
    })
}
