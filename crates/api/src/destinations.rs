// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Concurrent destination fetch.

use field_status_domain::{CallCandidate, StationCandidate};
use futures::future::join;
use tracing::{debug, warn};

use crate::error::CollaboratorError;
use crate::ports::DestinationProvider;

/// The joined result of both destination reads.
///
/// A failed read leaves its list empty; the error is kept for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationLoadReport {
    pub calls: Vec<CallCandidate>,
    pub stations: Vec<StationCandidate>,
    pub call_error: Option<CollaboratorError>,
    pub station_error: Option<CollaboratorError>,
}

impl DestinationLoadReport {
    /// Whether both reads succeeded.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.call_error.is_none() && self.station_error.is_none()
    }
}

/// Fetches calls and stations concurrently and waits for both.
///
/// Never fails: errors are logged and recorded in the report.
pub async fn fetch_destinations(
    provider: &dyn DestinationProvider,
    unit_id: &str,
) -> DestinationLoadReport {
    let (calls, stations) = join(
        provider.fetch_calls(unit_id),
        provider.fetch_stations(unit_id),
    )
    .await;

    let mut report: DestinationLoadReport = DestinationLoadReport::default();

    match calls {
        Ok(calls) => report.calls = calls,
        Err(e) => {
            warn!(unit_id, error = %e, "Failed to load calls");
            report.call_error = Some(e);
        }
    }

    match stations {
        Ok(stations) => report.stations = stations,
        Err(e) => {
            warn!(unit_id, error = %e, "Failed to load stations");
            report.station_error = Some(e);
        }
    }

    debug!(
        unit_id,
        calls = report.calls.len(),
        stations = report.stations.len(),
        "Destinations loaded"
    );

    report
}
