// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The device's last known position and motion.
///
/// Every field is optional; a device without a fix reports
/// [`Telemetry::unavailable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Telemetry {
    /// Latitude in decimal degrees.
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees.
    pub longitude: Option<f64>,
    /// Horizontal accuracy in meters.
    pub accuracy: Option<f64>,
    /// Altitude in meters.
    pub altitude: Option<f64>,
    /// Speed in meters per second.
    pub speed: Option<f64>,
    /// Heading in degrees.
    pub heading: Option<f64>,
    /// When the fix was taken.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub timestamp: Option<OffsetDateTime>,
}

impl Telemetry {
    /// Telemetry with every field absent.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            latitude: None,
            longitude: None,
            accuracy: None,
            altitude: None,
            speed: None,
            heading: None,
            timestamp: None,
        }
    }

    /// A position-only fix.
    #[must_use]
    pub const fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            accuracy: None,
            altitude: None,
            speed: None,
            heading: None,
            timestamp: None,
        }
    }

    /// Whether both latitude and longitude are known.
    #[must_use]
    pub const fn has_position(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}
