// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// An active call the unit may respond to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallCandidate {
    /// Call identifier.
    pub id: String,
    /// Dispatch number shown to the user.
    #[serde(default)]
    pub number: String,
    /// Call name.
    #[serde(default)]
    pub name: String,
    /// Call address.
    #[serde(default)]
    pub address: String,
}

impl CallCandidate {
    /// Creates a call candidate.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        number: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            number: number.into(),
            name: name.into(),
            address: address.into(),
        }
    }
}

/// A station (department group) the unit may respond to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationCandidate {
    /// Station (group) identifier.
    pub id: String,
    /// Station name.
    #[serde(default)]
    pub name: String,
    /// Station address.
    #[serde(default)]
    pub address: String,
    /// Group kind, e.g. "Station" or "Organization".
    #[serde(default)]
    pub kind: String,
}

impl StationCandidate {
    /// Creates a station candidate.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            kind: kind.into(),
        }
    }
}

/// The kind of destination currently chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DestinationType {
    /// No destination.
    #[default]
    None,
    /// A call.
    Call,
    /// A station.
    Station,
}

impl std::fmt::Display for DestinationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Call => write!(f, "call"),
            Self::Station => write!(f, "station"),
        }
    }
}
