// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! JSON fixture describing the unit, its statuses and its destinations.

use field_status_domain::{
    CallCandidate, RoleAssignment, StationCandidate, StatusDefinition, Telemetry,
    validate_identifier,
};
use serde::Deserialize;
use std::path::Path;

/// Errors loading or querying a fixture.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The file is not a valid fixture.
    Parse(serde_json::Error),
    /// A required field is empty.
    Invalid(String),
    /// A referenced identifier is not in the fixture.
    Unknown {
        /// What kind of item was looked up.
        kind: &'static str,
        /// The identifier that was not found.
        id: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Failed to read fixture: {e}"),
            Self::Parse(e) => write!(f, "Invalid fixture: {e}"),
            Self::Invalid(msg) => write!(f, "Invalid fixture: {msg}"),
            Self::Unknown { kind, id } => write!(f, "Unknown {kind} '{id}' in fixture"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// The unit and its surroundings, as seen by one CLI run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Fixture {
    pub unit_id: String,
    #[serde(default)]
    pub active_call_id: Option<String>,
    pub statuses: Vec<StatusDefinition>,
    #[serde(default)]
    pub calls: Vec<CallCandidate>,
    #[serde(default)]
    pub stations: Vec<StationCandidate>,
    #[serde(default)]
    pub roles: Vec<RoleAssignment>,
    #[serde(default)]
    pub telemetry: Option<Telemetry>,
}

impl Fixture {
    /// Reads a fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text: String = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parses a fixture.
    ///
    /// Unknown destination levels or note requirements are rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or the unit ID is empty.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let fixture: Self = serde_json::from_str(text)?;
        validate_identifier("unit_id", &fixture.unit_id)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(fixture)
    }

    /// Looks up a status by ID.
    ///
    /// # Errors
    ///
    /// Returns `Unknown` if there is no such status.
    pub fn status(&self, id: &str) -> Result<&StatusDefinition, ConfigError> {
        self.statuses
            .iter()
            .find(|status| status.id == id)
            .ok_or_else(|| unknown("status", id))
    }

    /// Looks up a call by ID.
    ///
    /// # Errors
    ///
    /// Returns `Unknown` if there is no such call.
    pub fn call(&self, id: &str) -> Result<&CallCandidate, ConfigError> {
        self.calls
            .iter()
            .find(|call| call.id == id)
            .ok_or_else(|| unknown("call", id))
    }

    /// Looks up a station by ID.
    ///
    /// # Errors
    ///
    /// Returns `Unknown` if there is no such station.
    pub fn station(&self, id: &str) -> Result<&StationCandidate, ConfigError> {
        self.stations
            .iter()
            .find(|station| station.id == id)
            .ok_or_else(|| unknown("station", id))
    }
}

fn unknown(kind: &'static str, id: &str) -> ConfigError {
    ConfigError::Unknown {
        kind,
        id: id.to_string(),
    }
}
