// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Which destinations a status accepts.
///
/// Serialized as the numeric code the dispatch service uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum DestinationLevel {
    /// No destination step (code 0).
    #[default]
    None,
    /// Stations only (code 1).
    StationOnly,
    /// Calls only (code 2).
    CallOnly,
    /// Either a call or a station (code 3).
    CallOrStation,
}

impl DestinationLevel {
    /// Parses a numeric destination level.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDestinationLevel` for codes above 3.
    pub fn from_code(code: u8) -> Result<Self, DomainError> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::StationOnly),
            2 => Ok(Self::CallOnly),
            3 => Ok(Self::CallOrStation),
            other => Err(DomainError::InvalidDestinationLevel(other)),
        }
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::StationOnly => 1,
            Self::CallOnly => 2,
            Self::CallOrStation => 3,
        }
    }

    /// Whether the wizard shows a destination step.
    #[must_use]
    pub const fn has_step(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Whether a call may be chosen as destination.
    #[must_use]
    pub const fn allows_calls(self) -> bool {
        matches!(self, Self::CallOnly | Self::CallOrStation)
    }

    /// Whether a station may be chosen as destination.
    #[must_use]
    pub const fn allows_stations(self) -> bool {
        matches!(self, Self::StationOnly | Self::CallOrStation)
    }
}

impl TryFrom<u8> for DestinationLevel {
    type Error = DomainError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl From<DestinationLevel> for u8 {
    fn from(level: DestinationLevel) -> Self {
        level.code()
    }
}

/// Whether a status asks for a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum NoteRequirement {
    /// No note step (code 0).
    #[default]
    None,
    /// Note step shown, may be left blank (code 1).
    Optional,
    /// Note step shown, must not be blank (code 2).
    Required,
}

impl NoteRequirement {
    /// Parses a numeric note requirement.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidNoteRequirement` for codes above 2.
    pub fn from_code(code: u8) -> Result<Self, DomainError> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::Optional),
            2 => Ok(Self::Required),
            other => Err(DomainError::InvalidNoteRequirement(other)),
        }
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Optional => 1,
            Self::Required => 2,
        }
    }

    /// Whether the wizard shows a note step.
    #[must_use]
    pub const fn has_step(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl TryFrom<u8> for NoteRequirement {
    type Error = DomainError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl From<NoteRequirement> for u8 {
    fn from(requirement: NoteRequirement) -> Self {
        requirement.code()
    }
}

/// A selectable unit status, supplied by the server per department or unit type.
///
/// The destination level and note requirement are fixed for as long as the
/// status stays selected within one wizard run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDefinition {
    /// Opaque status type identifier.
    pub id: String,
    /// Display text, e.g. "Responding".
    pub text: String,
    /// Display color.
    #[serde(default)]
    pub background_color: String,
    /// Destination requirement.
    #[serde(default)]
    pub destination_level: DestinationLevel,
    /// Note requirement.
    #[serde(default)]
    pub note_requirement: NoteRequirement,
}

impl StatusDefinition {
    /// Creates a new status definition.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        destination_level: DestinationLevel,
        note_requirement: NoteRequirement,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            background_color: String::new(),
            destination_level,
            note_requirement,
        }
    }

    /// Sets the display color.
    #[must_use]
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    /// Whether the status needs no destination and no note step.
    #[must_use]
    pub const fn is_immediate(&self) -> bool {
        !self.destination_level.has_step() && !self.note_requirement.has_step()
    }
}
