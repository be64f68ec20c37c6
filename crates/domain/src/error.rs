// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The destination level code is outside `0..=3`.
    InvalidDestinationLevel(u8),
    /// The note requirement code is outside `0..=2`.
    InvalidNoteRequirement(u8),
    /// A required note was empty or whitespace only.
    NoteRequired {
        /// The status that requires the note.
        status_id: String,
    },
    /// An identifier was empty.
    EmptyIdentifier {
        /// Which identifier was empty.
        field: &'static str,
    },
    /// The requested destination kind is not allowed by the status.
    DestinationNotAllowed {
        /// The status being applied.
        status_id: String,
        /// The destination kind that was rejected.
        destination: &'static str,
    },
    /// A timestamp could not be formatted.
    TimestampFormat(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDestinationLevel(code) => {
                write!(f, "Invalid destination level: {code} (expected 0-3)")
            }
            Self::InvalidNoteRequirement(code) => {
                write!(f, "Invalid note requirement: {code} (expected 0-2)")
            }
            Self::NoteRequired { status_id } => {
                write!(f, "Status '{status_id}' requires a note")
            }
            Self::EmptyIdentifier { field } => write!(f, "Identifier '{field}' must not be empty"),
            Self::DestinationNotAllowed {
                status_id,
                destination,
            } => {
                write!(
                    f,
                    "Status '{status_id}' does not allow a {destination} destination"
                )
            }
            Self::TimestampFormat(msg) => write!(f, "Failed to format timestamp: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
