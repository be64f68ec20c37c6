// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{NoteRequirement, StatusDefinition};

/// Checks a note against the status's note requirement.
///
/// A required note must contain something other than whitespace.
///
/// # Errors
///
/// Returns `DomainError::NoteRequired` when the requirement is not met.
pub fn validate_note(status: &StatusDefinition, note: &str) -> Result<(), DomainError> {
    if status.note_requirement == NoteRequirement::Required && note.trim().is_empty() {
        return Err(DomainError::NoteRequired {
            status_id: status.id.clone(),
        });
    }
    Ok(())
}

/// Rejects empty identifiers.
///
/// # Errors
///
/// Returns `DomainError::EmptyIdentifier` naming `field`.
pub fn validate_identifier(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyIdentifier { field });
    }
    Ok(())
}
