// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidDestinationLevel(7);
    assert_eq!(format!("{err}"), "Invalid destination level: 7 (expected 0-3)");

    let err: DomainError = DomainError::InvalidNoteRequirement(4);
    assert_eq!(format!("{err}"), "Invalid note requirement: 4 (expected 0-2)");

    let err: DomainError = DomainError::NoteRequired {
        status_id: String::from("s-1"),
    };
    assert_eq!(format!("{err}"), "Status 's-1' requires a note");

    let err: DomainError = DomainError::EmptyIdentifier { field: "unit_id" };
    assert_eq!(format!("{err}"), "Identifier 'unit_id' must not be empty");

    let err: DomainError = DomainError::DestinationNotAllowed {
        status_id: String::from("s-2"),
        destination: "station",
    };
    assert_eq!(
        format!("{err}"),
        "Status 's-2' does not allow a station destination"
    );
}

#[test]
fn test_domain_error_is_std_error() {
    let err: Box<dyn std::error::Error> = Box::new(DomainError::InvalidDestinationLevel(9));
    assert!(err.to_string().contains('9'));
}
