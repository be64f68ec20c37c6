// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_status, open_with, step};
use crate::{StepProgress, WizardCommand, WizardState, step_progress, total_steps};

#[test]
fn test_total_steps_for_every_status_shape() {
    for destination in 0..=3u8 {
        for note in 0..=2u8 {
            let status = create_test_status(destination, note);
            for entered_via_status in [false, true] {
                let expected: u8 = (u8::from(entered_via_status)
                    + u8::from(destination > 0)
                    + u8::from(note > 0))
                .max(1);
                assert_eq!(
                    total_steps(entered_via_status, &status),
                    expected,
                    "destination={destination} note={note} via_status={entered_via_status}"
                );
            }
        }
    }
}

#[test]
fn test_progress_through_full_wizard() {
    let state: WizardState = open_with(None, None);
    assert_eq!(
        step_progress(&state),
        StepProgress {
            current: 1,
            total: 1
        }
    );

    let state: WizardState = step(&state, WizardCommand::SelectStatus(create_test_status(3, 1)));
    assert_eq!(
        step_progress(&state),
        StepProgress {
            current: 1,
            total: 3
        }
    );

    let state: WizardState = step(&state, WizardCommand::Advance);
    assert_eq!(
        step_progress(&state),
        StepProgress {
            current: 2,
            total: 3
        }
    );

    let state: WizardState = step(&state, WizardCommand::Advance);
    assert_eq!(
        step_progress(&state),
        StepProgress {
            current: 3,
            total: 3
        }
    );
}

#[test]
fn test_progress_with_preselected_status() {
    let state: WizardState = open_with(Some(create_test_status(3, 1)), None);
    assert_eq!(
        step_progress(&state),
        StepProgress {
            current: 1,
            total: 2
        }
    );

    let state: WizardState = step(&state, WizardCommand::Advance);
    assert_eq!(
        step_progress(&state),
        StepProgress {
            current: 2,
            total: 2
        }
    );
}

#[test]
fn test_progress_note_only_status() {
    let state: WizardState = open_with(Some(create_test_status(0, 2)), None);
    assert_eq!(
        step_progress(&state),
        StepProgress {
            current: 1,
            total: 1
        }
    );
}

#[test]
fn test_progress_skips_destination_when_absent() {
    let state: WizardState = open_with(None, None);
    let state: WizardState = step(&state, WizardCommand::SelectStatus(create_test_status(0, 1)));
    let state: WizardState = step(&state, WizardCommand::Advance);
    assert_eq!(
        step_progress(&state),
        StepProgress {
            current: 2,
            total: 2
        }
    );
}
