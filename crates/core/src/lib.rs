// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status-change wizard state machine.
//!
//! The wizard walks a user through `SelectStatus → SelectDestination →
//! AddNote`, skipping the destination and note steps when the selected
//! status does not ask for them. All transitions go through [`apply`],
//! which is pure: it never performs I/O and never touches ambient unit
//! context. Asynchronous work (destination fetches, submission) belongs to
//! the caller, which feeds results back in as commands tagged with the
//! [`SessionId`] they were issued for.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod display;
mod error;
mod preselect;
mod progress;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{apply, can_advance, validate_submission};
pub use command::WizardCommand;
pub use display::{DestinationDisplay, resolve_destination_display};
pub use error::CoreError;
pub use progress::{StepProgress, step_progress, total_steps};
pub use state::{
    DestinationSelection, Preselection, SessionId, TransitionOutcome, TransitionResult,
    WizardState, WizardStep,
};
