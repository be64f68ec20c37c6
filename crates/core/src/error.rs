// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::WizardStep;
use field_status_domain::DomainError;

/// Errors that can occur during wizard transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The command needs an open wizard.
    WizardClosed,
    /// `Open` was issued while a session is already open.
    WizardAlreadyOpen,
    /// The step needs a selected status.
    NoStatusSelected,
    /// The command is not valid on the current step.
    WrongStep {
        /// The command that was rejected.
        command: &'static str,
        /// The step the wizard was on.
        step: WizardStep,
    },
    /// The status step has no previous step.
    NoPreviousStep,
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::WizardClosed => write!(f, "The status wizard is not open"),
            Self::WizardAlreadyOpen => write!(f, "The status wizard is already open"),
            Self::NoStatusSelected => write!(f, "No status has been selected"),
            Self::WrongStep { command, step } => {
                write!(f, "Command '{command}' is not valid on step {step}")
            }
            Self::NoPreviousStep => write!(f, "The status step has no previous step"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
