use snafu::Snafu;

use crate::message::ValidationIssues;

pub type ContactResult<T> = Result<T, ContactError>;

/// Caller-facing submission errors. None are fatal: the user fixes the form
/// or retries once the outstanding attempt settles.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ContactError {
    #[snafu(display("contact message failed validation: {issues}"))]
    InvalidMessage {
        stage: &'static str,
        issues: ValidationIssues,
    },
    #[snafu(display("a contact submission is already in flight"))]
    SubmissionInFlight { stage: &'static str },
}

impl ContactError {
    /// Field-level issues when this is a validation failure.
    pub fn validation_issues(&self) -> Option<&ValidationIssues> {
        match self {
            Self::InvalidMessage { issues, .. } => Some(issues),
            Self::SubmissionInFlight { .. } => None,
        }
    }
}
