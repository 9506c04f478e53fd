use tokio::sync::watch;

use crate::error::ContactResult;
use crate::flow::{AttemptId, ContactSubmissionFlow};
use crate::message::{ContactMessage, ValidationIssues};
use crate::state::SubmissionState;

/// In-progress form input for one contact-form session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormDraft {
    pub fn to_message(&self) -> ContactMessage {
        ContactMessage::new(self.name.clone(), self.email.clone(), self.message.clone())
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }
}

/// One form session: the draft fields plus the submission flow feeding them.
///
/// Encodes the historical form behavior: the edge into `Succeeded` clears the
/// fields, while `Failed` preserves them so the user can retry without
/// retyping.
pub struct ContactFormSession {
    flow: ContactSubmissionFlow,
    state_rx: watch::Receiver<SubmissionState>,
    draft: FormDraft,
    last_seen: SubmissionState,
}

impl ContactFormSession {
    pub fn new(flow: ContactSubmissionFlow) -> Self {
        let state_rx = flow.subscribe();
        Self {
            flow,
            state_rx,
            draft: FormDraft::default(),
            last_seen: SubmissionState::Idle,
        }
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.draft.email = email.into();
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.draft.message = message.into();
    }

    /// Per-keystroke validation of the current draft.
    pub fn validate_draft(&self) -> Result<(), ValidationIssues> {
        self.draft.to_message().validate()
    }

    pub fn state(&self) -> SubmissionState {
        self.flow.state()
    }

    pub fn flow(&self) -> &ContactSubmissionFlow {
        &self.flow
    }

    /// Submits the current draft.
    pub fn submit(&mut self) -> ContactResult<AttemptId> {
        self.flow.submit(self.draft.to_message())
    }

    /// Folds the latest observed state into the draft and returns it.
    pub fn refresh(&mut self) -> SubmissionState {
        let state = *self.state_rx.borrow_and_update();
        if state == SubmissionState::Succeeded && self.last_seen != SubmissionState::Succeeded {
            self.draft.clear();
        }
        self.last_seen = state;
        state
    }

    /// Awaits the next state change and folds it in.
    ///
    /// Returns `None` once the flow side has shut down, so a view that
    /// outlives its session stops cleanly instead of observing stale writes.
    pub async fn changed(&mut self) -> Option<SubmissionState> {
        if self.state_rx.changed().await.is_err() {
            return None;
        }
        Some(self.refresh())
    }
}
