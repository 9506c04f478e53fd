/// Lifecycle of one contact-form submission attempt.
///
/// Exactly one instance exists per form session, owned by the flow and
/// observed by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// State transition input for the submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionTransition {
    Begin,
    Complete,
    Fail,
    ResetToIdle,
}

/// Rejection reason for illegal submission transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionRejection {
    AlreadySubmitting,
    NoActiveSubmission,
}

pub type TransitionResult = Result<SubmissionState, TransitionRejection>;

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// True for the two states the display window counts down from.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Applies one transition deterministically.
    ///
    /// `Begin` is single-flight: a second submission while one is outstanding
    /// is rejected, never queued. `Complete`/`Fail` only land on an active
    /// submission, so stale network results cannot resurrect a session that
    /// was reset meanwhile. `ResetToIdle` is always legal.
    pub fn apply(&self, transition: SubmissionTransition) -> TransitionResult {
        match transition {
            SubmissionTransition::Begin => self.apply_begin(),
            SubmissionTransition::Complete => self.apply_complete(),
            SubmissionTransition::Fail => self.apply_fail(),
            SubmissionTransition::ResetToIdle => Ok(Self::Idle),
        }
    }

    fn apply_begin(&self) -> TransitionResult {
        match self {
            Self::Submitting => Err(TransitionRejection::AlreadySubmitting),
            Self::Idle | Self::Succeeded | Self::Failed => Ok(Self::Submitting),
        }
    }

    fn apply_complete(&self) -> TransitionResult {
        match self {
            Self::Submitting => Ok(Self::Succeeded),
            Self::Idle | Self::Succeeded | Self::Failed => {
                Err(TransitionRejection::NoActiveSubmission)
            }
        }
    }

    fn apply_fail(&self) -> TransitionResult {
        match self {
            Self::Submitting => Ok(Self::Failed),
            Self::Idle | Self::Succeeded | Self::Failed => {
                Err(TransitionRejection::NoActiveSubmission)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_only_moves_out_of_non_submitting_states() {
        assert_eq!(
            SubmissionState::Idle.apply(SubmissionTransition::Begin),
            Ok(SubmissionState::Submitting)
        );
        assert_eq!(
            SubmissionState::Succeeded.apply(SubmissionTransition::Begin),
            Ok(SubmissionState::Submitting)
        );
        assert_eq!(
            SubmissionState::Failed.apply(SubmissionTransition::Begin),
            Ok(SubmissionState::Submitting)
        );
        assert_eq!(
            SubmissionState::Submitting.apply(SubmissionTransition::Begin),
            Err(TransitionRejection::AlreadySubmitting)
        );
    }

    #[test]
    fn completion_requires_an_active_submission() {
        assert_eq!(
            SubmissionState::Submitting.apply(SubmissionTransition::Complete),
            Ok(SubmissionState::Succeeded)
        );
        assert_eq!(
            SubmissionState::Submitting.apply(SubmissionTransition::Fail),
            Ok(SubmissionState::Failed)
        );

        for state in [
            SubmissionState::Idle,
            SubmissionState::Succeeded,
            SubmissionState::Failed,
        ] {
            assert_eq!(
                state.apply(SubmissionTransition::Complete),
                Err(TransitionRejection::NoActiveSubmission)
            );
            assert_eq!(
                state.apply(SubmissionTransition::Fail),
                Err(TransitionRejection::NoActiveSubmission)
            );
        }
    }

    #[test]
    fn reset_is_legal_from_every_state() {
        for state in [
            SubmissionState::Idle,
            SubmissionState::Submitting,
            SubmissionState::Succeeded,
            SubmissionState::Failed,
        ] {
            assert_eq!(
                state.apply(SubmissionTransition::ResetToIdle),
                Ok(SubmissionState::Idle)
            );
        }
    }

    #[test]
    fn terminal_states_are_exactly_the_display_window_states() {
        assert!(!SubmissionState::Idle.is_terminal());
        assert!(!SubmissionState::Submitting.is_terminal());
        assert!(SubmissionState::Succeeded.is_terminal());
        assert!(SubmissionState::Failed.is_terminal());
        assert!(SubmissionState::Submitting.is_submitting());
    }
}
