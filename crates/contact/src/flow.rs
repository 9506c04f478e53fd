use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use folio_profile::Portfolio;
use tokio::sync::watch;

use crate::endpoint::{ContactEndpoint, DeliveryResult, HttpContactEndpoint};
use crate::error::{ContactResult, InvalidMessageSnafu, SubmissionInFlightSnafu};
use crate::message::ContactMessage;
use crate::state::{SubmissionState, SubmissionTransition, TransitionRejection, TransitionResult};

/// Display window before a terminal state snaps back to `Idle`.
pub const RESET_DELAY: Duration = Duration::from_secs(3);

/// Identifies one submission attempt. Monotonic per flow; a newer attempt or
/// a manual reset supersedes older ones, whose late results are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttemptId(pub u64);

struct FlowInner {
    endpoint: Arc<dyn ContactEndpoint>,
    state_tx: watch::Sender<SubmissionState>,
    attempt_seq: AtomicU64,
    reset_delay: Duration,
}

impl FlowInner {
    /// Starts a new attempt: applies `Begin` and mints the attempt id under
    /// the watch lock, so the single-flight check and the sequence bump are
    /// one atomic step.
    fn begin(&self) -> Result<AttemptId, TransitionRejection> {
        let mut outcome = Err(TransitionRejection::AlreadySubmitting);
        self.state_tx
            .send_if_modified(|state| match state.apply(SubmissionTransition::Begin) {
                Ok(next) => {
                    *state = next;
                    let raw = self.attempt_seq.fetch_add(1, Ordering::SeqCst) + 1;
                    outcome = Ok(AttemptId(raw));
                    true
                }
                Err(rejection) => {
                    outcome = Err(rejection);
                    false
                }
            });
        outcome
    }

    /// Applies a completion or reset transition only while `attempt` is still
    /// current. The staleness check runs under the same lock as the state
    /// update, so a concurrent submit or manual reset cannot interleave.
    fn finish(&self, attempt: AttemptId, transition: SubmissionTransition) -> TransitionResult {
        let mut outcome = Err(TransitionRejection::NoActiveSubmission);
        self.state_tx.send_if_modified(|state| {
            if self.attempt_seq.load(Ordering::SeqCst) != attempt.0 {
                outcome = Err(TransitionRejection::NoActiveSubmission);
                return false;
            }

            match state.apply(transition) {
                Ok(next) => {
                    outcome = Ok(next);
                    let changed = *state != next;
                    *state = next;
                    changed
                }
                Err(rejection) => {
                    outcome = Err(rejection);
                    false
                }
            }
        });
        outcome
    }

    /// Manual reset: supersedes whatever attempt is outstanding and forces
    /// `Idle`. A late result for the superseded attempt is discarded.
    fn force_reset(&self) {
        self.state_tx.send_if_modified(|state| {
            self.attempt_seq.fetch_add(1, Ordering::SeqCst);
            let changed = *state != SubmissionState::Idle;
            *state = SubmissionState::Idle;
            changed
        });
    }
}

/// Coordinates one contact-message submission at a time.
///
/// `submit` validates, flips the observable state to `Submitting`, and hands
/// the request to a spawned delivery worker. The worker reports the outcome
/// as `Succeeded` or `Failed`, then a timer returns the state to `Idle` after
/// the display window. The presentation layer watches the state via
/// [`ContactSubmissionFlow::subscribe`].
pub struct ContactSubmissionFlow {
    inner: Arc<FlowInner>,
}

impl ContactSubmissionFlow {
    pub fn new(endpoint: Arc<dyn ContactEndpoint>) -> Self {
        Self::with_reset_delay(endpoint, RESET_DELAY)
    }

    pub fn with_reset_delay(endpoint: Arc<dyn ContactEndpoint>, reset_delay: Duration) -> Self {
        let (state_tx, _) = watch::channel(SubmissionState::Idle);
        Self {
            inner: Arc::new(FlowInner {
                endpoint,
                state_tx,
                attempt_seq: AtomicU64::new(0),
                reset_delay,
            }),
        }
    }

    /// Wires the flow to the contact endpoint advertised by a profile.
    pub fn for_profile(profile: &Portfolio) -> DeliveryResult<Self> {
        let endpoint = HttpContactEndpoint::new(profile.contact_endpoint_url())?;
        Ok(Self::new(Arc::new(endpoint)))
    }

    pub fn state(&self) -> SubmissionState {
        *self.inner.state_tx.borrow()
    }

    /// Observable binding for the presentation layer.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.inner.state_tx.subscribe()
    }

    pub fn reset_delay(&self) -> Duration {
        self.inner.reset_delay
    }

    /// Validates and submits one message.
    ///
    /// The `Idle -> Submitting` edge is observable synchronously, before the
    /// network call resolves. A message that fails validation never touches
    /// the state or the endpoint; a submit while another attempt is
    /// outstanding is rejected, not queued.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, message: ContactMessage) -> ContactResult<AttemptId> {
        if let Err(issues) = message.validate() {
            return InvalidMessageSnafu {
                stage: "submit-validate",
                issues,
            }
            .fail();
        }

        let attempt = match self.inner.begin() {
            Ok(attempt) => attempt,
            Err(_) => {
                tracing::debug!("contact submit rejected while an attempt is in flight");
                return SubmissionInFlightSnafu {
                    stage: "submit-begin",
                }
                .fail();
            }
        };

        let endpoint = Arc::clone(&self.inner.endpoint);
        let inner = Arc::downgrade(&self.inner);
        tokio::spawn(run_delivery_worker(endpoint, inner, attempt, message));

        Ok(attempt)
    }

    /// Forces the state back to `Idle` immediately.
    ///
    /// Invoked by the auto-reset timer after the display window, and
    /// available to the presentation layer directly.
    pub fn reset_state(&self) {
        self.inner.force_reset();
    }
}

async fn run_delivery_worker(
    endpoint: Arc<dyn ContactEndpoint>,
    inner: std::sync::Weak<FlowInner>,
    attempt: AttemptId,
    message: ContactMessage,
) {
    let outcome = endpoint.deliver(message).await;

    // The owning session may have been torn down while the request was in
    // flight; drop the result instead of writing to a disposed observer.
    let Some(inner) = inner.upgrade() else {
        return;
    };

    let transition = match outcome {
        Ok(()) => {
            tracing::info!(attempt = attempt.0, "contact message delivered");
            SubmissionTransition::Complete
        }
        Err(error) => {
            tracing::warn!(
                attempt = attempt.0,
                error = %error,
                "contact delivery failed"
            );
            SubmissionTransition::Fail
        }
    };

    match inner.finish(attempt, transition) {
        Ok(state) if state.is_terminal() => schedule_reset(&inner, attempt),
        Ok(_) => {}
        Err(rejection) => {
            tracing::debug!(
                attempt = attempt.0,
                rejection = ?rejection,
                "stale contact result discarded"
            );
        }
    }
}

/// Schedules the `-> Idle` snap-back, cancelled implicitly when a newer
/// attempt or a manual reset supersedes `attempt` before the window elapses.
fn schedule_reset(inner: &Arc<FlowInner>, attempt: AttemptId) {
    let delay = inner.reset_delay;
    let inner = Arc::downgrade(inner);
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let Some(inner) = inner.upgrade() else {
            return;
        };
        let _ = inner.finish(attempt, SubmissionTransition::ResetToIdle);
    });
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use futures::future::BoxFuture;
    use tokio::sync::Notify;

    use super::*;
    use crate::endpoint::DeliveryError;
    use crate::error::ContactError;
    use crate::session::ContactFormSession;

    #[derive(Debug, Clone, Copy)]
    enum Script {
        Succeed,
        RejectStatus(u16),
        TransportError,
    }

    struct ScriptedEndpoint {
        script: Script,
        calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
    }

    impl ScriptedEndpoint {
        fn new(script: Script) -> Arc<Self> {
            Arc::new(Self {
                script,
                calls: AtomicUsize::new(0),
                gate: None,
            })
        }

        /// Endpoint that holds every request until the gate is notified, so
        /// tests can observe the `Submitting` phase deterministically.
        fn gated(script: Script) -> (Arc<Self>, Arc<Notify>) {
            let gate = Arc::new(Notify::new());
            let endpoint = Arc::new(Self {
                script,
                calls: AtomicUsize::new(0),
                gate: Some(Arc::clone(&gate)),
            });
            (endpoint, gate)
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ContactEndpoint for ScriptedEndpoint {
        fn deliver(&self, _message: ContactMessage) -> BoxFuture<'_, DeliveryResult<()>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move {
                if let Some(gate) = &self.gate {
                    gate.notified().await;
                }
                match self.script {
                    Script::Succeed => Ok(()),
                    Script::RejectStatus(status) => Err(DeliveryError::RejectedStatus {
                        stage: "scripted-status",
                        url: "scripted://contact".to_string(),
                        status,
                    }),
                    Script::TransportError => Err(DeliveryError::Transport {
                        stage: "scripted-transport",
                        details: "connection refused".to_string(),
                    }),
                }
            })
        }
    }

    fn valid_message() -> ContactMessage {
        ContactMessage::new("Ann", "ann@example.com", "Hi")
    }

    fn session_with_draft(flow: ContactSubmissionFlow) -> ContactFormSession {
        let mut session = ContactFormSession::new(flow);
        session.set_name("Ann");
        session.set_email("ann@example.com");
        session.set_message("Hi");
        session
    }

    #[tokio::test]
    async fn invalid_email_is_rejected_before_any_transition() {
        let endpoint = ScriptedEndpoint::new(Script::Succeed);
        let flow = ContactSubmissionFlow::new(endpoint.clone());

        let result = flow.submit(ContactMessage::new("Ann", "not-an-email", "Hi"));

        assert!(matches!(result, Err(ContactError::InvalidMessage { .. })));
        assert_eq!(flow.state(), SubmissionState::Idle);
        assert_eq!(endpoint.calls(), 0);
    }

    #[tokio::test]
    async fn submit_enters_submitting_before_the_request_resolves() {
        let (endpoint, gate) = ScriptedEndpoint::gated(Script::Succeed);
        let flow = ContactSubmissionFlow::new(endpoint.clone());
        let mut rx = flow.subscribe();

        flow.submit(valid_message()).expect("submit accepted");
        assert_eq!(flow.state(), SubmissionState::Submitting);

        rx.changed().await.expect("submitting edge");
        assert_eq!(*rx.borrow_and_update(), SubmissionState::Submitting);

        gate.notify_one();
        rx.changed().await.expect("terminal edge");
        assert_eq!(*rx.borrow_and_update(), SubmissionState::Succeeded);
    }

    #[tokio::test(start_paused = true)]
    async fn happy_path_sequence_ends_idle_with_cleared_fields() {
        let (endpoint, gate) = ScriptedEndpoint::gated(Script::Succeed);
        let flow = ContactSubmissionFlow::new(endpoint.clone());
        let mut session = session_with_draft(flow);

        let mut observed = vec![session.refresh()];
        session.submit().expect("submit accepted");
        observed.push(session.refresh());

        gate.notify_one();
        observed.push(session.changed().await.expect("flow alive"));
        observed.push(session.changed().await.expect("flow alive"));

        assert_eq!(
            observed,
            vec![
                SubmissionState::Idle,
                SubmissionState::Submitting,
                SubmissionState::Succeeded,
                SubmissionState::Idle,
            ]
        );
        assert!(session.draft().is_empty());
        assert_eq!(endpoint.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_status_fails_and_keeps_the_draft() {
        let endpoint = ScriptedEndpoint::new(Script::RejectStatus(500));
        let flow = ContactSubmissionFlow::new(endpoint.clone());
        let mut session = session_with_draft(flow);

        session.submit().expect("submit accepted");

        assert_eq!(
            session.changed().await.expect("flow alive"),
            SubmissionState::Failed
        );
        assert_eq!(session.draft().name, "Ann");
        assert_eq!(session.draft().email, "ann@example.com");
        assert_eq!(session.draft().message, "Hi");

        // The display window elapses without manual intervention.
        assert_eq!(
            session.changed().await.expect("flow alive"),
            SubmissionState::Idle
        );
        assert_eq!(session.draft().name, "Ann");
    }

    #[tokio::test(start_paused = true)]
    async fn transport_error_collapses_to_failed() {
        let endpoint = ScriptedEndpoint::new(Script::TransportError);
        let flow = ContactSubmissionFlow::new(endpoint.clone());
        let mut session = session_with_draft(flow);

        session.submit().expect("submit accepted");

        assert_eq!(
            session.changed().await.expect("flow alive"),
            SubmissionState::Failed
        );
        assert_eq!(session.draft().message, "Hi");
    }

    #[tokio::test]
    async fn second_submit_while_submitting_is_rejected_without_a_request() {
        let (endpoint, gate) = ScriptedEndpoint::gated(Script::Succeed);
        let flow = ContactSubmissionFlow::new(endpoint.clone());

        flow.submit(valid_message()).expect("first submit accepted");
        tokio::task::yield_now().await;
        assert_eq!(endpoint.calls(), 1);

        let second = flow.submit(valid_message());
        assert!(matches!(
            second,
            Err(ContactError::SubmissionInFlight { .. })
        ));
        assert_eq!(flow.state(), SubmissionState::Submitting);

        tokio::task::yield_now().await;
        assert_eq!(endpoint.calls(), 1);

        gate.notify_one();
    }

    #[tokio::test]
    async fn manual_reset_supersedes_an_in_flight_attempt() {
        let (endpoint, gate) = ScriptedEndpoint::gated(Script::Succeed);
        let flow = ContactSubmissionFlow::new(endpoint.clone());

        flow.submit(valid_message()).expect("submit accepted");
        tokio::task::yield_now().await;

        flow.reset_state();
        assert_eq!(flow.state(), SubmissionState::Idle);

        gate.notify_one();
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }

        // The stale result must not resurrect the session.
        assert_eq!(flow.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn dropped_flow_never_writes_to_a_disposed_observer() {
        let (endpoint, gate) = ScriptedEndpoint::gated(Script::Succeed);
        let flow = ContactSubmissionFlow::new(endpoint.clone());
        let mut rx = flow.subscribe();

        flow.submit(valid_message()).expect("submit accepted");
        tokio::task::yield_now().await;
        assert_eq!(*rx.borrow_and_update(), SubmissionState::Submitting);

        drop(flow);
        gate.notify_one();
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }

        // Sender side is gone; the last observed value stays `Submitting`
        // and the receiver reports closure instead of a late write.
        assert_eq!(*rx.borrow(), SubmissionState::Submitting);
        assert!(rx.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn attempts_are_monotonic_across_submissions() {
        let endpoint = ScriptedEndpoint::new(Script::Succeed);
        let flow = ContactSubmissionFlow::new(endpoint.clone());
        let mut rx = flow.subscribe();

        let first = flow.submit(valid_message()).expect("first accepted");
        rx.changed().await.expect("submitting");
        loop {
            rx.changed().await.expect("flow alive");
            if *rx.borrow_and_update() == SubmissionState::Idle {
                break;
            }
        }

        let second = flow.submit(valid_message()).expect("second accepted");
        assert!(second > first);
    }
}
