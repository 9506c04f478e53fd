use std::env;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::future::BoxFuture;
use snafu::{OptionExt, Snafu, ensure};
use tokio::sync::{Notify, watch};

use folio_contact::{
    ContactEndpoint, ContactError, ContactFormSession, ContactMessage, ContactSubmissionFlow,
    DeliveryError, DeliveryResult, SubmissionState,
};
use folio_profile::ProfileStore;

#[derive(Debug, Clone, Copy)]
enum Scenario {
    ValidateRejects,
    SubmitSuccess,
    SubmitFailure,
    SingleFlight,
    AutoReset,
    ProfileDefaults,
    All,
}

impl Scenario {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "validate_rejects" => Some(Self::ValidateRejects),
            "submit_success" => Some(Self::SubmitSuccess),
            "submit_failure" => Some(Self::SubmitFailure),
            "single_flight" => Some(Self::SingleFlight),
            "auto_reset" => Some(Self::AutoReset),
            "profile_defaults" => Some(Self::ProfileDefaults),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::ValidateRejects => "validate_rejects",
            Self::SubmitSuccess => "submit_success",
            Self::SubmitFailure => "submit_failure",
            Self::SingleFlight => "single_flight",
            Self::AutoReset => "auto_reset",
            Self::ProfileDefaults => "profile_defaults",
            Self::All => "all",
        }
    }
}

#[derive(Debug, Snafu)]
enum RunnerError {
    #[snafu(display("missing required --scenario argument"))]
    MissingScenario { stage: &'static str },
    #[snafu(display("missing value for argument '{arg}'"))]
    MissingArgumentValue {
        stage: &'static str,
        arg: &'static str,
    },
    #[snafu(display("unknown scenario '{raw}'"))]
    UnknownScenario { stage: &'static str, raw: String },
    #[snafu(display("unknown argument '{raw}'"))]
    UnknownArgument { stage: &'static str, raw: String },
    #[snafu(display("scenario '{scenario}' failed: {reason}"))]
    ScenarioFailed {
        stage: &'static str,
        scenario: &'static str,
        reason: String,
    },
}

type RunnerResult<T> = Result<T, RunnerError>;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(error) = run().await {
        println!("runner_ok=false");
        eprintln!("runner_error={error}");
        std::process::exit(1);
    }

    println!("runner_ok=true");
}

async fn run() -> RunnerResult<()> {
    let scenario = parse_args(env::args().skip(1))?;
    println!("scenario={}", scenario.name());

    match scenario {
        Scenario::ValidateRejects => run_validate_rejects().await?,
        Scenario::SubmitSuccess => run_submit_success().await?,
        Scenario::SubmitFailure => run_submit_failure().await?,
        Scenario::SingleFlight => run_single_flight().await?,
        Scenario::AutoReset => run_auto_reset().await?,
        Scenario::ProfileDefaults => run_profile_defaults()?,
        Scenario::All => {
            run_validate_rejects().await?;
            run_submit_success().await?;
            run_submit_failure().await?;
            run_single_flight().await?;
            run_auto_reset().await?;
            run_profile_defaults()?;
        }
    }

    Ok(())
}

fn parse_args(args: impl IntoIterator<Item = String>) -> RunnerResult<Scenario> {
    let mut scenario = None;
    let mut pending = args.into_iter();

    while let Some(argument) = pending.next() {
        match argument.as_str() {
            "--scenario" => {
                let value = pending.next().context(MissingArgumentValueSnafu {
                    stage: "parse-args-scenario-value",
                    arg: "--scenario",
                })?;

                let parsed = Scenario::parse(&value).context(UnknownScenarioSnafu {
                    stage: "parse-args-scenario",
                    raw: value,
                })?;
                scenario = Some(parsed);
            }
            raw => {
                return UnknownArgumentSnafu {
                    stage: "parse-args",
                    raw: raw.to_string(),
                }
                .fail();
            }
        }
    }

    scenario.context(MissingScenarioSnafu { stage: "parse-args" })
}

#[derive(Debug, Clone, Copy)]
enum Script {
    Succeed,
    RejectStatus(u16),
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

/// Loops on the observable state until `expected` shows up, bounded so a
/// broken flow fails the scenario instead of hanging the runner.
async fn wait_for_state(
    rx: &mut watch::Receiver<SubmissionState>,
    expected: SubmissionState,
    scenario: &'static str,
) -> RunnerResult<()> {
    let wait = async {
        loop {
            if *rx.borrow_and_update() == expected {
                return true;
            }
            if rx.changed().await.is_err() {
                return false;
            }
        }
    };

    match tokio::time::timeout(Duration::from_secs(2), wait).await {
        Ok(true) => Ok(()),
        Ok(false) => ScenarioFailedSnafu {
            stage: "wait-for-state",
            scenario,
            reason: format!("flow closed before reaching {expected:?}"),
        }
        .fail(),
        Err(_) => ScenarioFailedSnafu {
            stage: "wait-for-state",
            scenario,
            reason: format!("timed out waiting for {expected:?}"),
        }
        .fail(),
    }
}

async fn run_validate_rejects() -> RunnerResult<()> {
    let scenario = "validate_rejects";
    let endpoint = ScriptedEndpoint::new(Script::Succeed);
    let flow = ContactSubmissionFlow::new(endpoint.clone());

    let result = flow.submit(ContactMessage::new("Ann", "not-an-email", "Hi"));
    ensure!(
        matches!(result, Err(ContactError::InvalidMessage { .. })),
        ScenarioFailedSnafu {
            stage: "validate-rejects",
            scenario,
            reason: "invalid email was not rejected".to_string(),
        }
    );
    ensure!(
        flow.state() == SubmissionState::Idle && endpoint.calls() == 0,
        ScenarioFailedSnafu {
            stage: "validate-rejects",
            scenario,
            reason: "rejected submit still touched state or endpoint".to_string(),
        }
    );

    println!("scenario_ok={scenario}");
    Ok(())
}

async fn run_submit_success() -> RunnerResult<()> {
    let scenario = "submit_success";
    let endpoint = ScriptedEndpoint::new(Script::Succeed);
    let flow = ContactSubmissionFlow::new(endpoint.clone());
    let mut rx = flow.subscribe();
    let mut session = session_with_draft(flow);

    session.submit().map_err(|error| {
        ScenarioFailedSnafu {
            stage: "submit-success",
            scenario,
            reason: error.to_string(),
        }
        .build()
    })?;
    ensure!(
        session.state() == SubmissionState::Submitting,
        ScenarioFailedSnafu {
            stage: "submit-success",
            scenario,
            reason: "submit did not enter Submitting synchronously".to_string(),
        }
    );

    wait_for_state(&mut rx, SubmissionState::Succeeded, scenario).await?;
    session.refresh();
    ensure!(
        session.draft().is_empty(),
        ScenarioFailedSnafu {
            stage: "submit-success",
            scenario,
            reason: "draft fields were not cleared on success".to_string(),
        }
    );

    println!("scenario_ok={scenario}");
    Ok(())
}

async fn run_submit_failure() -> RunnerResult<()> {
    let scenario = "submit_failure";
    let endpoint = ScriptedEndpoint::new(Script::RejectStatus(500));
    let flow = ContactSubmissionFlow::new(endpoint.clone());
    let mut rx = flow.subscribe();
    let mut session = session_with_draft(flow);

    session.submit().map_err(|error| {
        ScenarioFailedSnafu {
            stage: "submit-failure",
            scenario,
            reason: error.to_string(),
        }
        .build()
    })?;

    wait_for_state(&mut rx, SubmissionState::Failed, scenario).await?;
    session.refresh();
    ensure!(
        session.draft().name == "Ann" && session.draft().message == "Hi",
        ScenarioFailedSnafu {
            stage: "submit-failure",
            scenario,
            reason: "draft fields were not preserved on failure".to_string(),
        }
    );

    println!("scenario_ok={scenario}");
    Ok(())
}

async fn run_single_flight() -> RunnerResult<()> {
    let scenario = "single_flight";
    let (endpoint, gate) = ScriptedEndpoint::gated(Script::Succeed);
    let flow = ContactSubmissionFlow::new(endpoint.clone());
    let mut rx = flow.subscribe();

    flow.submit(valid_message()).map_err(|error| {
        ScenarioFailedSnafu {
            stage: "single-flight",
            scenario,
            reason: error.to_string(),
        }
        .build()
    })?;
    tokio::task::yield_now().await;

    let second = flow.submit(valid_message());
    ensure!(
        matches!(second, Err(ContactError::SubmissionInFlight { .. })),
        ScenarioFailedSnafu {
            stage: "single-flight",
            scenario,
            reason: "second submit was not rejected".to_string(),
        }
    );
    ensure!(
        endpoint.calls() == 1,
        ScenarioFailedSnafu {
            stage: "single-flight",
            scenario,
            reason: format!("expected 1 request, saw {}", endpoint.calls()),
        }
    );

    gate.notify_one();
    wait_for_state(&mut rx, SubmissionState::Succeeded, scenario).await?;

    println!("scenario_ok={scenario}");
    Ok(())
}

async fn run_auto_reset() -> RunnerResult<()> {
    let scenario = "auto_reset";
    let endpoint = ScriptedEndpoint::new(Script::Succeed);
    // Short display window so the scenario runs on the real clock.
    let flow = ContactSubmissionFlow::with_reset_delay(endpoint.clone(), Duration::from_millis(100));
    let mut rx = flow.subscribe();

    flow.submit(valid_message()).map_err(|error| {
        ScenarioFailedSnafu {
            stage: "auto-reset",
            scenario,
            reason: error.to_string(),
        }
        .build()
    })?;

    wait_for_state(&mut rx, SubmissionState::Succeeded, scenario).await?;
    wait_for_state(&mut rx, SubmissionState::Idle, scenario).await?;

    println!("scenario_ok={scenario}");
    Ok(())
}

fn run_profile_defaults() -> RunnerResult<()> {
    let scenario = "profile_defaults";
    let store = ProfileStore::load();
    let profile = store.profile();

    ensure!(
        !profile.name.trim().is_empty(),
        ScenarioFailedSnafu {
            stage: "profile-defaults",
            scenario,
            reason: "profile has an empty name".to_string(),
        }
    );
    let endpoint_url = profile.contact_endpoint_url();
    ensure!(
        endpoint_url.ends_with("/contact"),
        ScenarioFailedSnafu {
            stage: "profile-defaults",
            scenario,
            reason: format!("unexpected contact endpoint '{endpoint_url}'"),
        }
    );

    println!("profile_name={}", profile.name);
    println!("contact_endpoint={endpoint_url}");
    println!("scenario_ok={scenario}");
    Ok(())
}
