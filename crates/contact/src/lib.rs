pub mod endpoint;
pub mod error;
pub mod flow;
pub mod message;
pub mod session;
pub mod state;

pub use endpoint::{
    ContactEndpoint, DEFAULT_CONTACT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT, DeliveryError,
    DeliveryResult, HttpContactEndpoint,
};
pub use error::{ContactError, ContactResult};
pub use flow::{AttemptId, ContactSubmissionFlow, RESET_DELAY};
pub use message::{ContactField, ContactMessage, ValidationIssue, ValidationIssues};
pub use session::{ContactFormSession, FormDraft};
pub use state::{SubmissionState, SubmissionTransition, TransitionRejection, TransitionResult};
