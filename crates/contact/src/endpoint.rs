use std::time::Duration;

use futures::future::BoxFuture;
use snafu::{ResultExt, Snafu, ensure};

use crate::message::ContactMessage;

/// Contact endpoint of the production portfolio site.
pub const DEFAULT_CONTACT_ENDPOINT: &str = "https://portfolio-alokparna.pages.dev/contact";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub type DeliveryResult<T> = Result<T, DeliveryError>;

/// Internal delivery taxonomy. The flow collapses every variant to the same
/// observable `Failed` state; the distinction only reaches the logs.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DeliveryError {
    #[snafu(display("failed to build contact http client on `{stage}`: {source}"))]
    BuildClient {
        stage: &'static str,
        source: reqwest::Error,
    },
    #[snafu(display("failed to send contact request to '{url}' on `{stage}`: {source}"))]
    RequestSend {
        stage: &'static str,
        url: String,
        source: reqwest::Error,
    },
    #[snafu(display("contact endpoint '{url}' returned status {status}"))]
    RejectedStatus {
        stage: &'static str,
        url: String,
        status: u16,
    },
    /// Transport failure raised by endpoint implementations that do not go
    /// through reqwest (in-process and scripted endpoints).
    #[snafu(display("contact transport failed on `{stage}`: {details}"))]
    Transport {
        stage: &'static str,
        details: String,
    },
}

/// Boundary to the external service receiving contact messages.
///
/// One call per submission attempt; implementations report success only for
/// an acknowledged delivery.
pub trait ContactEndpoint: Send + Sync {
    fn deliver(&self, message: ContactMessage) -> BoxFuture<'_, DeliveryResult<()>>;
}

/// HTTP endpoint: `POST {url}` with the JSON wire body, success iff the
/// response status is in the 2xx range.
pub struct HttpContactEndpoint {
    client: reqwest::Client,
    url: String,
}

impl HttpContactEndpoint {
    pub fn new(url: impl Into<String>) -> DeliveryResult<Self> {
        Self::with_timeout(url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> DeliveryResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context(BuildClientSnafu {
                stage: "build-http-client",
            })?;

        Ok(Self {
            client,
            url: url.into().trim().to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ContactEndpoint for HttpContactEndpoint {
    fn deliver(&self, message: ContactMessage) -> BoxFuture<'_, DeliveryResult<()>> {
        Box::pin(async move {
            let response = self
                .client
                .post(&self.url)
                .json(&message)
                .send()
                .await
                .context(RequestSendSnafu {
                    stage: "send-contact-request",
                    url: self.url.clone(),
                })?;

            let status = response.status();
            ensure!(
                status.is_success(),
                RejectedStatusSnafu {
                    stage: "contact-http-status",
                    url: self.url.clone(),
                    status: status.as_u16(),
                }
            );

            Ok(())
        })
    }
}
