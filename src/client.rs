use crate::config::ClientConfig;
use crate::errors::WidgetError;
use crate::models::Submission;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

/// What became of one submitted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Success,
    ServerError(StatusCode),
    NetworkError(String),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Success => "saved".to_string(),
            Self::ServerError(status) => format!("Update failed (HTTP {})", status.as_u16()),
            Self::NetworkError(message) => format!("Update failed: {message}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReadingClient {
    base_url: String,
    http: Client,
}

impl ReadingClient {
    pub fn new(config: &ClientConfig) -> Result<Self, WidgetError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url: config.base_url.clone(),
            http: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn send(&self, submission: &Submission) -> SubmitOutcome {
        let url = format!("{}{}", self.base_url, submission.path());
        debug!(action = submission.label(), %url, "sending reading update");

        let mut request = self.http.request(submission.method(), &url);
        if let Some(fields) = submission.form_fields() {
            request = request.form(&fields);
        }

        match request.send().await {
            Ok(response) if response.status() == StatusCode::OK => {
                info!(
                    action = submission.label(),
                    reading = %submission.reading(),
                    "reading update accepted"
                );
                SubmitOutcome::Success
            }
            Ok(response) => {
                let status = response.status();
                warn!(
                    action = submission.label(),
                    reading = %submission.reading(),
                    status = status.as_u16(),
                    "reading update rejected"
                );
                SubmitOutcome::ServerError(status)
            }
            Err(err) => {
                warn!(
                    action = submission.label(),
                    reading = %submission.reading(),
                    "reading update failed: {err}"
                );
                SubmitOutcome::NetworkError(err.to_string())
            }
        }
    }
}
