use std::sync::Arc;

use reqwest::Client;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{read_json, transport_error};
use crate::models::Issue;

const LIST_FAILED: &str = "Failed to fetch issues";
const CREATE_FAILED: &str = "Failed to create issue";

/// Client for the `/issues` collection of the issue service.
///
/// Holds no cache of its own. `force_refresh` only asks the service to skip
/// its cache.
#[derive(Clone)]
pub struct IssueClient {
    http: Client,
    config: Arc<ClientConfig>,
}

impl IssueClient {
    pub fn new(http: Client, config: Arc<ClientConfig>) -> Self {
        Self { http, config }
    }

    /// Fetch every issue, in the order the service returns them.
    pub async fn list(&self, force_refresh: bool) -> Result<Vec<Issue>, ApiError> {
        let mut request = self.http.get(self.config.endpoint("issues"));
        if force_refresh {
            request = request.query(&[("force_refresh", "true")]);
        }
        tracing::debug!(force_refresh, "fetching issues");

        let result = match request.send().await {
            Ok(resp) => read_json::<Vec<Issue>>(resp, LIST_FAILED).await,
            Err(e) => Err(transport_error(LIST_FAILED, e)),
        };

        match result {
            Ok(issues) => {
                tracing::debug!(count = issues.len(), "fetched issues");
                Ok(issues)
            }
            Err(e) => {
                log_failure("list", &e);
                Err(e)
            }
        }
    }

    /// Create an issue from any JSON-serializable payload.
    pub async fn create<P>(&self, payload: &P) -> Result<Issue, ApiError>
    where
        P: Serialize + ?Sized,
    {
        let request = self.http.post(self.config.endpoint("issues")).json(payload);

        let result = match request.send().await {
            Ok(resp) => read_json::<Issue>(resp, CREATE_FAILED).await,
            Err(e) => Err(transport_error(CREATE_FAILED, e)),
        };

        match result {
            Ok(issue) => {
                tracing::info!(number = issue.number, url = %issue.html_url, "created issue");
                Ok(issue)
            }
            Err(e) => {
                log_failure("create", &e);
                Err(e)
            }
        }
    }
}

fn log_failure(operation: &str, error: &ApiError) {
    tracing::error!(
        operation,
        error = %error,
        code = error.code().map(|c| c.as_str()),
        status = error.status().map(|s| s.as_u16()),
        "issue request failed"
    );
}
