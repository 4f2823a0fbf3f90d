use std::sync::Arc;

use serde::Serialize;

use crate::auth::{Navigator, SessionClient};
use crate::config::ClientConfig;
use crate::error::ConfigError;
use crate::http;
use crate::issues::IssueClient;
use crate::models::{Issue, Session};
use crate::notifications::{NotificationCenter, ShowNotification};
use crate::sort::SortSpec;

/// Everything the UI talks to, wired once at startup.
///
/// Session and issue clients share one HTTP client, so the session cookie
/// set at login is sent with issue calls. Failures the user should see are
/// routed into the notification center.
pub struct Desk {
    session: SessionClient,
    issues: IssueClient,
    notifications: Arc<NotificationCenter>,
}

impl Desk {
    pub fn new(config: ClientConfig, navigator: Arc<dyn Navigator>) -> Result<Self, ConfigError> {
        let config = Arc::new(config);
        let client = http::build_client()?;
        Ok(Self {
            session: SessionClient::new(client.clone(), config.clone(), navigator),
            issues: IssueClient::new(client, config),
            notifications: Arc::new(NotificationCenter::new()),
        })
    }

    pub fn session(&self) -> &SessionClient {
        &self.session
    }

    pub fn issues(&self) -> &IssueClient {
        &self.issues
    }

    pub fn notifications(&self) -> Arc<NotificationCenter> {
        self.notifications.clone()
    }

    // ===================================================================
    //  Auth
    // ===================================================================

    pub fn sign_in(&self) {
        self.session.begin_login();
    }

    pub async fn refresh_session(&self) -> Session {
        self.session.get_status().await
    }

    /// Log out. The local session is gone afterwards even if the service
    /// never answered.
    pub async fn sign_out(&self) {
        self.session.logout().await;
    }

    // ===================================================================
    //  Issues
    // ===================================================================

    /// Fetch issues and order them for display. On failure the error is
    /// shown and `None` returned.
    pub async fn load_issues(&self, force_refresh: bool, order: SortSpec) -> Option<Vec<Issue>> {
        match self.issues.list(force_refresh).await {
            Ok(issues) => Some(order.apply(&issues)),
            Err(e) => {
                self.notifications.show_api_error(&e);
                None
            }
        }
    }

    /// Create an issue and announce the outcome.
    pub async fn submit_issue<P>(&self, payload: &P) -> Option<Issue>
    where
        P: Serialize + ?Sized,
    {
        match self.issues.create(payload).await {
            Ok(issue) => {
                self.notifications.show(
                    ShowNotification::success(format!("Issue #{} created", issue.number))
                        .with_issue_url(issue.html_url.clone()),
                );
                Some(issue)
            }
            Err(e) => {
                self.notifications.show_api_error(&e);
                None
            }
        }
    }
}
