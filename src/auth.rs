use std::sync::{Arc, RwLock};

use reqwest::{Client, Url};

use crate::config::ClientConfig;
use crate::models::Session;

/// Hands a URL to whatever owns top-level navigation (a browser window, a
/// webview, the system URL opener).
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &Url);
}

/// Cookie-session client for the auth endpoints of the issue service.
///
/// Owns the process-wide session snapshot. Nothing else writes it.
pub struct SessionClient {
    http: Client,
    config: Arc<ClientConfig>,
    navigator: Arc<dyn Navigator>,
    session: RwLock<Session>,
}

impl SessionClient {
    pub fn new(http: Client, config: Arc<ClientConfig>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            http,
            config,
            navigator,
            session: RwLock::new(Session::anonymous()),
        }
    }

    /// The identity provider URL `begin_login` navigates to.
    pub fn authorize_url(&self) -> Url {
        let mut url = self.config.authorize_url().clone();
        url.query_pairs_mut()
            .append_pair("client_id", self.config.github_client_id())
            .append_pair("redirect_uri", &self.config.callback_url())
            .append_pair("scope", self.config.oauth_scope());
        url
    }

    /// Leave for the identity provider. The callback lands on the auth
    /// service, which sets the session cookie.
    pub fn begin_login(&self) {
        let url = self.authorize_url();
        tracing::info!(url = %url, "redirecting to identity provider");
        self.navigator.navigate(&url);
    }

    /// Ask the auth service who we are.
    ///
    /// Never fails: a transport error, a non-success status or an unreadable
    /// body all mean "not authenticated".
    pub async fn get_status(&self) -> Session {
        let session = match self.fetch_status().await {
            Ok(session) => session,
            Err(reason) => {
                tracing::warn!(
                    %reason,
                    "auth status check failed, treating as signed out (third-party cookies may be blocked)"
                );
                Session::anonymous()
            }
        };
        self.store(session.clone());
        session
    }

    async fn fetch_status(&self) -> Result<Session, String> {
        let resp = self
            .http
            .get(self.config.endpoint("auth/status"))
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        if !resp.status().is_success() {
            return Err(format!("status {}", resp.status()));
        }

        resp.json::<Session>()
            .await
            .map_err(|e| format!("invalid body: {}", e))
    }

    /// End the session on the server. Best effort: the local snapshot is
    /// reset whatever the outcome, and failures are only logged.
    pub async fn logout(&self) {
        let result = self
            .http
            .post(self.config.endpoint("auth/logout"))
            .send()
            .await;

        match result {
            Ok(resp) if !resp.status().is_success() => {
                tracing::warn!(status = %resp.status(), "logout rejected by auth service");
            }
            Ok(_) => tracing::debug!("logged out"),
            Err(e) => tracing::warn!(error = %e, "error logging out"),
        }

        self.store(Session::anonymous());
    }

    /// Last known session.
    pub fn current(&self) -> Session {
        self.session
            .read()
            .map(|g| g.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn store(&self, session: Session) {
        let mut guard = self
            .session
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = session;
    }
}
