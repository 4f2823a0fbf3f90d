use reqwest::Url;

use crate::error::ConfigError;

pub const ENV_API_BASE_URL: &str = "ISSUE_DESK_API_BASE_URL";
pub const ENV_GITHUB_CLIENT_ID: &str = "ISSUE_DESK_GITHUB_CLIENT_ID";
pub const ENV_OAUTH_SCOPE: &str = "ISSUE_DESK_OAUTH_SCOPE";

const DEFAULT_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const DEFAULT_OAUTH_SCOPE: &str = "repo";

/// Connection settings shared by every client. Built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_base_url: String,
    github_client_id: String,
    oauth_scope: String,
    authorize_url: Url,
}

impl ClientConfig {
    pub fn new(
        api_base_url: impl Into<String>,
        github_client_id: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let raw = api_base_url.into();
        let api_base_url = validate_base_url(&raw)?;
        Ok(Self {
            api_base_url,
            github_client_id: github_client_id.into(),
            oauth_scope: DEFAULT_OAUTH_SCOPE.to_string(),
            authorize_url: parse_authorize_url(DEFAULT_AUTHORIZE_URL)?,
        })
    }

    /// Read the configuration from `ISSUE_DESK_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base =
            non_empty_env(ENV_API_BASE_URL).ok_or(ConfigError::Missing(ENV_API_BASE_URL))?;
        let client_id = non_empty_env(ENV_GITHUB_CLIENT_ID)
            .ok_or(ConfigError::Missing(ENV_GITHUB_CLIENT_ID))?;
        let config = Self::new(base, client_id)?;
        Ok(match non_empty_env(ENV_OAUTH_SCOPE) {
            Some(scope) => config.with_scope(scope),
            None => config,
        })
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.oauth_scope = scope.into();
        self
    }

    /// Point the login redirect at another identity provider endpoint.
    pub fn with_authorize_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.authorize_url = parse_authorize_url(url)?;
        Ok(self)
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn github_client_id(&self) -> &str {
        &self.github_client_id
    }

    pub fn oauth_scope(&self) -> &str {
        &self.oauth_scope
    }

    pub fn authorize_url(&self) -> &Url {
        &self.authorize_url
    }

    /// `{base}/{path}`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }

    /// Where the identity provider sends the browser back after login.
    pub fn callback_url(&self) -> String {
        self.endpoint("auth/callback")
    }
}

fn validate_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(trimmed.to_string())
}

fn parse_authorize_url(raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidAuthorizeUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
