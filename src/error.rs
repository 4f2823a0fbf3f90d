use std::fmt;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Machine-readable classification carried in the `error` field of a
/// remote failure body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    NotFound,
    GithubAuth,
    RateLimited,
    GithubApi,
    Internal,
    /// Any code this client has no special handling for, kept verbatim.
    Other(String),
}

impl ErrorCode {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "not_found" => Self::NotFound,
            "github_auth_error" => Self::GithubAuth,
            "github_rate_limited" => Self::RateLimited,
            "github_api_error" => Self::GithubApi,
            "internal_error" => Self::Internal,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::NotFound => "not_found",
            Self::GithubAuth => "github_auth_error",
            Self::RateLimited => "github_rate_limited",
            Self::GithubApi => "github_api_error",
            Self::Internal => "internal_error",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited)
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::GithubAuth)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a call against the issue service.
///
/// Built only at the HTTP boundary. Every variant has a human-readable
/// message; only `Remote` carries a code, status and details.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No response was received (connection refused, DNS, TLS, ...).
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// A successful response whose body could not be decoded.
    #[error("{message}")]
    Decode {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// The service answered with a non-success status.
    #[error("{message}")]
    Remote {
        message: String,
        code: Option<ErrorCode>,
        status: StatusCode,
        details: Option<Value>,
    },
}

impl ApiError {
    pub fn message(&self) -> &str {
        match self {
            Self::Transport { message, .. }
            | Self::Decode { message, .. }
            | Self::Remote { message, .. } => message,
        }
    }

    pub fn code(&self) -> Option<&ErrorCode> {
        match self {
            Self::Remote { code, .. } => code.as_ref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::Remote { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing configuration value: {0}")]
    Missing(&'static str),

    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid authorize URL '{url}': {reason}")]
    InvalidAuthorizeUrl { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}
