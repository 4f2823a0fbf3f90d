mod auth;
mod commands;
mod config;
mod error;
mod http;
mod issues;
mod models;
mod notifications;
mod sort;
mod telemetry;

pub use auth::{Navigator, SessionClient};
pub use commands::Desk;
pub use config::{ClientConfig, ENV_API_BASE_URL, ENV_GITHUB_CLIENT_ID, ENV_OAUTH_SCOPE};
pub use error::{ApiError, ConfigError, ErrorCode};
pub use http::build_client;
pub use issues::IssueClient;
pub use models::{Issue, Label, NewIssue, Session, User};
pub use notifications::{
    Notification, NotificationCenter, NotificationCode, NotificationKind, ShowNotification,
};
pub use sort::{priority_rank, sort_issues, SortDirection, SortKey, SortSpec};
pub use telemetry::init_tracing;
