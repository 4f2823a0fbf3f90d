use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Success,
    Error,
}

impl NotificationKind {
    fn default_name(self) -> &'static str {
        match self {
            NotificationKind::Success => "Success",
            NotificationKind::Error => "Error",
        }
    }
}

/// An error code shown to the user: the service's string code or an HTTP
/// status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NotificationCode {
    Text(String),
    Number(i64),
}

impl Default for NotificationCode {
    fn default() -> Self {
        NotificationCode::Text(String::new())
    }
}

impl From<&str> for NotificationCode {
    fn from(value: &str) -> Self {
        NotificationCode::Text(value.to_string())
    }
}

impl From<String> for NotificationCode {
    fn from(value: String) -> Self {
        NotificationCode::Text(value)
    }
}

impl From<i64> for NotificationCode {
    fn from(value: i64) -> Self {
        NotificationCode::Number(value)
    }
}

/// The single notification slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub visible: bool,
    pub kind: NotificationKind,
    pub name: String,
    pub message: String,
    pub issue_url: String,
    pub error_code: NotificationCode,
}

/// Arguments to [`NotificationCenter::show`].
#[derive(Debug, Clone, Default)]
pub struct ShowNotification {
    pub kind: NotificationKind,
    pub message: String,
    pub name: Option<String>,
    pub issue_url: Option<String>,
    pub error_code: Option<NotificationCode>,
}

impl ShowNotification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_issue_url(mut self, url: impl Into<String>) -> Self {
        self.issue_url = Some(url.into());
        self
    }

    pub fn with_error_code(mut self, code: impl Into<NotificationCode>) -> Self {
        self.error_code = Some(code.into());
        self
    }
}

/// Owner of the shared notification slot.
///
/// At most one notification is held. `show` replaces the whole record, so a
/// second `show` discards the first (last write wins, no queue). Readers get
/// snapshots or a watch receiver; only `show` and `close` write.
pub struct NotificationCenter {
    slot: watch::Sender<Notification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        let (slot, _) = watch::channel(Notification::default());
        Self { slot }
    }

    pub fn show(&self, request: ShowNotification) {
        let ShowNotification {
            kind,
            message,
            name,
            issue_url,
            error_code,
        } = request;

        let notification = Notification {
            visible: true,
            kind,
            name: name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| kind.default_name().to_string()),
            message,
            issue_url: issue_url.unwrap_or_default(),
            error_code: error_code.unwrap_or_default(),
        };
        tracing::debug!(
            kind = ?notification.kind,
            message = %notification.message,
            "showing notification"
        );
        self.slot.send_replace(notification);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(ShowNotification::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(ShowNotification::error(message));
    }

    /// Show an API failure with its code, falling back to the HTTP status.
    pub fn show_api_error(&self, error: &ApiError) {
        let mut request = ShowNotification::error(error.message());
        if let Some(code) = error.code() {
            request = request.with_error_code(code.as_str());
        } else if let Some(status) = error.status() {
            request = request.with_error_code(i64::from(status.as_u16()));
        }
        self.show(request);
    }

    /// Hide the notification, keeping its content readable.
    pub fn close(&self) {
        self.slot.send_modify(|n| n.visible = false);
    }

    pub fn snapshot(&self) -> Notification {
        self.slot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Notification> {
        self.slot.subscribe()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}
