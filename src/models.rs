use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// --- Issue records as served by the issue service ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IssueRecord")]
pub struct Issue {
    pub id: u64,
    pub number: u64,
    pub title: Option<String>,
    pub body: Option<String>,
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Order as returned by the service; names may repeat.
    pub labels: Vec<Label>,
    pub priority: Option<String>,
    #[serde(rename = "type")]
    pub issue_type: Option<String>,
    pub client: Option<String>,
    pub assignee: Option<String>,
    pub html_url: String,
}

/// Wire shape of an issue. Accepts both the normalized records and raw
/// GitHub issues, where `url` is the API link and `html_url` the web link,
/// and `assignee`/`type` are objects.
#[derive(Deserialize)]
struct IssueRecord {
    id: u64,
    number: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    body: Option<String>,
    state: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    labels: Vec<Label>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default, rename = "type")]
    issue_type: Option<Value>,
    #[serde(default)]
    client: Option<String>,
    #[serde(default)]
    assignee: Option<Value>,
    #[serde(default)]
    html_url: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl TryFrom<IssueRecord> for Issue {
    type Error = String;

    fn try_from(record: IssueRecord) -> Result<Self, Self::Error> {
        let html_url = record
            .html_url
            .or(record.url)
            .ok_or_else(|| "missing field `html_url`".to_string())?;
        Ok(Self {
            id: record.id,
            number: record.number,
            title: record.title,
            body: record.body,
            state: record.state,
            created_at: record.created_at,
            updated_at: record.updated_at,
            labels: record.labels,
            priority: record.priority,
            issue_type: record.issue_type.as_ref().and_then(|v| text_or_field(v, "name")),
            client: record.client,
            assignee: record.assignee.as_ref().and_then(|v| text_or_field(v, "login")),
            html_url,
        })
    }
}

/// A plain string, or `field` of an object.
fn text_or_field(value: &Value, field: &str) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map.get(field).and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// Typed body for creating an issue. The service accepts any JSON object, so
/// this is a convenience rather than a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIssue {
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

// --- Auth service types ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub id: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn issue_accepts_the_normalized_backend_shape() {
        let issue: Issue = serde_json::from_value(json!({
            "id": 9001,
            "number": 12,
            "title": "Crash on save",
            "body": null,
            "state": "open",
            "created_at": "2024-03-01T10:00:00Z",
            "updated_at": "2024-03-02T08:30:00Z",
            "labels": [
                { "id": 1, "name": "P: High", "color": "ff0000", "default": false },
                { "id": 2, "name": "T: Bug", "color": "00ff00" }
            ],
            "priority": "High",
            "type": "Bug",
            "client": null,
            "assignee": "octocat",
            "url": "https://github.com/acme/tracker/issues/12"
        }))
        .unwrap();

        assert_eq!(issue.number, 12);
        assert_eq!(issue.body, None);
        assert_eq!(issue.labels[1].name, "T: Bug");
        assert_eq!(issue.issue_type.as_deref(), Some("Bug"));
        assert_eq!(issue.html_url, "https://github.com/acme/tracker/issues/12");
        assert!(issue.updated_at >= issue.created_at);
    }

    #[test]
    fn raw_github_issue_keeps_the_web_link() {
        let issue: Issue = serde_json::from_value(json!({
            "url": "https://api.github.com/repos/acme/tracker/issues/1",
            "repository_url": "https://api.github.com/repos/acme/tracker",
            "html_url": "https://github.com/acme/tracker/issues/1",
            "id": 2001,
            "node_id": "I_kwDOA",
            "number": 1,
            "title": "Crash on save",
            "user": { "login": "octocat", "id": 1 },
            "labels": [{
                "id": 7,
                "url": "https://api.github.com/repos/acme/tracker/labels/bug",
                "name": "bug",
                "color": "d73a4a",
                "default": true
            }],
            "state": "open",
            "locked": false,
            "assignee": { "login": "hubot", "id": 2 },
            "comments": 3,
            "created_at": "2024-03-01T10:00:00Z",
            "updated_at": "2024-03-02T08:30:00Z",
            "closed_at": null,
            "type": { "id": 4, "name": "Bug" },
            "body": "Steps to reproduce"
        }))
        .unwrap();

        assert_eq!(issue.html_url, "https://github.com/acme/tracker/issues/1");
        assert_eq!(issue.labels[0].name, "bug");
        assert_eq!(issue.assignee.as_deref(), Some("hubot"));
        assert_eq!(issue.issue_type.as_deref(), Some("Bug"));
        assert_eq!(issue.priority, None);
    }

    #[test]
    fn issue_without_any_link_is_rejected() {
        let err = serde_json::from_value::<Issue>(json!({
            "id": 1,
            "number": 1,
            "state": "open",
            "created_at": "2024-03-01T10:00:00Z",
            "updated_at": "2024-03-01T10:00:00Z"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("html_url"));
    }

    #[test]
    fn serialized_issue_reads_back_unchanged() {
        let issue: Issue = serde_json::from_value(json!({
            "id": 3, "number": 3, "title": null, "state": "closed",
            "created_at": "2024-03-01T10:00:00Z",
            "updated_at": "2024-03-05T10:00:00Z",
            "assignee": "octocat",
            "html_url": "https://github.com/acme/tracker/issues/3"
        }))
        .unwrap();
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(value["type"], Value::Null);
        assert_eq!(serde_json::from_value::<Issue>(value).unwrap(), issue);
    }

    #[test]
    fn session_without_user_is_anonymous() {
        let session: Session =
            serde_json::from_value(json!({ "authenticated": false })).unwrap();
        assert_eq!(session, Session::anonymous());
    }

    #[test]
    fn new_issue_omits_unset_classifications() {
        let payload = NewIssue {
            title: "Add export".to_string(),
            priority: Some("low".to_string()),
            ..NewIssue::default()
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({ "title": "Add export", "body": "", "priority": "low" })
        );
    }
}
