//! Display ordering for issue lists.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Issue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    CreatedAt,
    UpdatedAt,
    Priority,
    Client,
    Title,
    Number,
    Type,
    State,
}

impl SortKey {
    pub const ALL: [SortKey; 8] = [
        SortKey::CreatedAt,
        SortKey::UpdatedAt,
        SortKey::Priority,
        SortKey::Client,
        SortKey::Title,
        SortKey::Number,
        SortKey::Type,
        SortKey::State,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::CreatedAt => "created_at",
            SortKey::UpdatedAt => "updated_at",
            SortKey::Priority => "priority",
            SortKey::Client => "client",
            SortKey::Title => "title",
            SortKey::Number => "number",
            SortKey::Type => "type",
            SortKey::State => "state",
        }
    }

    fn value(self, issue: &Issue) -> Option<SortValue<'_>> {
        match self {
            SortKey::CreatedAt => Some(SortValue::Time(issue.created_at)),
            SortKey::UpdatedAt => Some(SortValue::Time(issue.updated_at)),
            SortKey::Priority => issue
                .priority
                .as_deref()
                .map(|p| SortValue::Rank(priority_rank(Some(p)))),
            SortKey::Client => issue.client.as_deref().map(SortValue::Text),
            SortKey::Title => issue.title.as_deref().map(SortValue::Text),
            SortKey::Number => Some(SortValue::Number(issue.number)),
            SortKey::Type => issue.issue_type.as_deref().map(SortValue::Text),
            SortKey::State => Some(SortValue::Text(&issue.state)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("Unknown sort key: {}", s))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            other => Err(format!("Unknown sort direction: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn apply(&self, issues: &[Issue]) -> Vec<Issue> {
        sort_issues(issues, self.key, self.direction)
    }
}

/// A comparable projection of one field. Variants never mix within one key.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue<'a> {
    Rank(i8),
    Number(u64),
    Time(DateTime<Utc>),
    Text(&'a str),
}

/// `low` < `medium` < `high`, case-insensitive. Missing or unknown is -1.
pub fn priority_rank(priority: Option<&str>) -> i8 {
    match priority.map(str::to_lowercase).as_deref() {
        Some("low") => 0,
        Some("medium") => 1,
        Some("high") => 2,
        _ => -1,
    }
}

/// Return a sorted copy of `issues`.
///
/// A missing field value sorts after a present one in either direction; only
/// the comparison of present values is reversed for `Descending`. Ties keep
/// their input order.
pub fn sort_issues(issues: &[Issue], key: SortKey, direction: SortDirection) -> Vec<Issue> {
    let mut sorted = issues.to_vec();
    sorted.sort_by(|a, b| compare(a, b, key, direction));
    sorted
}

fn compare(a: &Issue, b: &Issue, key: SortKey, direction: SortDirection) -> Ordering {
    match (key.value(a), key.value(b)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => match direction {
            SortDirection::Ascending => x.cmp(&y),
            SortDirection::Descending => y.cmp(&x),
        },
    }
}
