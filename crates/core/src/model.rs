use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Quadrant-encoding tags. Exactly one (or none) is expected on a task;
/// when several are present the first in this order wins.
pub const FAST_TAG: &str = "fast";
pub const IMPORTANT_TAG: &str = "important";
pub const THINK_TAG: &str = "think";

pub const SPECIAL_TAGS: [&str; 3] = [FAST_TAG, IMPORTANT_TAG, THINK_TAG];

/// Remote status value meaning "completed".
pub const COMPLETED_STATUS: i32 = 2;

pub fn is_special_tag(tag: &str) -> bool {
    SPECIAL_TAGS.contains(&tag)
}

/// One of the four Eisenhower buckets. Membership is encoded on the remote
/// task as a special tag; Q4 is the "no special tag" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[clap(rename_all = "lowercase")]
pub enum Quadrant {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [Quadrant::Q1, Quadrant::Q2, Quadrant::Q3, Quadrant::Q4];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quadrant::Q1 => "q1",
            Quadrant::Q2 => "q2",
            Quadrant::Q3 => "q3",
            Quadrant::Q4 => "q4",
        }
    }

    /// The tag that encodes membership in this quadrant, `None` for Q4.
    pub fn special_tag(&self) -> Option<&'static str> {
        match self {
            Quadrant::Q1 => Some(FAST_TAG),
            Quadrant::Q2 => Some(IMPORTANT_TAG),
            Quadrant::Q3 => Some(THINK_TAG),
            Quadrant::Q4 => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::Q1 => "Urgent & Important",
            Quadrant::Q2 => "Important, Not Urgent",
            Quadrant::Q3 => "Requires Thought",
            Quadrant::Q4 => "Unmarked",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Quadrant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "q1" => Ok(Quadrant::Q1),
            "q2" => Ok(Quadrant::Q2),
            "q3" => Ok(Quadrant::Q3),
            "q4" => Ok(Quadrant::Q4),
            other => Err(anyhow!("Unknown quadrant '{}': expected q1|q2|q3|q4", other)),
        }
    }
}

/// A named date-bucket filter applied before quadrant partitioning.
/// Defined at process start, immutable, never derived from remote data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[clap(rename_all = "lowercase")]
pub enum ContextId {
    All,
    Today,
    Overdue,
    Tomorrow,
    Future,
    Yesterday,
}

impl ContextId {
    pub const ALL_CONTEXTS: [ContextId; 6] = [
        ContextId::All,
        ContextId::Today,
        ContextId::Overdue,
        ContextId::Tomorrow,
        ContextId::Future,
        ContextId::Yesterday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContextId::All => "all",
            ContextId::Today => "today",
            ContextId::Overdue => "overdue",
            ContextId::Tomorrow => "tomorrow",
            ContextId::Future => "future",
            ContextId::Yesterday => "yesterday",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ContextId::All => "All tasks, no date filtering",
            ContextId::Today => "Due on the current local day",
            ContextId::Overdue => "Due before the current local day",
            ContextId::Tomorrow => "Due on the next local day",
            ContextId::Future => "Due after the current local day",
            ContextId::Yesterday => "Due on the previous local day",
        }
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContextId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(ContextId::All),
            "today" => Ok(ContextId::Today),
            "overdue" => Ok(ContextId::Overdue),
            "tomorrow" => Ok(ContextId::Tomorrow),
            "future" => Ok(ContextId::Future),
            "yesterday" => Ok(ContextId::Yesterday),
            other => Err(anyhow!(
                "Unknown context '{}': expected all|today|overdue|tomorrow|future|yesterday",
                other
            )),
        }
    }
}

/// A task as the remote service represents it. The core holds a transient,
/// locally-mutable copy; the remote document stays the source of truth.
///
/// Date fields stay in their wire shape (`2026-01-28T07:30:00.000+0000`);
/// parsing happens at the classification boundary so an update round-trips
/// bytes the service already accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub project_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Legacy priority signal {0,1,3,5}; unused by the classifier but must
    /// round-trip unchanged.
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub status: i32,
    /// Opaque to this crate; preserved verbatim on every write.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reminders: Vec<serde_json::Value>,
}

/// A remote project. Only enumerated to page through task endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// OAuth2 token material. Held only in session memory, never persisted
/// by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

impl Token {
    /// Wrap a pre-provisioned bearer token (non-interactive use).
    pub fn bearer_only(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            expires_in: None,
            token_type: None,
        }
    }
}

/// The partial-fields delta the transition engine produces. Fields left
/// `None` keep whatever the original task carries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub tags: Option<Vec<String>>,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
}
