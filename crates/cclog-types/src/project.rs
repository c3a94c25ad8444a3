use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A directory under `<claude_dir>/projects`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Last component of the decoded path
    pub name: String,
    /// Decoded working directory, e.g. `/Users/me/code/app`
    pub path: String,
    /// Directory name as stored on disk, e.g. `-Users-me-code-app`
    pub encoded_path: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub session_count: usize,
    pub last_modified: Option<DateTime<Utc>>,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

/// Metadata about one main session file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_id: String,
    pub project: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub message_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub agent_types_used: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub first_user_message: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cwd: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub git_branch: String,
    #[serde(skip)]
    pub file_path: PathBuf,
}

/// A session in which a given sub-agent type was spawned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentUsageInfo {
    pub session_id: String,
    pub project: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub usage_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prompts: Vec<String>,
}
