use serde::{Deserialize, Serialize};
use serde_json::Value;

// NOTE: Report models
//
// These are read-only views computed from the reconciled forest. Field names
// are the snake_case JSON names consumers of `--format json` rely on, so
// renames here are breaking changes.

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenStats {
    pub total_input: u64,
    pub total_output: u64,
    pub cache_read: u64,
    pub cache_creation: u64,
}

// ==========================================
// Logs
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionLogs {
    pub session_id: String,
    pub project: String,
    pub entries: Vec<SessionLogEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_stats: Option<TokenStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionLogEntry {
    pub uuid: String,
    pub timestamp: String,
    pub role: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_sidechain: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub agent_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<SessionToolCall>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionToolCall {
    pub name: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub input: Value,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub output: String,
}

// ==========================================
// Summary
// ==========================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallStats {
    pub total: usize,
    pub unique_tools: usize,
    pub success: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidechainStats {
    pub count: usize,
    /// Sorted agent ids of the sidechains present in the session
    pub agent_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub agent_id: Option<String>,
    pub project: String,
    /// `YYYY-MM-DD` of the earliest timestamp, empty when none parse
    pub date: String,
    pub duration_minutes: i64,
    pub message_count: usize,
    pub user_messages: usize,
    pub assistant_messages: usize,
    pub tokens: TokenStats,
    pub tool_calls: ToolCallStats,
    pub sidechains: SidechainStats,
    pub has_errors: bool,
    pub error_count: usize,
}

// ==========================================
// Tool usage
// ==========================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolUsageStat {
    pub name: String,
    pub count: usize,
    pub success: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolPatterns {
    pub most_used: String,
    pub most_failed: String,
    pub first_tool: String,
    pub last_tool: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSequenceEntry {
    pub name: String,
    pub tool_use_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolUsageStats {
    pub session_id: String,
    pub agent_id: Option<String>,
    pub tools: Vec<ToolUsageStat>,
    pub tool_sequence: Vec<ToolSequenceEntry>,
    pub patterns: ToolPatterns,
}

// ==========================================
// Errors
// ==========================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionError {
    /// Entry carrying the error (the calling entry for tool errors)
    pub uuid: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub error_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tool_name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sidechain: String,
    pub entry_index: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCategories {
    pub tool_error: usize,
    pub console_error: usize,
    pub validation_error: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionErrors {
    pub session_id: String,
    pub agent_id: Option<String>,
    /// Count before the limit is applied
    pub total_errors: usize,
    pub errors: Vec<SessionError>,
    pub categories: ErrorCategories,
}

// ==========================================
// Timeline
// ==========================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub step: usize,
    pub timestamp: String,
    pub role: String,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tool: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tool_use_id: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub tokens: u64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sidechain: String,
}

fn is_zero(n: &u64) -> bool {
    *n == 0
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTimeline {
    pub session_id: String,
    pub agent_id: Option<String>,
    pub total_entries: usize,
    pub returned_entries: usize,
    pub timeline: Vec<TimelineEntry>,
}

// ==========================================
// Context around an entry
// ==========================================

/// An entry near a target, positioned relative to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextLog {
    pub offset: i64,
    pub timestamp: String,
    pub role: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tool_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tool_use_id: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub tool_input: Value,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tool_output: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_tool_result: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogsAroundEntry {
    pub session_id: String,
    pub project: String,
    pub target_uuid: String,
    pub target_index: usize,
    /// Effective offset (0 is replaced by the default of -3)
    pub offset: i64,
    pub entries: Vec<ContextLog>,
    pub total_count: usize,
}

// ==========================================
// Aggregated stats
// ==========================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub session_id: String,
    pub agent_id: Option<String>,
    pub project: String,
    pub generated_at: String,
    pub summary: SessionSummary,
    pub tool_stats: ToolUsageStats,
    pub errors: SessionErrors,
}
