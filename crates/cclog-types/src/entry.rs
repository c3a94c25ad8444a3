use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{ROLE_ASSISTANT, ROLE_USER, TASK_TOOL_NAME};

/// Token usage recorded for (or estimated from) a single entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetrics {
    /// Output tokens for assistant entries, estimated size for everything else
    pub token_count: u64,
    /// input + cache_read + cache_creation
    pub total_tokens: u64,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cache_read_tokens: u64,
    pub cache_creation_tokens: u64,
}

impl TokenMetrics {
    pub fn context_total(&self) -> u64 {
        self.input_tokens + self.cache_read_tokens + self.cache_creation_tokens
    }
}

/// Local slash-command data (`<command-name>` records and their captured stdout).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInfo {
    pub is_command_message: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub command_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub command_args: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub command_output: String,
}

/// A raw record enriched with hierarchy, pairing and accounting data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessedEntry {
    pub uuid: String,
    /// Empty for roots; may reference a uuid absent from the batch
    pub parent_uuid: String,
    pub entry_type: String,
    /// Display form (`HH:MM:SS`), or the raw string when it does not parse
    pub timestamp: String,
    pub raw_timestamp: String,
    pub role: String,
    pub content: String,
    pub agent_id: String,

    pub children: Vec<ProcessedEntry>,
    pub depth: usize,

    pub tool_calls: Vec<ToolCall>,
    pub is_tool_result: bool,
    /// Correlation id of the tool call this entry answers
    pub tool_result_id: String,
    /// Sub-agent reported by a Task result (`agentId` on the block or `toolUseResult`)
    pub result_agent_id: String,

    #[serde(flatten)]
    pub tokens: TokenMetrics,
    #[serde(flatten)]
    pub command: CommandInfo,

    pub is_sidechain: bool,
    pub is_error: bool,
    pub is_caveat: bool,
}

impl ProcessedEntry {
    pub fn is_user(&self) -> bool {
        self.role == ROLE_USER
    }

    pub fn is_assistant(&self) -> bool {
        self.role == ROLE_ASSISTANT
    }

    /// Number of entries in this subtree, counting task entries and results.
    pub fn subtree_len(&self) -> usize {
        let nested: usize = self
            .tool_calls
            .iter()
            .map(|tc| {
                tc.result.as_ref().map_or(0, |r| r.subtree_len())
                    + tc.task_entries.iter().map(ProcessedEntry::subtree_len).sum::<usize>()
            })
            .sum();
        let children: usize = self.children.iter().map(ProcessedEntry::subtree_len).sum();
        1 + nested + children
    }
}

/// A tool invocation embedded in an assistant entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub input: Value,
    pub result: Option<Box<ProcessedEntry>>,
    /// Reconciled sidechain forest, only ever populated for Task calls
    pub task_entries: Vec<ProcessedEntry>,
    pub has_missing_result: bool,
    pub has_missing_sidechain: bool,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, input: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
            ..Default::default()
        }
    }

    pub fn is_task(&self) -> bool {
        self.name == TASK_TOOL_NAME
    }

    pub fn prompt(&self) -> Option<&str> {
        self.input.get("prompt").and_then(Value::as_str)
    }

    pub fn subagent_type(&self) -> Option<&str> {
        self.input.get("subagent_type").and_then(Value::as_str)
    }

    pub fn is_failed(&self) -> bool {
        self.result.as_ref().is_some_and(|r| r.is_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_accessors() {
        let call = ToolCall::new(
            "toolu_1",
            "Task",
            json!({"prompt": "Find the bug", "subagent_type": "Explore"}),
        );
        assert!(call.is_task());
        assert_eq!(call.prompt(), Some("Find the bug"));
        assert_eq!(call.subagent_type(), Some("Explore"));
        assert!(!call.is_failed());

        let bash = ToolCall::new("toolu_2", "Bash", json!({"command": "ls"}));
        assert!(!bash.is_task());
        assert_eq!(bash.prompt(), None);
    }

    #[test]
    fn test_failed_requires_error_result() {
        let mut call = ToolCall::new("toolu_1", "Bash", Value::Null);
        call.result = Some(Box::new(ProcessedEntry {
            is_error: true,
            ..Default::default()
        }));
        assert!(call.is_failed());
    }

    #[test]
    fn test_subtree_len() {
        let mut call = ToolCall::new("toolu_1", "Task", Value::Null);
        call.result = Some(Box::default());
        call.task_entries = vec![ProcessedEntry {
            children: vec![ProcessedEntry::default()],
            ..Default::default()
        }];
        let entry = ProcessedEntry {
            tool_calls: vec![call],
            ..Default::default()
        };
        assert_eq!(entry.subtree_len(), 4);
    }

    #[test]
    fn test_flattened_serialization() {
        let entry = ProcessedEntry {
            uuid: "u1".to_string(),
            tokens: TokenMetrics {
                input_tokens: 3,
                ..Default::default()
            },
            ..Default::default()
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["input_tokens"], 3);
        assert_eq!(value["is_command_message"], false);
        assert!(value.get("command_name").is_none());
    }
}
