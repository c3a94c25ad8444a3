//! Raw record fixtures.
//!
//! Records are rendered to JSONL lines exactly as Claude Code writes them and
//! parsed back through `RawRecord::from_line`, so tests exercise the real schema.

use cclog_types::RawRecord;
use serde_json::{Map, Value, json};

/// RFC 3339 timestamp `seconds` after 2025-01-15T10:00:00Z.
pub fn ts(seconds: u32) -> String {
    format!(
        "2025-01-15T{:02}:{:02}:{:02}Z",
        10 + seconds / 3600,
        (seconds / 60) % 60,
        seconds % 60
    )
}

/// Fluent builder for one session log record.
///
/// # Example
/// ```
/// use cclog_testing::RecordBuilder;
/// use serde_json::json;
///
/// let call = RecordBuilder::assistant("a1")
///     .parent("u1")
///     .tool_use("toolu_1", "Bash", json!({"command": "ls"}))
///     .build();
/// assert_eq!(call.uuid, "a1");
/// ```
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    uuid: String,
    parent: Option<String>,
    record_type: String,
    role: String,
    timestamp: String,
    sidechain: bool,
    agent_id: Option<String>,
    session_id: Option<String>,
    cwd: Option<String>,
    git_branch: Option<String>,
    blocks: Vec<Value>,
    plain_content: Option<String>,
    usage: Option<Value>,
    tool_use_result: Option<Value>,
    raw_message: Option<Value>,
}

impl RecordBuilder {
    fn new(uuid: &str, role: &str) -> Self {
        Self {
            uuid: uuid.to_string(),
            parent: None,
            record_type: role.to_string(),
            role: role.to_string(),
            timestamp: ts(0),
            sidechain: false,
            agent_id: None,
            session_id: None,
            cwd: None,
            git_branch: None,
            blocks: Vec::new(),
            plain_content: None,
            usage: None,
            tool_use_result: None,
            raw_message: None,
        }
    }

    pub fn user(uuid: &str) -> Self {
        Self::new(uuid, "user")
    }

    pub fn assistant(uuid: &str) -> Self {
        Self::new(uuid, "assistant")
    }

    /// A user record whose first content block answers `tool_use_id`.
    pub fn tool_result(uuid: &str, tool_use_id: &str, output: &str) -> Self {
        let mut builder = Self::new(uuid, "user");
        builder.blocks.push(json!({
            "type": "tool_result",
            "tool_use_id": tool_use_id,
            "content": output,
        }));
        builder
    }

    /// A session title record of type `summary`.
    pub fn summary(uuid: &str, title: &str) -> Self {
        let mut builder = Self::new(uuid, "user");
        builder.record_type = "summary".to_string();
        builder.raw_message = Some(json!({"summary": title}));
        builder
    }

    pub fn parent(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn timestamp(mut self, timestamp: &str) -> Self {
        self.timestamp = timestamp.to_string();
        self
    }

    /// Shorthand for `timestamp(&ts(seconds))`.
    pub fn at(self, seconds: u32) -> Self {
        let stamp = ts(seconds);
        self.timestamp(&stamp)
    }

    /// Mark the record as part of sub-agent `agent_id`'s sidechain.
    pub fn sidechain(mut self, agent_id: &str) -> Self {
        self.sidechain = true;
        self.agent_id = Some(agent_id.to_string());
        self
    }

    /// Sidechain flag without an agent id (older log format).
    pub fn sidechain_without_agent(mut self) -> Self {
        self.sidechain = true;
        self.agent_id = None;
        self
    }

    pub fn session(mut self, session_id: &str) -> Self {
        self.session_id = Some(session_id.to_string());
        self
    }

    pub fn cwd(mut self, cwd: &str) -> Self {
        self.cwd = Some(cwd.to_string());
        self
    }

    pub fn git_branch(mut self, branch: &str) -> Self {
        self.git_branch = Some(branch.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.blocks.push(json!({"type": "text", "text": text}));
        self
    }

    /// Content as a bare string instead of a block list.
    pub fn plain(mut self, text: &str) -> Self {
        self.plain_content = Some(text.to_string());
        self
    }

    pub fn thinking(mut self, thinking: &str) -> Self {
        self.blocks
            .push(json!({"type": "thinking", "thinking": thinking}));
        self
    }

    pub fn tool_use(mut self, id: &str, name: &str, input: Value) -> Self {
        self.blocks.push(json!({
            "type": "tool_use",
            "id": id,
            "name": name,
            "input": input,
        }));
        self
    }

    /// Task call spawning a sub-agent with the given prompt.
    pub fn task(self, id: &str, prompt: &str, subagent_type: &str) -> Self {
        self.tool_use(
            id,
            "Task",
            json!({"description": "delegate", "prompt": prompt, "subagent_type": subagent_type}),
        )
    }

    /// Flag the first tool_result block as an error.
    pub fn error(mut self) -> Self {
        if let Some(block) = self.first_result_block() {
            block.insert("is_error".to_string(), Value::Bool(true));
        }
        self
    }

    /// Agent id on the tool_result block itself.
    pub fn result_block_agent(mut self, agent_id: &str) -> Self {
        if let Some(block) = self.first_result_block() {
            block.insert("agentId".to_string(), Value::String(agent_id.to_string()));
        }
        self
    }

    /// `toolUseResult` metadata as written for completed Task calls.
    pub fn result_agent(mut self, agent_id: &str) -> Self {
        self.tool_use_result = Some(json!({"status": "completed", "agentId": agent_id}));
        self
    }

    pub fn usage(mut self, input: u64, output: u64, cache_read: u64, cache_creation: u64) -> Self {
        self.usage = Some(json!({
            "input_tokens": input,
            "output_tokens": output,
            "cache_read_input_tokens": cache_read,
            "cache_creation_input_tokens": cache_creation,
        }));
        self
    }

    /// Replace the whole `message` payload, e.g. with something that is not an object.
    pub fn raw_message(mut self, message: Value) -> Self {
        self.raw_message = Some(message);
        self
    }

    fn first_result_block(&mut self) -> Option<&mut Map<String, Value>> {
        self.blocks
            .iter_mut()
            .find(|b| b["type"] == "tool_result")
            .and_then(Value::as_object_mut)
    }

    fn message(&self) -> Value {
        if let Some(raw) = &self.raw_message {
            return raw.clone();
        }

        let content = match &self.plain_content {
            Some(text) => Value::String(text.clone()),
            None => Value::Array(self.blocks.clone()),
        };
        let mut message = json!({"role": self.role, "content": content});
        if let Some(usage) = &self.usage {
            message["usage"] = usage.clone();
        }
        message
    }

    /// Render as one JSONL line.
    pub fn to_line(&self) -> String {
        let mut record = json!({
            "uuid": self.uuid,
            "parentUuid": self.parent,
            "isSidechain": self.sidechain,
            "type": self.record_type,
            "message": self.message(),
            "timestamp": self.timestamp,
        });

        let optional = [
            ("agentId", &self.agent_id),
            ("sessionId", &self.session_id),
            ("cwd", &self.cwd),
            ("gitBranch", &self.git_branch),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                record[key] = Value::String(value.clone());
            }
        }
        if let Some(result) = &self.tool_use_result {
            record["toolUseResult"] = result.clone();
        }

        record.to_string()
    }

    pub fn build(&self) -> RawRecord {
        RawRecord::from_line(&self.to_line()).expect("fixture record must parse")
    }
}

/// Build every record in order.
pub fn build_all(builders: &[RecordBuilder]) -> Vec<RawRecord> {
    builders.iter().map(RecordBuilder::build).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ts() {
        assert_eq!(ts(0), "2025-01-15T10:00:00Z");
        assert_eq!(ts(75), "2025-01-15T10:01:15Z");
        assert_eq!(ts(3600), "2025-01-15T11:00:00Z");
    }

    #[test]
    fn test_tool_result_record() {
        let record = RecordBuilder::tool_result("r1", "toolu_1", "done")
            .parent("a1")
            .error()
            .result_agent("be466c0a")
            .build();

        assert_eq!(record.parent_uuid.as_deref(), Some("a1"));
        assert_eq!(record.tool_use_result.agent_id.as_deref(), Some("be466c0a"));
        assert_eq!(record.message["content"][0]["is_error"], true);
        assert!(record.raw_len > 0);
    }

    #[test]
    fn test_sidechain_record() {
        let record = RecordBuilder::user("s1").sidechain("agent-a").plain("hi").build();
        assert!(record.is_sidechain);
        assert_eq!(record.agent_id(), "agent-a");
        assert_eq!(record.message["content"], "hi");
    }
}
