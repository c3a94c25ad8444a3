use serde::{Deserialize, Serialize};
use serde_json::Value;

// NOTE: Schema Design
//
// A RawRecord is one line of a Claude Code session log. Only the envelope is
// typed here; `message` stays an untyped Value until the engine parses it into
// `Message`, because a malformed payload must still yield an entry (content
// empty, tokens estimated) instead of failing the whole line.

/// One JSONL record as written by Claude Code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub parent_uuid: Option<String>,
    #[serde(default)]
    pub is_sidechain: bool,
    #[serde(default, rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub message: Value,
    #[serde(default)]
    pub timestamp: String,
    /// Sub-agent owning this record; absent for main-session records
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub cwd: Option<String>,
    #[serde(default)]
    pub git_branch: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub is_meta: bool,
    /// Tool execution metadata (contains agentId for sidechain linking)
    #[serde(
        default,
        deserialize_with = "deserialize_tool_use_result",
        skip_serializing_if = "ToolUseResult::is_empty"
    )]
    pub tool_use_result: ToolUseResult,
    /// Length of the source line, used to estimate tokens for unparsable payloads
    #[serde(skip)]
    pub raw_len: usize,
}

impl RawRecord {
    /// Parse a single JSONL line, remembering its length.
    pub fn from_line(line: &str) -> crate::Result<Self> {
        let mut record: RawRecord = serde_json::from_str(line)?;
        record.raw_len = line.len();
        Ok(record)
    }

    pub fn is_summary(&self) -> bool {
        self.record_type == crate::ENTRY_TYPE_SUMMARY
    }

    pub fn agent_id(&self) -> &str {
        self.agent_id.as_deref().unwrap_or("")
    }

    /// Serialized size of the record: the source line when known, otherwise a re-encoding.
    pub fn serialized_len(&self) -> usize {
        if self.raw_len > 0 {
            return self.raw_len;
        }
        serde_json::to_string(self).map(|s| s.len()).unwrap_or(0)
    }
}

/// Subagent execution result metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolUseResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Agent ID linking this tool result to its sidechain (e.g., "be466c0a")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
}

impl ToolUseResult {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.prompt.is_none() && self.agent_id.is_none()
    }
}

/// `toolUseResult` is an object for most tools but a bare string for errors
/// and an array for some MCP tools; anything that is not an object is empty.
fn deserialize_tool_use_result<'de, D>(deserializer: D) -> Result<ToolUseResult, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Object(map) = value else {
        return Ok(ToolUseResult::default());
    };

    let field = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);

    Ok(ToolUseResult {
        status: field("status"),
        prompt: field("prompt"),
        agent_id: field("agentId"),
    })
}

/// Parsed `message` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub role: String,
    #[serde(default, deserialize_with = "deserialize_content")]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl Message {
    /// Parse an untyped payload. Null or non-object payloads are rejected.
    pub fn parse(value: &Value) -> crate::Result<Self> {
        if !value.is_object() {
            let err = <serde_json::Error as serde::de::Error>::custom("message payload is not an object");
            return Err(err.into());
        }
        Ok(Message::deserialize(value)?)
    }
}

fn deserialize_content<'de, D>(deserializer: D) -> Result<Vec<ContentBlock>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrArray {
        String(String),
        Array(Vec<ContentBlock>),
    }

    match Option::<StringOrArray>::deserialize(deserializer)? {
        Some(StringOrArray::String(s)) => Ok(vec![ContentBlock::Text { text: s }]),
        Some(StringOrArray::Array(arr)) => Ok(arr),
        None => Ok(Vec::new()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        #[serde(default)]
        text: String,
    },
    Thinking {
        #[serde(default)]
        thinking: String,
    },
    ToolUse {
        id: String,
        name: String,
        #[serde(default)]
        input: Value,
    },
    ToolResult {
        tool_use_id: String,
        #[serde(default)]
        content: Value,
        #[serde(default)]
        is_error: bool,
        /// Agent ID for subagent execution (e.g., "ba2ed465")
        #[serde(default, rename = "agentId")]
        agent_id: Option<String>,
    },
    Image {
        #[serde(default)]
        source: Value,
    },
    #[serde(other)]
    Unknown,
}

/// Flatten a tool_result `content` value (string or list of text blocks) to text.
pub fn tool_result_text(content: &Value) -> String {
    match content {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: Option<u64>,
    #[serde(default)]
    pub output_tokens: Option<u64>,
    #[serde(default)]
    pub cache_creation_input_tokens: Option<u64>,
    #[serde(default)]
    pub cache_read_input_tokens: Option<u64>,
}
