use std::sync::LazyLock;

use cclog_types::{
    CAVEAT_PREFIX, ContentBlock, Message, ProcessedEntry, RawRecord, TAG_COMMAND_ARGS,
    TAG_COMMAND_CAVEAT, TAG_COMMAND_NAME, ToolCall, estimate_tokens, tool_result_text,
};
use chrono::DateTime;
use regex::Regex;
use tracing::debug;

static COMMAND_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| tag_regex(TAG_COMMAND_NAME));
static COMMAND_ARGS_REGEX: LazyLock<Regex> = LazyLock::new(|| tag_regex(TAG_COMMAND_ARGS));

/// Trimmed contents of the first `<tag>...</tag>`, spanning newlines.
fn tag_regex(tag: &str) -> Regex {
    let tag = regex::escape(tag);
    Regex::new(&format!(r"(?s)<{tag}>\s*(.*?)\s*</{tag}>")).unwrap()
}

/// Convert one raw record into a processed entry.
///
/// Never fails: an unparsable payload yields an entry with empty content and a
/// token count estimated from the record's serialized length.
pub fn transform_record(record: &RawRecord) -> ProcessedEntry {
    let mut entry = ProcessedEntry {
        uuid: record.uuid.clone(),
        parent_uuid: record.parent_uuid.clone().unwrap_or_default(),
        entry_type: record.record_type.clone(),
        timestamp: format_timestamp(&record.timestamp),
        raw_timestamp: record.timestamp.clone(),
        agent_id: record.agent_id().to_string(),
        is_sidechain: record.is_sidechain,
        ..Default::default()
    };

    match Message::parse(&record.message) {
        Ok(message) => apply_message(&mut entry, &message, record),
        Err(err) => {
            debug!(uuid = %record.uuid, error = %err, "message payload did not parse, estimating tokens");
            entry.tokens.token_count = estimate_tokens(record.serialized_len()).max(1);
        }
    }

    entry
}

fn apply_message(entry: &mut ProcessedEntry, message: &Message, record: &RawRecord) {
    entry.role = if message.role.is_empty() {
        record.record_type.clone()
    } else {
        message.role.clone()
    };

    let mut parts: Vec<String> = Vec::new();
    for (position, block) in message.content.iter().enumerate() {
        match block {
            ContentBlock::Text { text } => parts.push(text.clone()),
            ContentBlock::ToolUse { id, name, input } => {
                entry
                    .tool_calls
                    .push(ToolCall::new(id.clone(), name.clone(), input.clone()));
            }
            ContentBlock::ToolResult {
                tool_use_id,
                content,
                is_error,
                agent_id,
            } => {
                // Only a leading tool_result makes the whole entry a result carrier
                if position == 0 {
                    entry.is_tool_result = true;
                    entry.tool_result_id = tool_use_id.clone();
                    entry.is_error = *is_error;
                    entry.result_agent_id = agent_id
                        .clone()
                        .or_else(|| record.tool_use_result.agent_id.clone())
                        .unwrap_or_default();
                }
                parts.push(tool_result_text(content));
            }
            ContentBlock::Thinking { .. } | ContentBlock::Image { .. } | ContentBlock::Unknown => {}
        }
    }
    entry.content = parts.join("\n");

    apply_command_info(entry);
    apply_usage(entry, message);
}

fn apply_command_info(entry: &mut ProcessedEntry) {
    let content = entry.content.as_str();

    if content.contains(&format!("<{}>", TAG_COMMAND_NAME)) {
        entry.command.is_command_message = true;
        if let Some(caps) = COMMAND_NAME_REGEX.captures(content) {
            entry.command.command_name = caps[1].to_string();
        }
        if let Some(caps) = COMMAND_ARGS_REGEX.captures(content) {
            entry.command.command_args = caps[1].to_string();
        }
    }

    entry.is_caveat = content.contains(&format!("<{}>", TAG_COMMAND_CAVEAT))
        || content.trim_start().starts_with(CAVEAT_PREFIX);
}

fn apply_usage(entry: &mut ProcessedEntry, message: &Message) {
    if let Some(usage) = &message.usage {
        entry.tokens.input_tokens = usage.input_tokens.unwrap_or(0);
        entry.tokens.output_tokens = usage.output_tokens.unwrap_or(0);
        entry.tokens.cache_read_tokens = usage.cache_read_input_tokens.unwrap_or(0);
        entry.tokens.cache_creation_tokens = usage.cache_creation_input_tokens.unwrap_or(0);
    }

    entry.tokens.token_count = if entry.is_assistant() {
        entry.tokens.output_tokens
    } else {
        estimate_tokens(entry.content.chars().count())
    };
}

/// `HH:MM:SS` in the timestamp's own offset, or the input unchanged when it is not RFC 3339.
pub fn format_timestamp(ts: &str) -> String {
    DateTime::parse_from_rfc3339(ts)
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|_| ts.to_string())
}
