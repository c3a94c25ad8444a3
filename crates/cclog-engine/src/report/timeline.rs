use cclog_types::{
    ProcessedEntry, SessionTimeline, TOOL_SUMMARY_KEYS, TimelineEntry, ToolCall, truncate,
};
use serde_json::Value;

use super::{SessionRef, sidechain_label};

const SUMMARY_LIMIT: usize = 150;

/// Condensed step list: one item per tool call, or one per message for
/// entries without calls. Steps are numbered from 1 in output order.
pub fn timeline(session: SessionRef<'_>, entries: &[ProcessedEntry], limit: usize) -> SessionTimeline {
    let mut items: Vec<TimelineEntry> = Vec::new();

    for entry in entries {
        if entry.tool_calls.is_empty() {
            items.push(TimelineEntry {
                step: items.len() + 1,
                timestamp: entry.timestamp.clone(),
                role: entry.role.clone(),
                item_type: "message".to_string(),
                tool: String::new(),
                tool_use_id: String::new(),
                summary: truncate(&entry.content, SUMMARY_LIMIT),
                status: String::new(),
                tokens: entry.tokens.output_tokens,
                sidechain: sidechain_label(entry),
            });
        }

        for call in &entry.tool_calls {
            items.push(TimelineEntry {
                step: items.len() + 1,
                timestamp: entry.timestamp.clone(),
                role: entry.role.clone(),
                item_type: "tool_call".to_string(),
                tool: call.name.clone(),
                tool_use_id: call.id.clone(),
                summary: truncate(tool_summary(call), SUMMARY_LIMIT),
                status: call_status(call).to_string(),
                tokens: entry.tokens.output_tokens,
                sidechain: sidechain_label(entry),
            });
        }

        if limit > 0 && items.len() >= limit {
            break;
        }
    }

    if limit > 0 {
        items.truncate(limit);
    }

    SessionTimeline {
        session_id: session.session_id.to_string(),
        agent_id: session.agent(),
        total_entries: entries.len(),
        returned_entries: items.len(),
        timeline: items,
    }
}

/// First well-known string argument of the call, else its name.
fn tool_summary(call: &ToolCall) -> &str {
    match &call.input {
        Value::Object(map) => TOOL_SUMMARY_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .unwrap_or(call.name.as_str()),
        Value::String(s) => s.as_str(),
        _ => call.name.as_str(),
    }
}

fn call_status(call: &ToolCall) -> &'static str {
    match &call.result {
        Some(result) if result.is_error => "failed",
        Some(_) => "success",
        None => "",
    }
}
