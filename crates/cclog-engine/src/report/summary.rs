use std::collections::{BTreeSet, HashSet};

use cclog_types::{ProcessedEntry, SessionSummary, SidechainStats, TokenStats, ToolCallStats};
use chrono::{DateTime, FixedOffset};

use super::SessionRef;

pub fn summarize(session: SessionRef<'_>, entries: &[ProcessedEntry]) -> SessionSummary {
    let mut user_messages = 0;
    let mut assistant_messages = 0;
    let mut error_count = 0;
    let mut tokens = TokenStats::default();
    let mut tool_calls = ToolCallStats::default();
    let mut tool_names = HashSet::new();
    let mut agents = BTreeSet::new();
    let mut span: Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> = None;

    for entry in entries {
        if entry.is_user() {
            user_messages += 1;
        } else if entry.is_assistant() {
            assistant_messages += 1;
        }

        tokens.total_input += entry.tokens.input_tokens;
        tokens.total_output += entry.tokens.output_tokens;
        tokens.cache_read += entry.tokens.cache_read_tokens;
        tokens.cache_creation += entry.tokens.cache_creation_tokens;

        for call in &entry.tool_calls {
            tool_calls.total += 1;
            tool_names.insert(call.name.as_str());
            if call.is_failed() {
                tool_calls.failed += 1;
            } else {
                tool_calls.success += 1;
            }
        }

        if entry.is_error {
            error_count += 1;
        }
        if entry.is_sidechain && !entry.agent_id.is_empty() {
            agents.insert(entry.agent_id.clone());
        }

        if let Ok(at) = DateTime::parse_from_rfc3339(&entry.raw_timestamp) {
            span = Some(match span {
                Some((min, max)) => (min.min(at), max.max(at)),
                None => (at, at),
            });
        }
    }
    tool_calls.unique_tools = tool_names.len();

    let (date, duration_minutes) = match span {
        Some((min, max)) => (
            min.format("%Y-%m-%d").to_string(),
            max.signed_duration_since(min).num_minutes(),
        ),
        None => (String::new(), 0),
    };

    SessionSummary {
        session_id: session.session_id.to_string(),
        agent_id: session.agent(),
        project: session.project.to_string(),
        date,
        duration_minutes,
        message_count: entries.len(),
        user_messages,
        assistant_messages,
        tokens,
        tool_calls,
        sidechains: SidechainStats {
            count: agents.len(),
            agent_types: agents.into_iter().collect(),
        },
        has_errors: error_count > 0,
        error_count,
    }
}
