use cclog_types::{ProcessedEntry, SessionLogEntry, SessionLogs, SessionToolCall, TokenStats};

use super::SessionRef;

/// Flatten the top level into log entries with summed token usage.
pub fn session_logs(session: SessionRef<'_>, entries: &[ProcessedEntry]) -> SessionLogs {
    let mut tokens = TokenStats::default();

    let log_entries = entries
        .iter()
        .map(|entry| {
            tokens.total_input += entry.tokens.input_tokens;
            tokens.total_output += entry.tokens.output_tokens;
            tokens.cache_read += entry.tokens.cache_read_tokens;
            tokens.cache_creation += entry.tokens.cache_creation_tokens;

            SessionLogEntry {
                uuid: entry.uuid.clone(),
                timestamp: entry.timestamp.clone(),
                role: entry.role.clone(),
                content: entry.content.clone(),
                is_sidechain: entry.is_sidechain,
                agent_id: entry.agent_id.clone(),
                tool_calls: entry
                    .tool_calls
                    .iter()
                    .map(|tc| SessionToolCall {
                        name: tc.name.clone(),
                        input: tc.input.clone(),
                        output: tc
                            .result
                            .as_ref()
                            .map(|r| r.content.clone())
                            .unwrap_or_default(),
                    })
                    .collect(),
            }
        })
        .collect();

    SessionLogs {
        session_id: session.session_id.to_string(),
        project: session.project.to_string(),
        entries: log_entries,
        token_stats: Some(tokens),
    }
}
