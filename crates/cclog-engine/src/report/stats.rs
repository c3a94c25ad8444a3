use cclog_types::{ProcessedEntry, SessionStats};

use super::{SessionRef, collect_errors, summarize, tool_usage};

/// Summary, tool usage and errors in one report.
pub fn session_stats(
    session: SessionRef<'_>,
    entries: &[ProcessedEntry],
    errors_limit: usize,
    generated_at: &str,
) -> SessionStats {
    SessionStats {
        session_id: session.session_id.to_string(),
        agent_id: session.agent(),
        project: session.project.to_string(),
        generated_at: generated_at.to_string(),
        summary: summarize(session, entries),
        tool_stats: tool_usage(session, entries),
        errors: collect_errors(session, entries, errors_limit),
    }
}
