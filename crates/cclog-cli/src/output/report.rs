use cclog_types::{
    SessionErrors, SessionStats, SessionSummary, SessionTimeline, TimelineEntry, ToolUsageStats,
};

use super::session::token_line;
use super::{Painter, one_line};

const MESSAGE_WIDTH: usize = 160;

fn session_title(label: &str, session_id: &str, agent_id: Option<&str>) -> String {
    match agent_id {
        Some(agent) => format!("{} {} (agent {})", label, session_id, agent),
        None => format!("{} {}", label, session_id),
    }
}

pub fn render_summary(summary: &SessionSummary, painter: Painter) -> Vec<String> {
    let mut lines = vec![
        painter.bold(&session_title("Session", &summary.session_id, summary.agent_id.as_deref())),
        format!("project:   {}", summary.project),
        format!("date:      {} ({} min)", summary.date, summary.duration_minutes),
        format!(
            "messages:  {} ({} user, {} assistant)",
            summary.message_count, summary.user_messages, summary.assistant_messages
        ),
        token_line(&summary.tokens),
        format!(
            "tools:     {} calls, {} unique, {} ok, {} failed",
            summary.tool_calls.total,
            summary.tool_calls.unique_tools,
            summary.tool_calls.success,
            summary.tool_calls.failed
        ),
    ];

    if summary.sidechains.count > 0 {
        lines.push(format!(
            "agents:    {} ({})",
            summary.sidechains.count,
            summary.sidechains.agent_types.join(", ")
        ));
    }
    if summary.has_errors {
        lines.push(painter.red(&format!("errors:    {}", summary.error_count)));
    }
    lines
}

pub fn render_tools(stats: &ToolUsageStats, painter: Painter) -> Vec<String> {
    if stats.tools.is_empty() {
        return vec![painter.dim("No tool calls")];
    }

    let mut lines = vec![painter.bold(&format!(
        "{:<20} {:>6} {:>6} {:>6}",
        "TOOL", "CALLS", "OK", "FAILED"
    ))];
    for tool in &stats.tools {
        let failed = format!("{:>6}", tool.failed);
        lines.push(format!(
            "{:<20} {:>6} {:>6} {}",
            tool.name,
            tool.count,
            tool.success,
            if tool.failed > 0 { painter.red(&failed) } else { failed }
        ));
    }

    let patterns = &stats.patterns;
    lines.push(String::new());
    lines.push(format!("most used:   {}", patterns.most_used));
    if !patterns.most_failed.is_empty() {
        lines.push(format!("most failed: {}", patterns.most_failed));
    }
    lines.push(format!("first/last:  {} / {}", patterns.first_tool, patterns.last_tool));
    lines
}

pub fn render_errors(errors: &SessionErrors, painter: Painter) -> Vec<String> {
    let mut lines = vec![painter.bold(&format!(
        "{} error(s): {} tool, {} console, {} validation",
        errors.total_errors,
        errors.categories.tool_error,
        errors.categories.console_error,
        errors.categories.validation_error
    ))];

    for error in &errors.errors {
        let mut header = format!(
            "#{} [{}] {}",
            error.entry_index,
            painter.dim(&error.timestamp),
            painter.red(&error.error_type)
        );
        if !error.tool_name.is_empty() {
            header.push_str(&format!(" {}", painter.cyan(&error.tool_name)));
        }
        if !error.sidechain.is_empty() {
            header.push_str(&painter.yellow(&format!(" ({})", error.sidechain)));
        }
        lines.push(header);
        lines.push(format!("  {}", one_line(&error.message, MESSAGE_WIDTH)));
    }

    if errors.errors.len() < errors.total_errors {
        lines.push(painter.dim(&format!(
            "... {} more (raise --limit)",
            errors.total_errors - errors.errors.len()
        )));
    }
    lines
}

fn timeline_line(item: &TimelineEntry, painter: Painter) -> String {
    let what = if item.tool.is_empty() {
        painter.role(&item.role)
    } else {
        painter.cyan(&item.tool)
    };
    let status = match item.status.as_str() {
        "failed" => painter.red(" FAILED"),
        _ => String::new(),
    };
    let agent = if item.sidechain.is_empty() {
        String::new()
    } else {
        painter.yellow(&format!(" ({})", item.sidechain))
    };
    format!(
        "{:>4}. [{}] {}{}{}: {}",
        item.step,
        painter.dim(&item.timestamp),
        what,
        agent,
        status,
        one_line(&item.summary, MESSAGE_WIDTH)
    )
}

pub fn render_timeline(timeline: &SessionTimeline, painter: Painter) -> Vec<String> {
    let mut lines = vec![painter.bold(&format!(
        "{} ({} of {} steps)",
        session_title("Timeline", &timeline.session_id, timeline.agent_id.as_deref()),
        timeline.returned_entries,
        timeline.total_entries
    ))];
    lines.extend(timeline.timeline.iter().map(|item| timeline_line(item, painter)));
    lines
}

pub fn render_stats(stats: &SessionStats, painter: Painter) -> Vec<String> {
    let mut lines = render_summary(&stats.summary, painter);
    lines.push(String::new());
    lines.extend(render_tools(&stats.tool_stats, painter));
    lines.push(String::new());
    lines.extend(render_errors(&stats.errors, painter));
    lines.push(painter.dim(&format!("generated at {}", stats.generated_at)));
    lines
}
