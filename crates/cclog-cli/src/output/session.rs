use cclog_types::{LogsAroundEntry, SessionLogs, SessionToolCall, TokenStats, truncate};

use super::{Painter, one_line};

const CONTENT_WIDTH: usize = 400;
const TOOL_OUTPUT_WIDTH: usize = 120;

pub fn render_logs(logs: &SessionLogs, painter: Painter) -> Vec<String> {
    let mut lines = vec![painter.bold(&format!("Session {} ({})", logs.session_id, logs.project))];

    for entry in &logs.entries {
        let mut header = format!("[{}] {}", painter.dim(&entry.timestamp), painter.role(&entry.role));
        if entry.is_sidechain {
            header.push_str(&painter.yellow(&format!(" (agent {})", agent_label(&entry.agent_id))));
        }
        lines.push(header);

        if !entry.content.trim().is_empty() {
            lines.extend(
                truncate(entry.content.trim(), CONTENT_WIDTH)
                    .lines()
                    .map(|l| format!("  {}", l)),
            );
        }
        lines.extend(entry.tool_calls.iter().map(|call| tool_line(call, painter)));
    }

    if let Some(tokens) = &logs.token_stats {
        lines.push(String::new());
        lines.push(token_line(tokens));
    }
    lines
}

fn agent_label(agent_id: &str) -> &str {
    if agent_id.is_empty() { "?" } else { agent_id }
}

fn tool_line(call: &SessionToolCall, painter: Painter) -> String {
    let output = one_line(&call.output, TOOL_OUTPUT_WIDTH);
    if output.is_empty() {
        format!("  -> {}", painter.cyan(&call.name))
    } else {
        format!("  -> {}: {}", painter.cyan(&call.name), painter.dim(&output))
    }
}

pub(crate) fn token_line(tokens: &TokenStats) -> String {
    format!(
        "tokens: in {} / out {} / cache read {} / cache write {}",
        tokens.total_input, tokens.total_output, tokens.cache_read, tokens.cache_creation
    )
}

pub fn render_around(around: &LogsAroundEntry, painter: Painter) -> Vec<String> {
    let mut lines = vec![painter.bold(&format!(
        "Entry {} (#{} of {}) in {}",
        around.target_uuid, around.target_index, around.total_count, around.session_id
    ))];

    for log in &around.entries {
        let marker = if log.offset == 0 {
            painter.yellow(">>")
        } else {
            format!("{:+}", log.offset)
        };
        let mut header = format!("{:>3} [{}] {}", marker, painter.dim(&log.timestamp), painter.role(&log.role));
        if log.is_error {
            header.push_str(&painter.red(" error"));
        }
        lines.push(header);

        if !log.content.trim().is_empty() {
            lines.push(format!("    {}", one_line(&log.content, CONTENT_WIDTH)));
        }
        if !log.tool_name.is_empty() {
            lines.push(format!("    -> {}", painter.cyan(&log.tool_name)));
        }
    }
    lines
}
