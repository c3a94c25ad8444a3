use cclog_types::{AgentUsageInfo, Project, SessionInfo};
use chrono::{DateTime, Utc};

use super::{Painter, one_line};

const PROMPT_WIDTH: usize = 60;

fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn render_projects(projects: &[Project], painter: Painter) -> Vec<String> {
    if projects.is_empty() {
        return vec![painter.dim("No projects found")];
    }

    let mut lines = vec![painter.bold(&format!(
        "{:<24} {:>8}  {:<16}  {}",
        "PROJECT", "SESSIONS", "MODIFIED", "PATH"
    ))];
    lines.extend(projects.iter().map(|p| {
        format!(
            "{:<24} {:>8}  {:<16}  {}",
            p.name,
            p.session_count,
            format_time(p.last_modified),
            painter.dim(&p.path)
        )
    }));
    lines
}

pub fn render_sessions(sessions: &[SessionInfo], painter: Painter) -> Vec<String> {
    if sessions.is_empty() {
        return vec![painter.dim("No sessions found")];
    }

    let mut lines = Vec::new();
    for session in sessions {
        let mut header = format!(
            "{}  {}  {} msgs",
            painter.yellow(&session.session_id),
            format_time(session.start_time),
            session.message_count
        );
        if !session.git_branch.is_empty() {
            header.push_str(&format!("  [{}]", session.git_branch));
        }
        lines.push(header);

        if !session.first_user_message.is_empty() {
            lines.push(format!("  {}", one_line(&session.first_user_message, PROMPT_WIDTH)));
        }
        if !session.agent_types_used.is_empty() {
            lines.push(painter.dim(&format!("  agents: {}", session.agent_types_used.join(", "))));
        }
    }
    lines
}

pub fn render_agent_sessions(usages: &[AgentUsageInfo], painter: Painter) -> Vec<String> {
    if usages.is_empty() {
        return vec![painter.dim("No matching sessions found")];
    }

    let mut lines = Vec::new();
    for usage in usages {
        lines.push(format!(
            "{}  {}  {}  x{}",
            painter.yellow(&usage.session_id),
            usage.project,
            format_time(usage.timestamp),
            usage.usage_count
        ));
        lines.extend(
            usage
                .prompts
                .iter()
                .map(|prompt| format!("  - {}", one_line(prompt, PROMPT_WIDTH))),
        );
    }
    lines
}
