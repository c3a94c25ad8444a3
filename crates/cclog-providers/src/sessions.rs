use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use cclog_types::{
    AgentUsageInfo, ContentBlock, Message, Project, ROLE_USER, RawRecord, SessionInfo, ToolCall,
    truncate,
};
use chrono::{DateTime, Duration, Utc};
use tracing::debug;
use uuid::Uuid;
use walkdir::WalkDir;

use crate::discovery::ClaudeDir;
use crate::jsonl::read_session_records;
use crate::Result;

const FIRST_MESSAGE_LIMIT: usize = 200;
/// Sessions inspected per project when searching every project
const PER_PROJECT_SCAN_LIMIT: usize = 50;

/// Session id of a main session file (`<uuid>.jsonl`), if `path` is one.
pub fn is_session_file(path: &Path) -> Option<String> {
    if path.extension().is_none_or(|e| e != "jsonl") {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let id = Uuid::try_parse(stem).ok()?;
    // Only the canonical lowercase hyphenated form is a session file
    (id.hyphenated().to_string() == stem).then(|| stem.to_string())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListSessionsOptions {
    /// Only files modified within this many days; 0 disables the cutoff
    pub days: u32,
    pub include_agent_types: bool,
    /// 0 means unlimited
    pub limit: usize,
}

/// Main sessions of one project, newest start time first.
pub fn list_sessions(
    claude: &ClaudeDir,
    project: &Project,
    options: ListSessionsOptions,
) -> Result<Vec<SessionInfo>> {
    let project_dir = claude.project_dir(project);
    let cutoff = modified_since(options.days);

    let mut sessions = Vec::new();
    for entry in WalkDir::new(&project_dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(session_id) = is_session_file(entry.path()) else {
            continue;
        };

        if let Some(cutoff) = cutoff {
            let modified = entry
                .metadata()
                .ok()
                .and_then(|m| m.modified().ok())
                .map(DateTime::<Utc>::from);
            if modified.is_none_or(|m| m < cutoff) {
                continue;
            }
        }

        match session_info(entry.path(), &session_id, &project.name, options.include_agent_types) {
            Ok(Some(info)) => sessions.push(info),
            Ok(None) => {}
            Err(err) => debug!(path = %entry.path().display(), error = %err, "skipping unreadable session"),
        }
    }

    sessions.sort_by(|a, b| b.start_time.cmp(&a.start_time));
    if options.limit > 0 {
        sessions.truncate(options.limit);
    }
    Ok(sessions)
}

/// Oldest modification time kept for a `days` window; `None` when the window
/// is disabled or reaches past the representable range.
fn modified_since(days: u32) -> Option<DateTime<Utc>> {
    if days == 0 {
        return None;
    }
    Duration::try_days(i64::from(days)).and_then(|window| Utc::now().checked_sub_signed(window))
}

/// Metadata of one session file, `None` when it holds no records.
pub fn session_info(
    path: &Path,
    session_id: &str,
    project: &str,
    include_agent_types: bool,
) -> Result<Option<SessionInfo>> {
    let records = read_session_records(path)?;
    if records.is_empty() {
        return Ok(None);
    }

    let mut info = SessionInfo {
        session_id: session_id.to_string(),
        project: project.to_string(),
        start_time: None,
        end_time: None,
        message_count: records.len(),
        agent_types_used: Vec::new(),
        first_user_message: String::new(),
        cwd: String::new(),
        git_branch: String::new(),
        file_path: path.to_path_buf(),
    };

    for record in &records {
        if let Ok(at) = DateTime::parse_from_rfc3339(&record.timestamp) {
            let at = at.with_timezone(&Utc);
            info.start_time = Some(info.start_time.map_or(at, |s| s.min(at)));
            info.end_time = Some(info.end_time.map_or(at, |e| e.max(at)));
        }
        if info.cwd.is_empty() {
            info.cwd = record.cwd.clone().unwrap_or_default();
        }
        if info.git_branch.is_empty() {
            info.git_branch = record.git_branch.clone().unwrap_or_default();
        }
    }

    info.first_user_message = records
        .iter()
        .find(|r| r.record_type == ROLE_USER || message_of(r).is_some_and(|m| m.role == ROLE_USER))
        .and_then(first_text)
        .map(|text| truncate(&text, FIRST_MESSAGE_LIMIT))
        .unwrap_or_default();

    if include_agent_types {
        info.agent_types_used = agent_types(&records);
    }

    Ok(Some(info))
}

fn message_of(record: &RawRecord) -> Option<Message> {
    Message::parse(&record.message).ok()
}

fn first_text(record: &RawRecord) -> Option<String> {
    message_of(record)?.content.into_iter().find_map(|block| match block {
        ContentBlock::Text { text } => Some(text),
        _ => None,
    })
}

/// Task calls made in the given records, in record order.
fn task_calls(records: &[RawRecord]) -> Vec<ToolCall> {
    records
        .iter()
        .filter_map(message_of)
        .flat_map(|m| m.content)
        .filter_map(|block| match block {
            ContentBlock::ToolUse { id, name, input } => Some(ToolCall::new(id, name, input)),
            _ => None,
        })
        .filter(ToolCall::is_task)
        .collect()
}

/// Sorted, unique `subagent_type` values of the Task calls in `records`.
fn agent_types(records: &[RawRecord]) -> Vec<String> {
    task_calls(records)
        .iter()
        .filter_map(|call| call.subagent_type())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Locate a sub-agent's log file inside a project directory.
///
/// Tries `agent-<id>.jsonl` at the project root, then the session's
/// `subagents` directory, then the `subagents` directory of any session.
pub fn find_agent_file(project_dir: &Path, session_id: &str, agent_id: &str) -> Option<PathBuf> {
    let file_name = format!("agent-{}.jsonl", agent_id);

    let direct = project_dir.join(&file_name);
    if direct.is_file() {
        return Some(direct);
    }

    if !session_id.is_empty() {
        let in_session = project_dir.join(session_id).join("subagents").join(&file_name);
        if in_session.is_file() {
            return Some(in_session);
        }
    }

    WalkDir::new(project_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.path().join("subagents").join(&file_name))
        .find(|p| p.is_file())
}

/// Sessions that spawned a sub-agent of `agent_type` (case-insensitive).
///
/// When every project is searched, only the newest sessions of each project are
/// inspected: 50, or `limit * 5` when a smaller limit is requested.
pub fn find_sessions_by_agent_type(
    claude: &ClaudeDir,
    agent_type: &str,
    project: Option<&str>,
    days: u32,
    limit: usize,
) -> Result<Vec<AgentUsageInfo>> {
    let projects = claude.projects_to_search(project)?;

    let per_project = if projects.len() > 1 {
        if limit > 0 && limit < PER_PROJECT_SCAN_LIMIT {
            limit * 5
        } else {
            PER_PROJECT_SCAN_LIMIT
        }
    } else {
        0
    };
    let options = ListSessionsOptions {
        days,
        include_agent_types: true,
        limit: per_project,
    };

    let mut results = Vec::new();
    for project in &projects {
        let sessions = match list_sessions(claude, project, options) {
            Ok(sessions) => sessions,
            Err(err) => {
                debug!(project = %project.name, error = %err, "skipping project");
                continue;
            }
        };

        for session in sessions {
            if !session
                .agent_types_used
                .iter()
                .any(|t| t.eq_ignore_ascii_case(agent_type))
            {
                continue;
            }

            let records = read_session_records(&session.file_path)?;
            let prompts: Vec<String> = task_calls(&records)
                .iter()
                .filter(|call| {
                    call.subagent_type()
                        .is_some_and(|t| t.eq_ignore_ascii_case(agent_type))
                })
                .map(|call| call.prompt().unwrap_or_default().to_string())
                .collect();

            results.push(AgentUsageInfo {
                session_id: session.session_id,
                project: project.name.clone(),
                timestamp: session.start_time,
                usage_count: prompts.len(),
                prompts,
            });
        }

        if limit > 0 && results.len() >= limit {
            results.truncate(limit);
            break;
        }
    }

    Ok(results)
}
