use std::path::{Path, PathBuf};

use cclog_engine::{SessionRef, process_entries, report};
use cclog_providers::{
    ClaudeDir, ListSessionsOptions, ProjectSort, find_agent_file, read_jsonl_file,
    read_session_records,
};
use cclog_types::{
    AgentUsageInfo, LogsAroundEntry, ProcessedEntry, Project, SessionErrors, SessionInfo,
    SessionLogs, SessionStats, SessionSummary, SessionTimeline, ToolUsageStats,
};
use chrono::{SecondsFormat, Utc};
use tracing::debug;

use crate::{Error, Result};

/// Where a session's records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionSource {
    /// Resolve `<session_id>.jsonl` (or a sub-agent file) under the projects directory
    Id {
        session_id: String,
        /// Load only this sub-agent's log file
        agent_id: Option<String>,
        /// Restrict the search to one project
        project: Option<String>,
    },
    /// Read a JSONL file directly; the session is labelled with the file stem
    File(PathBuf),
}

impl SessionSource {
    pub fn id(session_id: impl Into<String>) -> Self {
        SessionSource::Id {
            session_id: session_id.into(),
            agent_id: None,
            project: None,
        }
    }

    pub fn with_agent(self, agent: Option<String>) -> Self {
        match self {
            SessionSource::Id {
                session_id,
                project,
                ..
            } => SessionSource::Id {
                session_id,
                agent_id: agent.filter(|a| !a.is_empty()),
                project,
            },
            file => file,
        }
    }

    pub fn in_project(self, name: Option<String>) -> Self {
        match self {
            SessionSource::Id {
                session_id,
                agent_id,
                ..
            } => SessionSource::Id {
                session_id,
                agent_id,
                project: name.filter(|p| !p.is_empty()),
            },
            file => file,
        }
    }
}

/// A processed session ready for reporting.
#[derive(Debug, Clone)]
pub struct LoadedSession {
    pub session_id: String,
    pub agent_id: Option<String>,
    pub project: String,
    /// Top-level entries of the reconciled forest
    pub entries: Vec<ProcessedEntry>,
}

impl LoadedSession {
    pub fn session_ref(&self) -> SessionRef<'_> {
        SessionRef::new(&self.session_id, &self.project).with_agent(self.agent_id.as_deref())
    }
}

/// Loads sessions from a Claude Code data directory and computes reports.
#[derive(Debug, Clone)]
pub struct SessionService {
    claude: ClaudeDir,
}

impl SessionService {
    pub fn new(claude_dir: impl Into<PathBuf>) -> Self {
        Self {
            claude: ClaudeDir::new(claude_dir),
        }
    }

    pub fn claude_dir(&self) -> &Path {
        self.claude.root()
    }

    pub fn list_projects(&self, sort: ProjectSort) -> Result<Vec<Project>> {
        Ok(self.claude.list_projects(sort)?)
    }

    pub fn list_sessions(
        &self,
        project: &str,
        options: ListSessionsOptions,
    ) -> Result<Vec<SessionInfo>> {
        let project = self
            .claude
            .find_project(project)?
            .ok_or_else(|| Error::ProjectNotFound(project.to_string()))?;
        Ok(cclog_providers::list_sessions(&self.claude, &project, options)?)
    }

    pub fn find_sessions_by_agent_type(
        &self,
        agent_type: &str,
        project: Option<&str>,
        days: u32,
        limit: usize,
    ) -> Result<Vec<AgentUsageInfo>> {
        Ok(cclog_providers::find_sessions_by_agent_type(
            &self.claude,
            agent_type,
            project,
            days,
            limit,
        )?)
    }

    /// Read and reconcile a session.
    ///
    /// Top-level sidechain entries are dropped unless `include_sidechains` is
    /// set. Sub-agent loads keep everything: every entry there is a sidechain.
    pub fn load(&self, source: &SessionSource, include_sidechains: bool) -> Result<LoadedSession> {
        let mut session = match source {
            SessionSource::Id {
                session_id,
                agent_id: Some(agent_id),
                project,
            } => return self.load_agent(session_id, agent_id, project.as_deref()),
            SessionSource::Id {
                session_id,
                agent_id: None,
                project,
            } => {
                let (path, project) = self
                    .claude
                    .find_session_file(session_id, project.as_deref())?
                    .ok_or_else(|| Error::SessionNotFound(session_id.clone()))?;
                debug!(path = %path.display(), "loading session");
                LoadedSession {
                    session_id: session_id.clone(),
                    agent_id: None,
                    project: project.name,
                    entries: process_entries(&read_session_records(&path)?),
                }
            }
            SessionSource::File(path) => {
                if !path.is_file() {
                    return Err(Error::FileNotFound(path.clone()));
                }
                let label = file_label(path);
                LoadedSession {
                    session_id: label.clone(),
                    agent_id: None,
                    project: label,
                    entries: process_entries(&read_session_records(path)?),
                }
            }
        };

        if !include_sidechains {
            session.entries.retain(|e| !e.is_sidechain);
        }
        Ok(session)
    }

    fn load_agent(
        &self,
        session_id: &str,
        agent_id: &str,
        project: Option<&str>,
    ) -> Result<LoadedSession> {
        let found = self
            .claude
            .projects_to_search(project)?
            .into_iter()
            .find_map(|p| {
                find_agent_file(&self.claude.project_dir(&p), session_id, agent_id)
                    .map(|path| (path, p.name))
            });
        let Some((path, project)) = found else {
            return Err(Error::SessionNotFound(format!("{} (agent {})", session_id, agent_id)));
        };

        debug!(path = %path.display(), agent_id, "loading sub-agent log");
        Ok(LoadedSession {
            session_id: session_id.to_string(),
            agent_id: Some(agent_id.to_string()),
            project,
            entries: process_entries(&read_jsonl_file(&path)?),
        })
    }

    pub fn logs(&self, source: &SessionSource, include_sidechains: bool) -> Result<SessionLogs> {
        let session = self.load(source, include_sidechains)?;
        Ok(report::session_logs(session.session_ref(), &session.entries))
    }

    pub fn summary(&self, source: &SessionSource, include_sidechains: bool) -> Result<SessionSummary> {
        let session = self.load(source, include_sidechains)?;
        Ok(report::summarize(session.session_ref(), &session.entries))
    }

    pub fn tool_usage(&self, source: &SessionSource, include_sidechains: bool) -> Result<ToolUsageStats> {
        let session = self.load(source, include_sidechains)?;
        Ok(report::tool_usage(session.session_ref(), &session.entries))
    }

    pub fn errors(
        &self,
        source: &SessionSource,
        include_sidechains: bool,
        limit: usize,
    ) -> Result<SessionErrors> {
        let session = self.load(source, include_sidechains)?;
        Ok(report::collect_errors(session.session_ref(), &session.entries, limit))
    }

    pub fn timeline(
        &self,
        source: &SessionSource,
        include_sidechains: bool,
        limit: usize,
    ) -> Result<SessionTimeline> {
        let session = self.load(source, include_sidechains)?;
        Ok(report::timeline(session.session_ref(), &session.entries, limit))
    }

    pub fn stats(
        &self,
        source: &SessionSource,
        include_sidechains: bool,
        errors_limit: usize,
    ) -> Result<SessionStats> {
        let session = self.load(source, include_sidechains)?;
        let generated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        Ok(report::session_stats(
            session.session_ref(),
            &session.entries,
            errors_limit,
            &generated_at,
        ))
    }

    /// Entries around `target_uuid`; see [`report::logs_around`] for the offset rules.
    pub fn logs_around(
        &self,
        source: &SessionSource,
        target_uuid: &str,
        offset: i64,
        include_sidechains: bool,
    ) -> Result<LogsAroundEntry> {
        let session = self.load(source, include_sidechains)?;
        report::logs_around(session.session_ref(), &session.entries, target_uuid, offset)
            .ok_or_else(|| Error::EntryNotFound(target_uuid.to_string()))
    }
}

/// File name without its extension.
fn file_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}
