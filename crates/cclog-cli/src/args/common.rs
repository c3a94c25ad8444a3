use cclog_runtime::SessionSource;
use clap::Args;
use std::path::PathBuf;

/// Which session to load and how.
#[derive(Debug, Clone, Default, Args)]
pub struct SessionArgs {
    /// Session id (the `<uuid>` of `<uuid>.jsonl`)
    #[arg(required_unless_present = "file")]
    pub session: Option<String>,

    /// Read this JSONL file instead of resolving a session id
    #[arg(long, conflicts_with_all = ["session", "agent_id", "project"])]
    pub file: Option<PathBuf>,

    /// Load only the log of this sub-agent
    #[arg(long)]
    pub agent_id: Option<String>,

    /// Only search this project (name or path fragment)
    #[arg(long)]
    pub project: Option<String>,

    /// Drop sidechain entries that were not attached to a Task call
    #[arg(long)]
    pub no_sidechains: bool,
}

impl SessionArgs {
    pub fn source(&self) -> SessionSource {
        match (&self.file, &self.session) {
            (Some(path), _) => SessionSource::File(path.clone()),
            (None, session) => SessionSource::id(session.clone().unwrap_or_default())
                .with_agent(self.agent_id.clone())
                .in_project(self.project.clone()),
        }
    }

    pub fn include_sidechains(&self, configured: bool) -> bool {
        configured && !self.no_sidechains
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_prefers_file() {
        let args = SessionArgs {
            file: Some(PathBuf::from("/tmp/log.jsonl")),
            ..Default::default()
        };
        assert_eq!(args.source(), SessionSource::File(PathBuf::from("/tmp/log.jsonl")));
    }

    #[test]
    fn test_source_by_id_drops_empty_filters() {
        let args = SessionArgs {
            session: Some("abc".to_string()),
            agent_id: Some(String::new()),
            project: Some("proj".to_string()),
            ..Default::default()
        };
        assert_eq!(
            args.source(),
            SessionSource::Id {
                session_id: "abc".to_string(),
                agent_id: None,
                project: Some("proj".to_string()),
            }
        );
    }

    #[test]
    fn test_no_sidechains_overrides_config() {
        let args = SessionArgs {
            no_sidechains: true,
            ..Default::default()
        };
        assert!(!args.include_sidechains(true));
        assert!(!SessionArgs::default().include_sidechains(false));
        assert!(SessionArgs::default().include_sidechains(true));
    }
}
