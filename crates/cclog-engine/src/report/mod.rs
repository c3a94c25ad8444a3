//! Read-only reports over a reconciled session.
//!
//! Every report works on the top-level entries produced by
//! [`process_entries`](crate::process_entries) and never re-derives pairing or
//! sidechain structure.

mod around;
mod errors;
mod logs;
mod stats;
mod summary;
mod timeline;
mod tools;

pub use around::{context_log, logs_around};
pub use errors::collect_errors;
pub use logs::session_logs;
pub use stats::session_stats;
pub use summary::summarize;
pub use timeline::timeline;
pub use tools::tool_usage;

/// Identity of the session a report is computed for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionRef<'a> {
    pub session_id: &'a str,
    /// Set when the report covers a single sub-agent file
    pub agent_id: Option<&'a str>,
    pub project: &'a str,
}

impl<'a> SessionRef<'a> {
    pub fn new(session_id: &'a str, project: &'a str) -> Self {
        Self {
            session_id,
            agent_id: None,
            project,
        }
    }

    pub fn with_agent(mut self, agent_id: Option<&'a str>) -> Self {
        self.agent_id = agent_id.filter(|id| !id.is_empty());
        self
    }

    fn agent(&self) -> Option<String> {
        self.agent_id.map(str::to_string)
    }
}

/// Agent id to report for an entry that lives in a sidechain.
fn sidechain_label(entry: &cclog_types::ProcessedEntry) -> String {
    if entry.is_sidechain {
        entry.agent_id.clone()
    } else {
        String::new()
    }
}
