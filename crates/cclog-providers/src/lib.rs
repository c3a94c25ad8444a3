// Providers module - reads Claude Code session logs from disk
// Feeds raw records to the engine; knows nothing about hierarchy or reports

// Error types
pub mod error;

// JSONL reading (main session + sub-agent files)
pub mod jsonl;

// Encoded project directory names
pub mod paths;

// Project and session discovery under <claude_dir>/projects
pub mod discovery;
pub mod sessions;

pub use discovery::{ClaudeDir, ProjectSort};
pub use error::{Error, Result};
pub use jsonl::{read_jsonl_file, read_session_records, subagent_files};
pub use paths::{decode_project_path, encode_project_path};
pub use sessions::{
    ListSessionsOptions, find_agent_file, find_sessions_by_agent_type, is_session_file,
    list_sessions, session_info,
};
