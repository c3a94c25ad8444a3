//! Testing infrastructure for cclog tests.
//!
//! - `RecordBuilder`: fluent construction of raw session log records
//! - `SessionWorld`: an isolated `~/.claude` tree with projects, sessions and sub-agent files

pub mod fixtures;
pub mod world;

pub use fixtures::{RecordBuilder, build_all, ts};
pub use world::{CliResult, SessionWorld};

/// Encoded project directory used by most fixtures (`/Users/test/proj`).
pub const PROJECT_DIR: &str = "-Users-test-proj";

/// A valid main-session id.
pub const SESSION_ID: &str = "6f1c3c0e-8d2a-4b7e-9a55-0c2f4d1e9b10";
