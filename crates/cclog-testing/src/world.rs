//! SessionWorld pattern for declarative integration test setup.
//!
//! Lays out an isolated Claude Code data directory:
//!
//! ```text
//! <tmp>/.claude/projects/<encoded-project>/<session>.jsonl
//! <tmp>/.claude/projects/<encoded-project>/<session>/subagents/agent-<id>.jsonl
//! <tmp>/.cclog/config.toml
//! ```

use anyhow::Result;
use assert_cmd::Command;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::RecordBuilder;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use cclog_testing::{RecordBuilder, SessionWorld, PROJECT_DIR, SESSION_ID};
///
/// let world = SessionWorld::new().with_session(
///     PROJECT_DIR,
///     SESSION_ID,
///     &[RecordBuilder::user("u1").plain("hello")],
/// );
///
/// let result = world.run(&["logs", SESSION_ID]).unwrap();
/// assert!(result.success());
/// ```
pub struct SessionWorld {
    temp_dir: TempDir,
    claude_dir: PathBuf,
    config_dir: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for SessionWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionWorld {
    /// Create a new isolated environment with an empty `projects` directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let claude_dir = temp_dir.path().join(".claude");
        let config_dir = temp_dir.path().join(".cclog");

        fs::create_dir_all(claude_dir.join("projects")).expect("Failed to create projects dir");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        Self {
            temp_dir,
            claude_dir,
            config_dir,
            env_vars: HashMap::new(),
        }
    }

    pub fn claude_dir(&self) -> &Path {
        &self.claude_dir
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn project_dir(&self, encoded: &str) -> PathBuf {
        self.claude_dir.join("projects").join(encoded)
    }

    /// Path of a main session file.
    pub fn session_path(&self, encoded: &str, session_id: &str) -> PathBuf {
        self.project_dir(encoded).join(format!("{}.jsonl", session_id))
    }

    /// Create an empty project directory.
    pub fn with_project(self, encoded: &str) -> Self {
        fs::create_dir_all(self.project_dir(encoded)).expect("Failed to create project dir");
        self
    }

    /// Write a main session file.
    pub fn with_session(self, encoded: &str, session_id: &str, records: &[RecordBuilder]) -> Self {
        let path = self.session_path(encoded, session_id);
        write_records(&path, records).expect("Failed to write session file");
        self
    }

    /// Write `<session>/subagents/agent-<id>.jsonl`.
    pub fn with_subagent(
        self,
        encoded: &str,
        session_id: &str,
        agent_id: &str,
        records: &[RecordBuilder],
    ) -> Self {
        let path = self
            .project_dir(encoded)
            .join(session_id)
            .join("subagents")
            .join(format!("agent-{}.jsonl", agent_id));
        write_records(&path, records).expect("Failed to write sub-agent file");
        self
    }

    /// Write an arbitrary file relative to the project directory.
    pub fn with_raw_file(self, encoded: &str, name: &str, contents: &str) -> Self {
        let path = self.project_dir(encoded).join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, contents).expect("Failed to write raw file");
        self
    }

    /// Write `<config_dir>/config.toml`.
    pub fn with_config(self, toml: &str) -> Self {
        fs::write(self.config_dir.join("config.toml"), toml).expect("Failed to write config");
        self
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Configure a CLI command with this environment's directories.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--claude-dir")
            .arg(&self.claude_dir)
            .arg("--config-dir")
            .arg(&self.config_dir)
            .env_remove("CCLOG_PATH")
            .env_remove("CLAUDE_CONFIG_DIR")
            .env_remove("RUST_LOG")
            .current_dir(self.temp_dir.path());

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute the `cclog` binary inside this environment.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("cclog")
            .map_err(|e| anyhow::anyhow!("Failed to find cclog binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

fn write_records(path: &Path, records: &[RecordBuilder]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut contents = records
        .iter()
        .map(RecordBuilder::to_line)
        .collect::<Vec<_>>()
        .join("\n");
    contents.push('\n');
    fs::write(path, contents)?;
    Ok(())
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
