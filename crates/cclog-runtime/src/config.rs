use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resolve the cclog workspace directory (where `config.toml` lives) based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. CCLOG_PATH environment variable (with tilde expansion)
/// 3. System config directory (recommended default)
/// 4. ~/.cclog (fallback for systems without a standard config directory)
pub fn resolve_workspace_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("CCLOG_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("cclog"));
    }

    if let Some(home) = dirs::home_dir() {
        return Ok(home.join(".cclog"));
    }

    Err(Error::Config(
        "Could not determine workspace path: no HOME directory or system config directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Resolve the Claude Code data directory based on priority:
/// 1. Explicit path (`--claude-dir`)
/// 2. CLAUDE_CONFIG_DIR environment variable
/// 3. `claude_dir` from config.toml
/// 4. ~/.claude
pub fn resolve_claude_dir(explicit_path: Option<&Path>, config: &Config) -> PathBuf {
    pick_claude_dir(explicit_path, std::env::var("CLAUDE_CONFIG_DIR").ok(), config)
}

fn pick_claude_dir(explicit_path: Option<&Path>, env_path: Option<String>, config: &Config) -> PathBuf {
    if let Some(path) = explicit_path {
        return path.to_path_buf();
    }
    if let Some(path) = env_path.filter(|p| !p.is_empty()) {
        return expand_tilde(&path);
    }
    if let Some(path) = &config.claude_dir {
        return expand_tilde(path);
    }
    dirs::home_dir()
        .map(|home| home.join(".claude"))
        .unwrap_or_else(|| PathBuf::from(".claude"))
}

fn default_true() -> bool {
    true
}

fn default_limit() -> usize {
    50
}

fn default_errors_limit() -> usize {
    20
}

fn default_context_size() -> usize {
    3
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Claude Code data directory, e.g. `~/.claude`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claude_dir: Option<String>,
    /// Keep sidechain entries that were not attached to a Task call
    #[serde(default = "default_true")]
    pub include_sidechains: bool,
    /// Default `--limit` for session listings and timelines
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_errors_limit")]
    pub errors_limit: usize,
    /// Entries shown before a target when no offset is given
    #[serde(default = "default_context_size")]
    pub context_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            claude_dir: None,
            include_sidechains: default_true(),
            default_limit: default_limit(),
            errors_limit: default_errors_limit(),
            context_size: default_context_size(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the resolved workspace directory.
    pub fn load(workspace: Option<&str>) -> Result<Self> {
        let config_path = resolve_workspace_path(workspace)?.join("config.toml");
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.include_sidechains);
        assert_eq!(config.default_limit, 50);
        assert_eq!(config.errors_limit, 20);
        assert_eq!(config.context_size, 3);
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let config = Config {
            claude_dir: Some("/data/claude".to_string()),
            include_sidechains: false,
            ..Config::default()
        };
        config.save_to(&config_path)?;

        assert_eq!(Config::load_from(&config_path)?, config);
        Ok(())
    }

    #[test]
    fn test_partial_config_uses_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "errors_limit = 5\n")?;

        let config = Config::load_from(&config_path)?;
        assert_eq!(config.errors_limit, 5);
        assert_eq!(config.default_limit, 50);
        assert!(config.include_sidechains);
        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = Config::load(Some(temp_dir.path().to_str().unwrap()))?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_invalid_toml_is_config_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "include_sidechains = \"maybe\"")?;

        assert!(matches!(Config::load_from(&config_path), Err(Error::Config(_))));
        Ok(())
    }

    #[test]
    fn test_claude_dir_priority() {
        let config = Config {
            claude_dir: Some("/from/config".to_string()),
            ..Config::default()
        };
        let explicit = Path::new("/from/flag");

        assert_eq!(
            pick_claude_dir(Some(explicit), Some("/from/env".to_string()), &config),
            PathBuf::from("/from/flag")
        );
        assert_eq!(
            pick_claude_dir(None, Some("/from/env".to_string()), &config),
            PathBuf::from("/from/env")
        );
        assert_eq!(pick_claude_dir(None, None, &config), PathBuf::from("/from/config"));
        assert!(pick_claude_dir(None, None, &Config::default()).ends_with(".claude"));
    }

    #[test]
    fn test_expand_tilde_leaves_absolute_paths() {
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
        assert_eq!(expand_tilde("relative"), PathBuf::from("relative"));
    }
}
