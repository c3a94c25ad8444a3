pub mod config;
pub mod error;
pub mod session;

pub use config::{Config, expand_tilde, resolve_claude_dir, resolve_workspace_path};
pub use error::{Error, Result};
pub use session::{LoadedSession, SessionService, SessionSource};
