// NOTE: cclog Architecture Rationale
//
// Why read-on-demand (no index)?
// - Claude Code already keeps every session as JSONL under ~/.claude/projects
// - A session is small enough to rebuild in one pass on every invocation
// - The log format changes between Claude Code releases; nothing to migrate
//
// Why is the CLI thin?
// - Reconstruction lives in cclog-engine, file access in cclog-providers
// - cclog-runtime glues them into SessionService, which this crate calls
// - Handlers only pick defaults from config and render the returned models
//
// Why JSON output mirrors the report structs?
// - `--format json` is consumed by scripts and editors
// - Plain output is for humans and may change freely

mod args;
mod commands;
mod handlers;
mod logging;
mod output;
pub mod types;

pub use args::{Cli, Commands, SessionArgs};
pub use commands::run;
