/// Record type of the session title records that never reach the engine.
pub const ENTRY_TYPE_SUMMARY: &str = "summary";

pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";

/// Name of the tool that spawns a sub-agent (sidechain) conversation.
pub const TASK_TOOL_NAME: &str = "Task";

pub const TAG_COMMAND_NAME: &str = "command-name";
pub const TAG_COMMAND_ARGS: &str = "command-args";
pub const TAG_COMMAND_STDOUT: &str = "local-command-stdout";
pub const TAG_COMMAND_CAVEAT: &str = "local-command-caveat";
pub const CAVEAT_PREFIX: &str = "Caveat:";

/// Input keys tried, in order, when summarising a tool call in one line.
pub const TOOL_SUMMARY_KEYS: [&str; 6] = ["command", "query", "url", "file_path", "pattern", "prompt"];
