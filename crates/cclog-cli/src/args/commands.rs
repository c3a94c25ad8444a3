use super::common::SessionArgs;
use crate::types::ProjectSortArg;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List projects under the Claude Code data directory")]
    Projects {
        #[arg(long, default_value = "modified")]
        sort: ProjectSortArg,
    },

    #[command(about = "List main sessions of a project")]
    Sessions {
        /// Project name or path fragment
        project: String,

        /// Only sessions modified within this many days (0 = all)
        #[arg(long, default_value_t = 0)]
        days: u32,

        /// Maximum sessions to show [default: config `default_limit`]
        #[arg(long)]
        limit: Option<usize>,

        /// Collect the sub-agent types each session spawned
        #[arg(long)]
        agent_types: bool,
    },

    #[command(about = "Show the reconstructed conversation")]
    Logs {
        #[command(flatten)]
        session: SessionArgs,
    },

    #[command(about = "Summarize messages, tokens, tool calls and sidechains")]
    Summary {
        #[command(flatten)]
        session: SessionArgs,
    },

    #[command(about = "Per-tool call counts and the call sequence")]
    Tools {
        #[command(flatten)]
        session: SessionArgs,
    },

    #[command(about = "List error entries and failed tool calls")]
    Errors {
        #[command(flatten)]
        session: SessionArgs,

        /// Maximum errors to show, 0 for all [default: config `errors_limit`]
        #[arg(long)]
        limit: Option<usize>,
    },

    #[command(about = "Step-by-step timeline of messages and tool calls")]
    Timeline {
        #[command(flatten)]
        session: SessionArgs,

        /// Maximum steps to show, 0 for all [default: config `default_limit`]
        #[arg(long)]
        limit: Option<usize>,
    },

    #[command(about = "Summary, tool usage and errors in one report")]
    Stats {
        #[command(flatten)]
        session: SessionArgs,

        /// Maximum errors to include [default: config `errors_limit`]
        #[arg(long)]
        errors_limit: Option<usize>,
    },

    #[command(about = "Show the entries around one entry")]
    Around {
        #[command(flatten)]
        session: SessionArgs,

        /// Target entry uuid
        #[arg(long)]
        uuid: String,

        /// Negative: entries before the target; positive: entries after
        /// [default: minus config `context_size`]
        #[arg(long, allow_negative_numbers = true)]
        offset: Option<i64>,
    },

    #[command(about = "Find sessions that spawned a given sub-agent type")]
    AgentSessions {
        /// Sub-agent type, e.g. `Explore` (case-insensitive)
        agent_type: String,

        #[arg(long)]
        project: Option<String>,

        /// Only sessions modified within this many days (0 = all)
        #[arg(long, default_value_t = 0)]
        days: u32,

        /// Maximum sessions to show [default: config `default_limit`]
        #[arg(long)]
        limit: Option<usize>,
    },
}
