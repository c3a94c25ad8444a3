use super::args::{Cli, Commands};
use super::handlers::{self, HandlerContext};
use super::logging;
use anyhow::{Context, Result};
use cclog_runtime::{Config, SessionService, resolve_claude_dir};
use is_terminal::IsTerminal;
use tracing::debug;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let config = Config::load(cli.config_dir.as_deref()).context("Failed to load config")?;
    let claude_dir = resolve_claude_dir(cli.claude_dir.as_deref(), &config);
    debug!(claude_dir = %claude_dir.display(), "resolved data directory");

    let ctx = HandlerContext {
        service: SessionService::new(claude_dir),
        config,
        format: cli.format,
        color: std::io::stdout().is_terminal(),
    };

    match cli.command {
        Commands::Projects { sort } => handlers::projects::handle(&ctx, sort),

        Commands::Sessions {
            project,
            days,
            limit,
            agent_types,
        } => handlers::sessions::handle(&ctx, &project, days, limit, agent_types),

        Commands::Logs { session } => handlers::logs::handle(&ctx, &session),

        Commands::Summary { session } => handlers::summary::handle(&ctx, &session),

        Commands::Tools { session } => handlers::tools::handle(&ctx, &session),

        Commands::Errors { session, limit } => handlers::errors::handle(&ctx, &session, limit),

        Commands::Timeline { session, limit } => {
            handlers::timeline::handle(&ctx, &session, limit)
        }

        Commands::Stats {
            session,
            errors_limit,
        } => handlers::stats::handle(&ctx, &session, errors_limit),

        Commands::Around {
            session,
            uuid,
            offset,
        } => handlers::around::handle(&ctx, &session, &uuid, offset),

        Commands::AgentSessions {
            agent_type,
            project,
            days,
            limit,
        } => handlers::agent_sessions::handle(&ctx, &agent_type, project.as_deref(), days, limit),
    }
}
