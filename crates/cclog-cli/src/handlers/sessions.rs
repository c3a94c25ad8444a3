use super::HandlerContext;
use crate::output::render_sessions;
use anyhow::Result;
use cclog_providers::ListSessionsOptions;

pub fn handle(
    ctx: &HandlerContext,
    project: &str,
    days: u32,
    limit: Option<usize>,
    agent_types: bool,
) -> Result<()> {
    let options = ListSessionsOptions {
        days,
        include_agent_types: agent_types,
        limit: limit.unwrap_or(ctx.config.default_limit),
    };
    let sessions = ctx.service.list_sessions(project, options)?;
    ctx.emit(&sessions, |sessions, painter| render_sessions(sessions, painter))
}
