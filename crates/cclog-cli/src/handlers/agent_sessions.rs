use super::HandlerContext;
use crate::output::render_agent_sessions;
use anyhow::Result;

pub fn handle(
    ctx: &HandlerContext,
    agent_type: &str,
    project: Option<&str>,
    days: u32,
    limit: Option<usize>,
) -> Result<()> {
    let usages = ctx.service.find_sessions_by_agent_type(
        agent_type,
        project,
        days,
        limit.unwrap_or(ctx.config.default_limit),
    )?;
    ctx.emit(&usages, |usages, painter| render_agent_sessions(usages, painter))
}
