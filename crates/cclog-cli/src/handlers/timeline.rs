use super::HandlerContext;
use crate::args::SessionArgs;
use crate::output::render_timeline;
use anyhow::Result;

pub fn handle(ctx: &HandlerContext, args: &SessionArgs, limit: Option<usize>) -> Result<()> {
    let timeline = ctx.service.timeline(
        &args.source(),
        args.include_sidechains(ctx.config.include_sidechains),
        limit.unwrap_or(ctx.config.default_limit),
    )?;
    ctx.emit(&timeline, render_timeline)
}
