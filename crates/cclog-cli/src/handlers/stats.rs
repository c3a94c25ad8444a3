use super::HandlerContext;
use crate::args::SessionArgs;
use crate::output::render_stats;
use anyhow::Result;

pub fn handle(ctx: &HandlerContext, args: &SessionArgs, errors_limit: Option<usize>) -> Result<()> {
    let stats = ctx.service.stats(
        &args.source(),
        args.include_sidechains(ctx.config.include_sidechains),
        errors_limit.unwrap_or(ctx.config.errors_limit),
    )?;
    ctx.emit(&stats, render_stats)
}
