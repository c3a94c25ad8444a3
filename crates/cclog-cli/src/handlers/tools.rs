use super::HandlerContext;
use crate::args::SessionArgs;
use crate::output::render_tools;
use anyhow::Result;

pub fn handle(ctx: &HandlerContext, args: &SessionArgs) -> Result<()> {
    let stats = ctx
        .service
        .tool_usage(&args.source(), args.include_sidechains(ctx.config.include_sidechains))?;
    ctx.emit(&stats, render_tools)
}
