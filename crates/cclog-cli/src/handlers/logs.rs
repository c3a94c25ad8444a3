use super::HandlerContext;
use crate::args::SessionArgs;
use crate::output::render_logs;
use anyhow::Result;

pub fn handle(ctx: &HandlerContext, args: &SessionArgs) -> Result<()> {
    let logs = ctx
        .service
        .logs(&args.source(), args.include_sidechains(ctx.config.include_sidechains))?;
    ctx.emit(&logs, render_logs)
}
