use super::HandlerContext;
use crate::args::SessionArgs;
use crate::output::render_summary;
use anyhow::Result;

pub fn handle(ctx: &HandlerContext, args: &SessionArgs) -> Result<()> {
    let summary = ctx
        .service
        .summary(&args.source(), args.include_sidechains(ctx.config.include_sidechains))?;
    ctx.emit(&summary, render_summary)
}
