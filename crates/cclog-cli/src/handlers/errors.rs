use super::HandlerContext;
use crate::args::SessionArgs;
use crate::output::render_errors;
use anyhow::Result;

pub fn handle(ctx: &HandlerContext, args: &SessionArgs, limit: Option<usize>) -> Result<()> {
    let errors = ctx.service.errors(
        &args.source(),
        args.include_sidechains(ctx.config.include_sidechains),
        limit.unwrap_or(ctx.config.errors_limit),
    )?;
    ctx.emit(&errors, render_errors)
}
