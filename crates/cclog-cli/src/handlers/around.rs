use super::HandlerContext;
use crate::args::SessionArgs;
use crate::output::render_around;
use anyhow::Result;

pub fn handle(
    ctx: &HandlerContext,
    args: &SessionArgs,
    uuid: &str,
    offset: Option<i64>,
) -> Result<()> {
    let offset = offset.unwrap_or_else(|| default_offset(ctx.config.context_size));
    let around = ctx.service.logs_around(
        &args.source(),
        uuid,
        offset,
        args.include_sidechains(ctx.config.include_sidechains),
    )?;
    ctx.emit(&around, render_around)
}

/// Show `context_size` entries before the target when no offset is given.
fn default_offset(context_size: usize) -> i64 {
    -i64::try_from(context_size).unwrap_or(i64::MAX)
}
