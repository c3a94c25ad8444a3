use super::HandlerContext;
use crate::output::render_projects;
use crate::types::ProjectSortArg;
use anyhow::Result;

pub fn handle(ctx: &HandlerContext, sort: ProjectSortArg) -> Result<()> {
    let projects = ctx.service.list_projects(sort.into())?;
    ctx.emit(&projects, |projects, painter| render_projects(projects, painter))
}
