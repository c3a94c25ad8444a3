use cclog_types::ProcessedEntry;

use super::strategy::{CollectStrategy, TreeWalk};
use crate::context::ProcessingContext;

// Both lookups try the parent-link walk first and fall back to every entry of
// the root's agent, ordered by raw timestamp, when the walk finds nothing.

/// Content of the first user-authored message of the sidechain rooted at `root`.
pub(crate) fn first_user_message(ctx: &ProcessingContext, root: usize) -> Option<String> {
    let walked = TreeWalk
        .collect(ctx, root)
        .entries
        .into_iter()
        .map(|p| &ctx.entries[p.index])
        .find(|e| is_user_prompt(e));

    walked
        .or_else(|| {
            agent_scope(ctx, root)
                .filter(|e| is_user_prompt(e))
                .min_by(|a, b| a.raw_timestamp.cmp(&b.raw_timestamp))
        })
        .map(|e| e.content.trim().to_string())
}

/// Content of the latest assistant-authored message of the sidechain rooted at `root`.
pub(crate) fn last_assistant_message(ctx: &ProcessingContext, root: usize) -> Option<String> {
    let walked = TreeWalk
        .collect(ctx, root)
        .entries
        .into_iter()
        .map(|p| &ctx.entries[p.index])
        .filter(|e| is_assistant_reply(e))
        .max_by(|a, b| a.raw_timestamp.cmp(&b.raw_timestamp));

    walked
        .or_else(|| {
            agent_scope(ctx, root)
                .filter(|e| is_assistant_reply(e))
                .max_by(|a, b| a.raw_timestamp.cmp(&b.raw_timestamp))
        })
        .map(|e| e.content.trim().to_string())
}

fn is_user_prompt(entry: &ProcessedEntry) -> bool {
    entry.is_user() && !entry.is_tool_result && has_text(entry)
}

fn is_assistant_reply(entry: &ProcessedEntry) -> bool {
    entry.is_assistant() && !entry.is_tool_result && has_text(entry)
}

fn has_text(entry: &ProcessedEntry) -> bool {
    !entry.content.trim().is_empty()
}

/// Every sidechain entry sharing the root's agent id; empty when the root has none.
fn agent_scope<'a>(
    ctx: &'a ProcessingContext,
    root: usize,
) -> impl Iterator<Item = &'a ProcessedEntry> + 'a {
    let agent_id = ctx.entries[root].agent_id.as_str();
    ctx.agent_entries(agent_id)
        .filter(move |_| !agent_id.is_empty())
        .map(move |i| &ctx.entries[i])
}
