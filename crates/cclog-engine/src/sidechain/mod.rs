//! Sidechain (sub-agent conversation) reconciliation.
//!
//! A sidechain is rebuilt from its root with a parent-link walk. When that walk
//! reaches fewer entries of the root's agent than exist in the batch, the links
//! are considered broken and the sidechain is rebuilt flat from every entry of
//! that agent, ordered by timestamp. Reconciled sidechains are then attached to
//! the Task calls that spawned them.

mod linker;
mod lookup;
mod strategy;

use std::collections::HashMap;

use tracing::debug;

use crate::context::ProcessingContext;

pub(crate) use linker::link_task_calls;
pub(crate) use strategy::{AgentScan, CollectStrategy, Collected, Placed, TreeWalk};

/// Final entry list of one sidechain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Reconciliation {
    pub root: usize,
    /// Name of the strategy that produced `entries`
    pub strategy: &'static str,
    /// Entries in display order; flat when every `parent` is `None`
    pub entries: Vec<Placed>,
}

/// Rebuild the sidechain rooted at `root`, falling back to `fallback` when the
/// primary walk misses entries of the root's agent.
pub(crate) fn reconcile_with(
    ctx: &ProcessingContext,
    root: usize,
    primary: &dyn CollectStrategy,
    fallback: &dyn CollectStrategy,
) -> Reconciliation {
    let collected = primary.collect(ctx, root);
    let agent_id = ctx.entries[root].agent_id.as_str();

    if !agent_id.is_empty() {
        let expected = ctx.agent_entries(agent_id).count();
        if collected.reached_for_agent < expected {
            debug!(
                agent_id,
                reached = collected.reached_for_agent,
                expected,
                strategy = fallback.name(),
                "sidechain links incomplete, rebuilding from agent id"
            );
            return Reconciliation {
                root,
                strategy: fallback.name(),
                entries: fallback.collect(ctx, root).entries,
            };
        }
    }

    Reconciliation {
        root,
        strategy: primary.name(),
        entries: collected.entries,
    }
}

pub(crate) fn reconcile(ctx: &ProcessingContext, root: usize) -> Reconciliation {
    reconcile_with(ctx, root, &TreeWalk, &AgentScan)
}

/// Sidechain roots in record order.
///
/// A root is a sidechain entry whose parent is missing, dangling or outside the
/// sidechain. For one agent id only the earliest such entry counts.
pub(crate) fn find_roots(ctx: &ProcessingContext) -> Vec<usize> {
    let mut roots = Vec::new();
    let mut by_agent: HashMap<&str, usize> = HashMap::new();

    for (i, entry) in ctx.entries.iter().enumerate() {
        if !entry.is_sidechain {
            continue;
        }
        let linked_inside = !entry.parent_uuid.is_empty()
            && ctx.get(&entry.parent_uuid).is_some_and(|p| p.is_sidechain);
        if linked_inside {
            continue;
        }

        if entry.agent_id.is_empty() {
            roots.push(i);
            continue;
        }
        match by_agent.get(entry.agent_id.as_str()) {
            Some(&current) if ctx.entries[current].raw_timestamp <= entry.raw_timestamp => {}
            _ => {
                by_agent.insert(entry.agent_id.as_str(), i);
            }
        }
    }

    roots.extend(by_agent.into_values());
    roots.sort_unstable();
    roots
}

/// Reconcile every sidechain and attach each to the Task call that spawned it.
pub(crate) fn link_sidechains(ctx: &mut ProcessingContext) {
    let roots = find_roots(ctx);
    if roots.is_empty() {
        return;
    }
    let reconciled: Vec<Reconciliation> = roots.iter().map(|&r| reconcile(ctx, r)).collect();
    link_task_calls(ctx, reconciled);
}
