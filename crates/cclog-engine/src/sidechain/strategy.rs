use std::collections::HashSet;

use crate::context::ProcessingContext;

/// One entry of a reconciled sidechain and its nearest emitted ancestor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Placed {
    pub index: usize,
    pub parent: Option<usize>,
}

/// Output of a collection strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Collected {
    /// Entries to display, in output order
    pub entries: Vec<Placed>,
    /// Entries reached carrying the root's agent id, including skipped results
    pub reached_for_agent: usize,
}

/// A way of gathering the entries of one sidechain from its root.
pub(crate) trait CollectStrategy {
    fn name(&self) -> &'static str;

    fn collect(&self, ctx: &ProcessingContext, root: usize) -> Collected;
}

/// Depth-first walk over parent links, restricted to sidechain entries.
///
/// Result entries already owned by a tool call are not emitted, but the walk
/// still descends through them so their descendants stay reachable. Children of
/// a skipped entry attach to the nearest emitted ancestor.
pub(crate) struct TreeWalk;

impl CollectStrategy for TreeWalk {
    fn name(&self) -> &'static str {
        "tree-walk"
    }

    fn collect(&self, ctx: &ProcessingContext, root: usize) -> Collected {
        let agent_id = ctx.entries[root].agent_id.as_str();
        let mut collected = Collected::default();
        let mut visited = HashSet::new();
        let mut stack = vec![(root, None::<usize>)];

        while let Some((idx, ancestor)) = stack.pop() {
            if !visited.insert(idx) {
                continue;
            }
            if ctx.entries[idx].agent_id == agent_id {
                collected.reached_for_agent += 1;
            }

            let skip = idx != root && ctx.is_consumed_result(idx);
            let next_ancestor = if skip {
                ancestor
            } else {
                collected.entries.push(Placed {
                    index: idx,
                    parent: ancestor,
                });
                Some(idx)
            };

            let children: Vec<usize> = ctx.sidechain_children(idx).collect();
            for child in children.into_iter().rev() {
                if !visited.contains(&child) {
                    stack.push((child, next_ancestor));
                }
            }
        }

        collected
    }
}

/// Flat collection of every sidechain entry sharing the root's agent id,
/// ordered by raw timestamp. Ignores parent links entirely.
pub(crate) struct AgentScan;

impl CollectStrategy for AgentScan {
    fn name(&self) -> &'static str {
        "agent-scan"
    }

    fn collect(&self, ctx: &ProcessingContext, root: usize) -> Collected {
        let agent_id = ctx.entries[root].agent_id.as_str();
        let mut seen = HashSet::new();
        let mut reached = 0;
        let mut indices = Vec::new();

        for idx in ctx.agent_entries(agent_id) {
            reached += 1;
            if ctx.is_consumed_result(idx) {
                continue;
            }
            if seen.insert(ctx.entries[idx].uuid.as_str()) {
                indices.push(idx);
            }
        }

        // Stable: ties keep record order
        indices.sort_by(|&a, &b| ctx.entries[a].raw_timestamp.cmp(&ctx.entries[b].raw_timestamp));

        Collected {
            entries: indices
                .into_iter()
                .map(|index| Placed {
                    index,
                    parent: None,
                })
                .collect(),
            reached_for_agent: reached,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::match_tool_results;
    use cclog_testing::{RecordBuilder, build_all};
    use serde_json::json;

    fn context(builders: &[RecordBuilder]) -> ProcessingContext {
        let mut ctx = ProcessingContext::new(&build_all(builders));
        match_tool_results(&mut ctx);
        ctx
    }

    fn indices(collected: &Collected) -> Vec<usize> {
        collected.entries.iter().map(|p| p.index).collect()
    }

    #[test]
    fn test_tree_walk_depth_first() {
        let ctx = context(&[
            RecordBuilder::user("s1").sidechain("A").at(1),
            RecordBuilder::assistant("s2").parent("s1").sidechain("A").at(2),
            RecordBuilder::assistant("s3").parent("s1").sidechain("A").at(3),
            RecordBuilder::user("s4").parent("s2").sidechain("A").at(4),
            RecordBuilder::user("m1").parent("s1").at(5),
        ]);
        let collected = TreeWalk.collect(&ctx, 0);

        assert_eq!(indices(&collected), vec![0, 1, 3, 2]);
        assert_eq!(collected.entries[2].parent, Some(1));
        assert_eq!(collected.entries[3].parent, Some(0));
        assert_eq!(collected.reached_for_agent, 4);
    }

    #[test]
    fn test_tree_walk_skips_consumed_results_but_descends() {
        let ctx = context(&[
            RecordBuilder::user("s1").sidechain("A"),
            RecordBuilder::assistant("s2")
                .parent("s1")
                .sidechain("A")
                .tool_use("toolu_1", "Read", json!({})),
            RecordBuilder::tool_result("s3", "toolu_1", "file")
                .parent("s2")
                .sidechain("A"),
            RecordBuilder::assistant("s4").parent("s3").sidechain("A"),
        ]);
        let collected = TreeWalk.collect(&ctx, 0);

        assert_eq!(indices(&collected), vec![0, 1, 3]);
        assert_eq!(collected.entries[2].parent, Some(1), "attaches past the skipped result");
        assert_eq!(collected.reached_for_agent, 4);
    }

    #[test]
    fn test_tree_walk_survives_cycles() {
        let ctx = context(&[
            RecordBuilder::user("s1").parent("s2").sidechain("A"),
            RecordBuilder::assistant("s2").parent("s1").sidechain("A"),
        ]);
        let collected = TreeWalk.collect(&ctx, 0);

        assert_eq!(indices(&collected), vec![0, 1]);
    }

    #[test]
    fn test_agent_scan_sorted_by_timestamp() {
        let ctx = context(&[
            RecordBuilder::assistant("s3").sidechain("A").at(30),
            RecordBuilder::user("s1").sidechain("A").at(10),
            RecordBuilder::user("other").sidechain("B").at(5),
            RecordBuilder::assistant("s2").parent("gone").sidechain("A").at(20),
            RecordBuilder::assistant("main").at(1),
        ]);
        let collected = AgentScan.collect(&ctx, 1);

        assert_eq!(indices(&collected), vec![1, 3, 0]);
        assert!(collected.entries.iter().all(|p| p.parent.is_none()));
        assert_eq!(collected.reached_for_agent, 3);
    }

    #[test]
    fn test_agent_scan_excludes_consumed_and_duplicates() {
        let ctx = context(&[
            RecordBuilder::assistant("s1")
                .sidechain("A")
                .tool_use("toolu_1", "Read", json!({}))
                .at(1),
            RecordBuilder::tool_result("s2", "toolu_1", "x").sidechain("A").at(2),
            RecordBuilder::assistant("s1").sidechain("A").at(3),
        ]);
        let collected = AgentScan.collect(&ctx, 0);

        assert_eq!(indices(&collected), vec![0]);
    }
}
