use std::collections::{HashMap, HashSet};

use cclog_types::ProcessedEntry;

use crate::context::ProcessingContext;
use crate::sidechain::Reconciliation;

/// Turn the arena into the owned output forest.
///
/// Top-level entries come out in record order. Matched results move under their
/// tool call, attached sidechains under their Task call. Every arena entry is
/// materialized at most once, so the forest stays acyclic even for malformed
/// input that links a sidechain back to its own caller.
pub(crate) fn materialize(ctx: &ProcessingContext) -> Vec<ProcessedEntry> {
    let mut builder = ForestBuilder {
        ctx,
        emitted: HashSet::new(),
    };

    ctx.top_level()
        .filter_map(|idx| builder.entry(idx, 0))
        .collect()
}

struct ForestBuilder<'a> {
    ctx: &'a ProcessingContext,
    emitted: HashSet<usize>,
}

impl ForestBuilder<'_> {
    fn entry(&mut self, idx: usize, depth: usize) -> Option<ProcessedEntry> {
        if !self.emitted.insert(idx) {
            return None;
        }

        let ctx = self.ctx;
        let mut entry = ctx.entries[idx].clone();
        entry.depth = depth;

        for j in 0..entry.tool_calls.len() {
            if let Some(&result_idx) = ctx.results.get(&(idx, j)) {
                entry.tool_calls[j].result = self.entry(result_idx, depth + 1).map(Box::new);
            }
            if let Some(rec) = ctx.task_links.get(&(idx, j)) {
                entry.tool_calls[j].task_entries = self.sidechain(rec, depth + 1);
            }
        }

        Some(entry)
    }

    /// Nest each sidechain entry under its nearest emitted ancestor.
    fn sidechain(&mut self, rec: &Reconciliation, depth: usize) -> Vec<ProcessedEntry> {
        let mut kids: HashMap<usize, Vec<usize>> = HashMap::new();
        let mut tops = Vec::new();
        for placed in &rec.entries {
            match placed.parent {
                Some(parent) => kids.entry(parent).or_default().push(placed.index),
                None => tops.push(placed.index),
            }
        }

        let mut walked = HashSet::new();
        let mut out = Vec::new();
        for idx in tops {
            out.extend(self.nested(idx, depth, &kids, &mut walked));
        }
        out
    }

    /// The subtree at `idx`, or its children lifted one level when `idx` was
    /// already emitted elsewhere.
    fn nested(
        &mut self,
        idx: usize,
        depth: usize,
        kids: &HashMap<usize, Vec<usize>>,
        walked: &mut HashSet<usize>,
    ) -> Vec<ProcessedEntry> {
        if !walked.insert(idx) {
            return Vec::new();
        }

        let entry = self.entry(idx, depth);
        let child_depth = if entry.is_some() { depth + 1 } else { depth };
        let mut children = Vec::new();
        for &child in kids.get(&idx).into_iter().flatten() {
            children.extend(self.nested(child, child_depth, kids, walked));
        }

        match entry {
            Some(mut entry) => {
                entry.children = children;
                vec![entry]
            }
            None => children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::match_tool_results;
    use crate::sidechain::{Placed, link_sidechains};
    use cclog_testing::{RecordBuilder, build_all};
    use serde_json::json;

    fn forest(builders: &[RecordBuilder]) -> Vec<ProcessedEntry> {
        let mut ctx = ProcessingContext::new(&build_all(builders));
        match_tool_results(&mut ctx);
        link_sidechains(&mut ctx);
        materialize(&ctx)
    }

    #[test]
    fn test_results_move_under_calls() {
        let roots = forest(&[
            RecordBuilder::user("u1"),
            RecordBuilder::assistant("a1")
                .parent("u1")
                .tool_use("toolu_1", "Bash", json!({"command": "ls"})),
            RecordBuilder::tool_result("r1", "toolu_1", "Cargo.toml").parent("a1"),
            RecordBuilder::assistant("a2").parent("r1"),
        ]);

        let uuids: Vec<&str> = roots.iter().map(|e| e.uuid.as_str()).collect();
        assert_eq!(uuids, vec!["u1", "a1", "a2"]);

        let result = roots[1].tool_calls[0].result.as_deref().unwrap();
        assert_eq!(result.uuid, "r1");
        assert_eq!(result.depth, 1);
        assert!(roots.iter().all(|e| e.depth == 0));
    }

    #[test]
    fn test_sidechain_nested_under_task_call() {
        let roots = forest(&[
            RecordBuilder::assistant("a1").task("toolu_1", "Explore the repo", "Explore"),
            RecordBuilder::user("s1").sidechain("A").plain("Explore the repo"),
            RecordBuilder::assistant("s2")
                .parent("s1")
                .sidechain("A")
                .tool_use("toolu_2", "Glob", json!({"pattern": "*.rs"})),
            RecordBuilder::tool_result("s3", "toolu_2", "lib.rs")
                .parent("s2")
                .sidechain("A"),
            RecordBuilder::assistant("s4").parent("s3").sidechain("A").text("Done"),
            RecordBuilder::tool_result("r1", "toolu_1", "Done").parent("a1"),
        ]);

        assert_eq!(roots.len(), 1);
        let task = &roots[0].tool_calls[0];
        assert_eq!(task.result.as_deref().map(|r| r.uuid.as_str()), Some("r1"));

        // s1 -> s2 -> s4 (s3 lives under s2's Glob call)
        assert_eq!(task.task_entries.len(), 1);
        let s1 = &task.task_entries[0];
        assert_eq!((s1.uuid.as_str(), s1.depth), ("s1", 1));
        let s2 = &s1.children[0];
        assert_eq!((s2.uuid.as_str(), s2.depth), ("s2", 2));
        assert_eq!(
            s2.tool_calls[0].result.as_deref().map(|r| r.uuid.as_str()),
            Some("s3")
        );
        let s4 = &s2.children[0];
        assert_eq!((s4.uuid.as_str(), s4.depth), ("s4", 3));
    }

    #[test]
    fn test_sidechain_never_attached_to_own_caller() {
        // The Task caller is itself part of the sidechain it would receive
        let roots = forest(&[
            RecordBuilder::user("s1").sidechain("A").plain("loop"),
            RecordBuilder::assistant("s2")
                .parent("s1")
                .sidechain("A")
                .task("toolu_1", "loop", "Explore"),
        ]);

        let total: usize = roots.iter().map(ProcessedEntry::subtree_len).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_children_of_emitted_entry_keep_their_place() {
        let mut ctx = ProcessingContext::new(&build_all(&[
            RecordBuilder::assistant("a1")
                .task("toolu_1", "first", "Explore")
                .task("toolu_2", "second", "Explore"),
            RecordBuilder::user("s1").sidechain("A").plain("first"),
            RecordBuilder::assistant("s2").parent("s1").sidechain("A").text("Done"),
        ]));
        let placed = |index, parent| Placed { index, parent };
        ctx.task_links.insert(
            (0, 0),
            Reconciliation {
                root: 1,
                strategy: "tree-walk",
                entries: vec![placed(1, None)],
            },
        );
        ctx.task_links.insert(
            (0, 1),
            Reconciliation {
                root: 1,
                strategy: "tree-walk",
                entries: vec![placed(1, None), placed(2, Some(1))],
            },
        );
        ctx.attached.extend([1, 2]);

        let roots = materialize(&ctx);

        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].subtree_len(), 3);
        let second = &roots[0].tool_calls[1].task_entries;
        assert_eq!(second.len(), 1);
        assert_eq!((second[0].uuid.as_str(), second[0].depth), ("s2", 1));
    }
}
