use std::collections::{HashMap, HashSet};

use cclog_types::{ProcessedEntry, RawRecord};

use crate::sidechain::Reconciliation;
use crate::transform::transform_record;

/// Position of a tool call: (entry index, call index within the entry).
pub(crate) type CallRef = (usize, usize);

// NOTE: Processing context
//
// Passes 1-3 run over an arena of entries in record order and communicate only
// through this struct. Each pass owns a disjoint set of fields:
//
// - transform (new):      entries, index, children
// - matcher:              results, consumed
// - sidechain linker:     task_links, attached
//
// Entries themselves are never mutated after construction; the owned forest is
// materialized from the arena once all three passes are done.
pub(crate) struct ProcessingContext {
    /// Transformed entries in record order
    pub entries: Vec<ProcessedEntry>,
    /// uuid -> arena index (first occurrence wins)
    pub index: HashMap<String, usize>,
    /// parent uuid -> child arena indices in record order
    pub children: HashMap<String, Vec<usize>>,

    /// Tool call -> arena index of its result entry
    pub results: HashMap<CallRef, usize>,
    /// Result entries owned by a tool call
    pub consumed: HashSet<usize>,

    /// Task call -> reconciled sidechain
    pub task_links: HashMap<CallRef, Reconciliation>,
    /// Entries owned by an attached sidechain
    pub attached: HashSet<usize>,
}

impl ProcessingContext {
    /// Transform every record and build the lookup indices.
    pub fn new(records: &[RawRecord]) -> Self {
        let entries: Vec<ProcessedEntry> = records
            .iter()
            .filter(|r| !r.is_summary())
            .map(transform_record)
            .collect();

        let mut index = HashMap::with_capacity(entries.len());
        let mut children: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            index.entry(entry.uuid.clone()).or_insert(i);
            if !entry.parent_uuid.is_empty() {
                children.entry(entry.parent_uuid.clone()).or_default().push(i);
            }
        }

        Self {
            entries,
            index,
            children,
            results: HashMap::new(),
            consumed: HashSet::new(),
            task_links: HashMap::new(),
            attached: HashSet::new(),
        }
    }

    pub fn get(&self, uuid: &str) -> Option<&ProcessedEntry> {
        self.index.get(uuid).map(|&i| &self.entries[i])
    }

    /// Sidechain children of `idx`, in record order.
    pub fn sidechain_children(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.children
            .get(&self.entries[idx].uuid)
            .into_iter()
            .flatten()
            .copied()
            .filter(|&c| self.entries[c].is_sidechain)
    }

    /// A tool-result entry already owned by some tool call.
    pub fn is_consumed_result(&self, idx: usize) -> bool {
        self.entries[idx].is_tool_result && self.consumed.contains(&idx)
    }

    /// Entries sharing `agent_id` and the sidechain flag, in record order.
    pub fn agent_entries<'a>(&'a self, agent_id: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.entries
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.is_sidechain && e.agent_id == agent_id)
            .map(|(i, _)| i)
    }

    /// Entries displayed at the top level: neither a matched result nor part of an attached sidechain.
    pub fn top_level(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.entries.len()).filter(|i| !self.consumed.contains(i) && !self.attached.contains(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cclog_testing::{RecordBuilder, build_all};

    #[test]
    fn test_indices() {
        let records = build_all(&[
            RecordBuilder::summary("s0", "Fix tests"),
            RecordBuilder::user("u1"),
            RecordBuilder::assistant("a1").parent("u1"),
            RecordBuilder::assistant("a2").parent("u1").sidechain("agent"),
            RecordBuilder::user("u1").parent("a1"),
        ]);
        let ctx = ProcessingContext::new(&records);

        assert_eq!(ctx.entries.len(), 4, "summary records are dropped");
        assert_eq!(ctx.index["u1"], 0, "first occurrence wins");
        assert_eq!(ctx.children["u1"], vec![1, 2]);
        assert_eq!(ctx.sidechain_children(0).collect::<Vec<_>>(), vec![2]);
        assert_eq!(ctx.agent_entries("agent").collect::<Vec<_>>(), vec![2]);
        assert_eq!(ctx.get("a1").map(|e| e.uuid.as_str()), Some("a1"));
        assert!(ctx.get("missing").is_none());
    }
}
