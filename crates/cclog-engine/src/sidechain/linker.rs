use cclog_types::normalize_text;
use tracing::debug;

use super::Reconciliation;
use super::lookup::{first_user_message, last_assistant_message};
use crate::context::{CallRef, ProcessingContext};

/// A reconciled sidechain waiting for its Task call.
struct Candidate {
    reconciliation: Option<Reconciliation>,
    agent_id: String,
    /// Normalized first user message
    first_user: Option<String>,
    /// Normalized last assistant message
    last_assistant: Option<String>,
}

impl Candidate {
    fn is_open_for(&self, caller: usize) -> bool {
        self.reconciliation
            .as_ref()
            .is_some_and(|r| r.entries.iter().all(|p| p.index != caller))
    }
}

/// Attach reconciled sidechains to Task calls, in record order.
///
/// A Task call takes the first open sidechain that matches, trying in turn:
/// the agent id reported by its result, its prompt against the sidechain's
/// first user message, and its result text against the sidechain's last
/// assistant message. Every sidechain is attached at most once; the rest stay
/// at the top level.
pub(crate) fn link_task_calls(ctx: &mut ProcessingContext, reconciled: Vec<Reconciliation>) {
    let mut candidates: Vec<Candidate> = reconciled
        .into_iter()
        .map(|rec| Candidate {
            agent_id: ctx.entries[rec.root].agent_id.clone(),
            first_user: first_user_message(ctx, rec.root).map(|s| normalize_text(&s)),
            last_assistant: last_assistant_message(ctx, rec.root).map(|s| normalize_text(&s)),
            reconciliation: Some(rec),
        })
        .collect();

    let task_calls: Vec<CallRef> = ctx
        .entries
        .iter()
        .enumerate()
        .flat_map(|(i, entry)| {
            entry
                .tool_calls
                .iter()
                .enumerate()
                .filter(|(_, call)| call.is_task())
                .map(move |(j, _)| (i, j))
        })
        .collect();

    for call_ref in task_calls {
        let Some(pos) = choose_sidechain(ctx, call_ref, &candidates) else {
            debug!(
                tool_use_id = %ctx.entries[call_ref.0].tool_calls[call_ref.1].id,
                "no sidechain found for task call"
            );
            continue;
        };
        if let Some(rec) = candidates[pos].reconciliation.take() {
            ctx.attached.extend(rec.entries.iter().map(|p| p.index));
            ctx.task_links.insert(call_ref, rec);
        }
    }
}

fn choose_sidechain(
    ctx: &ProcessingContext,
    (i, j): CallRef,
    candidates: &[Candidate],
) -> Option<usize> {
    let call = &ctx.entries[i].tool_calls[j];
    let result = ctx.results.get(&(i, j)).map(|&k| &ctx.entries[k]);
    let find = |pred: &dyn Fn(&Candidate) -> bool| {
        candidates.iter().position(|c| c.is_open_for(i) && pred(c))
    };

    if let Some(agent_id) = result.map(|r| r.result_agent_id.as_str()) {
        if !agent_id.is_empty() {
            if let Some(pos) = find(&|c: &Candidate| c.agent_id == agent_id) {
                return Some(pos);
            }
        }
    }

    let prompt = call.prompt().map(normalize_text).unwrap_or_default();
    if !prompt.is_empty() {
        if let Some(pos) = find(&|c: &Candidate| c.first_user.as_deref() == Some(prompt.as_str())) {
            return Some(pos);
        }
    }

    let output = result.map(|r| normalize_text(&r.content)).unwrap_or_default();
    if !output.is_empty() {
        return find(&|c: &Candidate| {
            c.last_assistant
                .as_deref()
                .is_some_and(|last| !last.is_empty() && output.contains(last))
        });
    }

    None
}
