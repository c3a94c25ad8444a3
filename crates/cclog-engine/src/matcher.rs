use std::collections::HashMap;

use crate::context::ProcessingContext;

/// Pair every assistant tool call with the first later, unclaimed result entry
/// carrying its id.
///
/// Matching is by correlation id, not proximity: a result may sit anywhere after
/// its call. A result is attached to at most one call; calls without a result
/// stay unmatched and are flagged later.
pub(crate) fn match_tool_results(ctx: &mut ProcessingContext) {
    let mut results_by_id: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, entry) in ctx.entries.iter().enumerate() {
        if entry.is_tool_result && !entry.tool_result_id.is_empty() {
            results_by_id
                .entry(entry.tool_result_id.as_str())
                .or_default()
                .push(i);
        }
    }

    for (i, entry) in ctx.entries.iter().enumerate() {
        if !entry.is_assistant() {
            continue;
        }
        for (j, call) in entry.tool_calls.iter().enumerate() {
            let Some(candidates) = results_by_id.get(call.id.as_str()) else {
                continue;
            };
            let found = candidates
                .iter()
                .copied()
                .find(|&k| k > i && !ctx.consumed.contains(&k));
            if let Some(k) = found {
                ctx.results.insert((i, j), k);
                ctx.consumed.insert(k);
            }
        }
    }
}
