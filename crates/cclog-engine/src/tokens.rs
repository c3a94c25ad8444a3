use cclog_types::ProcessedEntry;

/// Compute `total_tokens` for every reachable entry.
///
/// An entry's total is its own input + cache-read + cache-creation tokens.
/// Output tokens are tracked separately and nested entries are never summed
/// into their owner; each is computed once where it lives.
pub fn aggregate_tokens(entries: &mut [ProcessedEntry]) {
    for entry in entries {
        aggregate_entry(entry);
    }
}

fn aggregate_entry(entry: &mut ProcessedEntry) {
    entry.tokens.total_tokens = entry.tokens.context_total();

    for call in &mut entry.tool_calls {
        if let Some(result) = call.result.as_deref_mut() {
            aggregate_entry(result);
        }
        aggregate_tokens(&mut call.task_entries);
    }
    aggregate_tokens(&mut entry.children);
}
