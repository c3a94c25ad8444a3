use std::collections::HashMap;

use cclog_types::{ProcessedEntry, ToolPatterns, ToolSequenceEntry, ToolUsageStat, ToolUsageStats};

use super::SessionRef;

/// Per-tool usage counts, the call sequence and simple usage patterns.
///
/// `most_used` / `most_failed` name the first tool to reach the highest count,
/// in call order.
pub fn tool_usage(session: SessionRef<'_>, entries: &[ProcessedEntry]) -> ToolUsageStats {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, ToolUsageStat> = HashMap::new();
    let mut sequence = Vec::new();
    let mut patterns = ToolPatterns::default();
    let mut max_count = 0;
    let mut max_failed = 0;

    for call in entries.iter().flat_map(|e| &e.tool_calls) {
        let name = call.name.as_str();
        sequence.push(ToolSequenceEntry {
            name: call.name.clone(),
            tool_use_id: call.id.clone(),
        });
        if patterns.first_tool.is_empty() {
            patterns.first_tool = call.name.clone();
        }
        patterns.last_tool = call.name.clone();

        let stat = counts.entry(name).or_insert_with(|| {
            order.push(name);
            ToolUsageStat {
                name: call.name.clone(),
                count: 0,
                success: 0,
                failed: 0,
            }
        });
        stat.count += 1;
        if call.is_failed() {
            stat.failed += 1;
        } else {
            stat.success += 1;
        }

        if stat.count > max_count {
            max_count = stat.count;
            patterns.most_used = call.name.clone();
        }
        if stat.failed > max_failed {
            max_failed = stat.failed;
            patterns.most_failed = call.name.clone();
        }
    }

    let mut tools: Vec<ToolUsageStat> = order
        .into_iter()
        .filter_map(|name| counts.remove(name))
        .collect();
    tools.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    ToolUsageStats {
        session_id: session.session_id.to_string(),
        agent_id: session.agent(),
        tools,
        tool_sequence: sequence,
        patterns,
    }
}
