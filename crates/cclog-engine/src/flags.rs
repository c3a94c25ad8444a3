use cclog_types::ProcessedEntry;

/// Mark tool calls without a result, and Task calls without a sidechain.
///
/// Purely informational: nothing is removed. Walks task entries and children.
pub fn flag_missing(entries: &mut [ProcessedEntry]) {
    for entry in entries {
        flag_entry(entry);
    }
}

fn flag_entry(entry: &mut ProcessedEntry) {
    for call in &mut entry.tool_calls {
        flag_missing(&mut call.task_entries);

        call.has_missing_result = call.result.is_none();
        call.has_missing_sidechain = call.is_task() && call.task_entries.is_empty();
    }
    flag_missing(&mut entry.children);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cclog_types::ToolCall;
    use serde_json::Value;

    fn with_calls(calls: Vec<ToolCall>) -> ProcessedEntry {
        ProcessedEntry {
            tool_calls: calls,
            ..Default::default()
        }
    }

    #[test]
    fn test_flags() {
        let mut answered = ToolCall::new("toolu_1", "Bash", Value::Null);
        answered.result = Some(Box::default());
        let unanswered = ToolCall::new("toolu_2", "Read", Value::Null);
        let lonely_task = ToolCall::new("toolu_3", "Task", Value::Null);

        let mut entries = vec![with_calls(vec![answered, unanswered, lonely_task])];
        flag_missing(&mut entries);

        let calls = &entries[0].tool_calls;
        assert!(!calls[0].has_missing_result);
        assert!(calls[1].has_missing_result);
        assert!(!calls[1].has_missing_sidechain);
        assert!(calls[2].has_missing_result);
        assert!(calls[2].has_missing_sidechain);
    }

    #[test]
    fn test_flags_nested_task_entries_and_children() {
        let inner = with_calls(vec![ToolCall::new("toolu_9", "Grep", Value::Null)]);
        let mut child = ProcessedEntry::default();
        child.children.push(inner);

        let mut task = ToolCall::new("toolu_1", "Task", Value::Null);
        task.task_entries.push(child);
        let mut entries = vec![with_calls(vec![task])];

        flag_missing(&mut entries);

        let task = &entries[0].tool_calls[0];
        assert!(!task.has_missing_sidechain);
        assert!(task.has_missing_result);
        assert!(task.task_entries[0].children[0].tool_calls[0].has_missing_result);
    }
}
