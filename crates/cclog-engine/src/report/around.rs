use cclog_types::{ContextLog, LogsAroundEntry, ProcessedEntry, truncate};

use super::SessionRef;

const CONTENT_LIMIT: usize = 5000;
const DEFAULT_OFFSET: i64 = -3;

/// Entries surrounding `target_uuid` on the top level.
///
/// A negative offset returns up to `|offset|` entries before the target and the
/// target itself; a positive one returns the target and up to `offset` entries
/// after it. Zero means the default of three entries before. `None` when the
/// target is not a top-level entry.
pub fn logs_around(
    session: SessionRef<'_>,
    entries: &[ProcessedEntry],
    target_uuid: &str,
    offset: i64,
) -> Option<LogsAroundEntry> {
    let target = entries.iter().position(|e| e.uuid == target_uuid)?;
    let offset = if offset == 0 { DEFAULT_OFFSET } else { offset };

    let window = offset.unsigned_abs() as usize;
    let (start, end) = if offset < 0 {
        (target.saturating_sub(window), target)
    } else {
        (target, target.saturating_add(window).min(entries.len() - 1))
    };

    let logs = (start..=end)
        .map(|i| context_log(&entries[i], i as i64 - target as i64))
        .collect();

    Some(LogsAroundEntry {
        session_id: session.session_id.to_string(),
        project: session.project.to_string(),
        target_uuid: target_uuid.to_string(),
        target_index: target,
        offset,
        entries: logs,
        total_count: entries.len(),
    })
}

/// Context view of one entry, carrying the details of its first tool call.
pub fn context_log(entry: &ProcessedEntry, offset: i64) -> ContextLog {
    let mut log = ContextLog {
        offset,
        timestamp: entry.timestamp.clone(),
        role: entry.role.clone(),
        content: truncate(&entry.content, CONTENT_LIMIT),
        tool_name: String::new(),
        tool_use_id: String::new(),
        tool_input: serde_json::Value::Null,
        tool_output: String::new(),
        is_tool_result: entry.is_tool_result,
        is_error: entry.is_error,
    };

    if let Some(call) = entry.tool_calls.first() {
        log.tool_name = match entry.tool_calls.len() {
            1 => call.name.clone(),
            n => format!("{} (+{} more)", call.name, n - 1),
        };
        log.tool_use_id = call.id.clone();
        log.tool_input = call.input.clone();
        if let Some(result) = &call.result {
            log.tool_output = truncate(&result.content, CONTENT_LIMIT);
        }
    }

    log
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process_entries;
    use cclog_testing::{RecordBuilder, build_all};
    use serde_json::json;

    fn entries() -> Vec<ProcessedEntry> {
        let builders: Vec<RecordBuilder> = (0..6)
            .map(|i| RecordBuilder::user(&format!("u{}", i)).plain(&format!("message {}", i)).at(i))
            .collect();
        process_entries(&build_all(&builders))
    }

    fn offsets(result: &LogsAroundEntry) -> Vec<i64> {
        result.entries.iter().map(|e| e.offset).collect()
    }

    #[test]
    fn test_default_offset_looks_back() {
        let result = logs_around(SessionRef::new("s-1", "proj"), &entries(), "u4", 0).unwrap();

        assert_eq!(result.offset, -3);
        assert_eq!(result.target_index, 4);
        assert_eq!(result.total_count, 6);
        assert_eq!(offsets(&result), vec![-3, -2, -1, 0]);
        assert_eq!(result.entries[0].content, "message 1");
    }

    #[test]
    fn test_windows_clamp_at_edges() {
        let entries = entries();
        let session = SessionRef::new("s-1", "proj");

        let before = logs_around(session, &entries, "u1", -3).unwrap();
        assert_eq!(offsets(&before), vec![-1, 0]);

        let after = logs_around(session, &entries, "u4", 5).unwrap();
        assert_eq!(offsets(&after), vec![0, 1]);
        assert_eq!(after.entries[1].content, "message 5");
    }

    #[test]
    fn test_unknown_target() {
        assert!(logs_around(SessionRef::new("s-1", "proj"), &entries(), "nope", 2).is_none());
    }

    #[test]
    fn test_context_log_tool_details() {
        let entries = process_entries(&build_all(&[
            RecordBuilder::assistant("a1")
                .tool_use("toolu_1", "Read", json!({"file_path": "src/lib.rs"}))
                .tool_use("toolu_2", "Read", json!({"file_path": "src/main.rs"}))
                .tool_use("toolu_3", "Grep", json!({"pattern": "fn main"})),
            RecordBuilder::tool_result("r1", "toolu_1", "pub mod engine;").parent("a1"),
        ]));

        let log = context_log(&entries[0], -1);

        insta::assert_json_snapshot!(log, @r#"
        {
          "offset": -1,
          "timestamp": "10:00:00",
          "role": "assistant",
          "content": "",
          "tool_name": "Read (+2 more)",
          "tool_use_id": "toolu_1",
          "tool_input": {
            "file_path": "src/lib.rs"
          },
          "tool_output": "pub mod engine;"
        }
        "#);
    }
}
