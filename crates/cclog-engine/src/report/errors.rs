use cclog_types::{ErrorCategories, ProcessedEntry, SessionError, SessionErrors, truncate};

use super::{SessionRef, sidechain_label};

const MESSAGE_LIMIT: usize = 500;
const TOOL_ERROR: &str = "tool_error";

/// Entry-level errors and failed tool results, in entry order.
///
/// `limit` of 0 keeps everything; `total_errors` is always the count before
/// the limit.
pub fn collect_errors(
    session: SessionRef<'_>,
    entries: &[ProcessedEntry],
    limit: usize,
) -> SessionErrors {
    let mut categories = ErrorCategories::default();
    let mut errors = Vec::new();

    for (i, entry) in entries.iter().enumerate() {
        if entry.is_error {
            categories.tool_error += 1;
            errors.push(SessionError {
                uuid: entry.uuid.clone(),
                timestamp: entry.timestamp.clone(),
                error_type: TOOL_ERROR.to_string(),
                tool_name: String::new(),
                message: truncate(&entry.content, MESSAGE_LIMIT),
                sidechain: sidechain_label(entry),
                entry_index: i,
            });
        }

        for call in &entry.tool_calls {
            let Some(result) = call.result.as_deref().filter(|r| r.is_error) else {
                continue;
            };
            categories.tool_error += 1;
            errors.push(SessionError {
                uuid: entry.uuid.clone(),
                timestamp: result.timestamp.clone(),
                error_type: TOOL_ERROR.to_string(),
                tool_name: call.name.clone(),
                message: truncate(&result.content, MESSAGE_LIMIT),
                sidechain: sidechain_label(entry),
                entry_index: i,
            });
        }

        if is_console_error(&entry.content) {
            categories.console_error += 1;
        }
    }

    let total_errors = errors.len();
    if limit > 0 {
        errors.truncate(limit);
    }

    SessionErrors {
        session_id: session.session_id.to_string(),
        agent_id: session.agent(),
        total_errors,
        errors,
        categories,
    }
}

/// Browser console output that mentions an error.
fn is_console_error(content: &str) -> bool {
    content.contains("console") && content.to_lowercase().contains("error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process_entries;
    use cclog_testing::{RecordBuilder, build_all};
    use serde_json::json;

    #[test]
    fn test_collect_errors() {
        let long = "x".repeat(600);
        let entries = process_entries(&build_all(&[
            RecordBuilder::assistant("a1")
                .tool_use("toolu_1", "Bash", json!({"command": "make"}))
                .at(0),
            RecordBuilder::tool_result("r1", "toolu_1", &long).parent("a1").error().at(5),
            RecordBuilder::tool_result("orphan", "toolu_missing", "permission denied")
                .sidechain("A")
                .error()
                .at(6),
            RecordBuilder::user("c1").plain("browser console: Error loading script").at(7),
        ]));

        let errors = collect_errors(SessionRef::new("s-1", "proj"), &entries, 0);

        assert_eq!(errors.total_errors, 2);
        let first = &errors.errors[0];
        assert_eq!(first.uuid, "a1");
        assert_eq!(first.timestamp, "10:00:05");
        assert_eq!(first.tool_name, "Bash");
        assert_eq!(first.message.chars().count(), 503);
        assert_eq!(first.entry_index, 0);

        let second = &errors.errors[1];
        assert_eq!(second.uuid, "orphan");
        assert_eq!(second.sidechain, "A");
        assert_eq!(second.message, "permission denied");
        assert_eq!(second.entry_index, 1);

        assert_eq!(
            errors.categories,
            ErrorCategories {
                tool_error: 2,
                console_error: 1,
                validation_error: 0,
            }
        );
    }

    #[test]
    fn test_limit_keeps_total() {
        let entries = process_entries(&build_all(&[
            RecordBuilder::tool_result("e1", "toolu_a", "one").error(),
            RecordBuilder::tool_result("e2", "toolu_b", "two").error(),
            RecordBuilder::tool_result("e3", "toolu_c", "three").error(),
        ]));

        let errors = collect_errors(SessionRef::new("s-1", "proj"), &entries, 2);

        assert_eq!(errors.total_errors, 3);
        let uuids: Vec<&str> = errors.errors.iter().map(|e| e.uuid.as_str()).collect();
        assert_eq!(uuids, vec!["e1", "e2"]);
    }
}
