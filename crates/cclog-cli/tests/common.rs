//! Shared session fixture for the CLI integration tests.
#![allow(dead_code)]

use assert_cmd::Command;
use cclog_testing::{PROJECT_DIR, RecordBuilder, SESSION_ID, SessionWorld};
use serde_json::json;

/// A session with one attached sub-agent, one failed Bash call and one
/// unclaimed sidechain entry.
pub fn session_world() -> SessionWorld {
    SessionWorld::new()
        .with_session(PROJECT_DIR, SESSION_ID, &session_records())
        .with_subagent(
            PROJECT_DIR,
            SESSION_ID,
            "agent01",
            &[
                RecordBuilder::user("s1").sidechain("agent01").plain("Find the failing step").at(2),
                RecordBuilder::assistant("s2")
                    .parent("s1")
                    .sidechain("agent01")
                    .text("The linker step fails")
                    .at(19),
            ],
        )
}

pub fn session_records() -> Vec<RecordBuilder> {
    vec![
        RecordBuilder::user("u1").plain("Why does the build fail?").at(0),
        RecordBuilder::assistant("a1")
            .parent("u1")
            .task("toolu_1", "Find the failing step", "Explore")
            .usage(10, 5, 100, 0)
            .at(1),
        RecordBuilder::tool_result("r1", "toolu_1", "The linker step fails")
            .parent("a1")
            .result_agent("agent01")
            .at(20),
        RecordBuilder::assistant("a2")
            .parent("r1")
            .tool_use("toolu_2", "Bash", json!({"command": "cargo build"}))
            .at(21),
        RecordBuilder::tool_result("r2", "toolu_2", "error: linker failed")
            .parent("a2")
            .error()
            .at(22),
        RecordBuilder::user("x1").sidechain("stray").plain("unclaimed").at(23),
    ]
}

pub fn uuids(value: &serde_json::Value) -> Vec<String> {
    value["entries"]
        .as_array()
        .expect("entries array")
        .iter()
        .map(|e| e["uuid"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[allow(deprecated)]
pub fn cclog() -> Command {
    Command::cargo_bin("cclog").expect("cclog binary")
}
