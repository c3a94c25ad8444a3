mod common;

use cclog_testing::{PROJECT_DIR, RecordBuilder, SESSION_ID, SessionWorld};
use common::{cclog, session_world};
use predicates::prelude::*;

#[test]
fn test_projects_json() {
    let world = session_world().with_project("-Users-test-empty");
    let result = world
        .run(&["projects", "--sort", "name", "--format", "json"])
        .unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    let projects = result.json().unwrap();
    let names: Vec<&str> = projects
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["empty", "proj"]);
    assert_eq!(projects[1]["path"], "/Users/test/proj");
    assert_eq!(projects[1]["session_count"], 1);
}

#[test]
fn test_projects_plain_when_empty() {
    let world = SessionWorld::new();
    let result = world.run(&["projects"]).unwrap();

    assert!(result.success());
    assert_eq!(result.stdout().trim(), "No projects found");
}

#[test]
fn test_sessions_with_agent_types() {
    let world = session_world();
    let result = world
        .run(&["sessions", "proj", "--agent-types", "--format", "json"])
        .unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    let sessions = result.json().unwrap();
    assert_eq!(sessions[0]["session_id"], SESSION_ID);
    assert_eq!(sessions[0]["agent_types_used"], serde_json::json!(["Explore"]));
    assert_eq!(sessions[0]["first_user_message"], "Why does the build fail?");
}

#[test]
fn test_sessions_unknown_project_fails() {
    let world = session_world();
    let mut cmd = cclog();
    world
        .configure_command(&mut cmd)
        .args(["sessions", "nothing-like-this"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project not found: nothing-like-this"));
}

#[test]
fn test_sessions_limit_defaults_from_config() {
    let second = "0b7d5f0e-1c2a-4e3b-8f6a-5d4c3b2a1f00";
    let world = session_world()
        .with_session(PROJECT_DIR, second, &[RecordBuilder::user("v1").plain("later").at(3600)])
        .with_config("default_limit = 1\n");
    let result = world.run(&["sessions", "proj", "--format", "json"]).unwrap();

    assert!(result.success());
    let sessions = result.json().unwrap();
    assert_eq!(sessions.as_array().unwrap().len(), 1);
    assert_eq!(sessions[0]["session_id"], second);
}

#[test]
fn test_agent_sessions_case_insensitive() {
    let world = session_world();
    let result = world
        .run(&["agent-sessions", "explore", "--format", "json"])
        .unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    let usages = result.json().unwrap();
    assert_eq!(usages.as_array().unwrap().len(), 1);
    assert_eq!(usages[0]["session_id"], SESSION_ID);
    assert_eq!(usages[0]["usage_count"], 1);
    assert_eq!(usages[0]["prompts"][0], "Find the failing step");
}

#[test]
fn test_agent_sessions_plain_no_match() {
    let world = session_world();
    let result = world.run(&["agent-sessions", "Plan"]).unwrap();

    assert!(result.success());
    assert!(result.stdout().contains("No matching sessions found"));
}
