use cclog_providers::{
    ClaudeDir, ListSessionsOptions, find_agent_file, find_sessions_by_agent_type, list_sessions,
    session_info,
};
use cclog_testing::{PROJECT_DIR, RecordBuilder, SESSION_ID, SessionWorld};

const OTHER_SESSION: &str = "0a7d2c41-5b6e-4f80-9c13-2e4b6d8f0a11";

fn world() -> SessionWorld {
    SessionWorld::new()
        .with_session(
            PROJECT_DIR,
            SESSION_ID,
            &[
                RecordBuilder::user("u1")
                    .plain(&"Refactor the parser ".repeat(20))
                    .cwd("/Users/test/proj")
                    .git_branch("main")
                    .at(0),
                RecordBuilder::assistant("a1")
                    .parent("u1")
                    .task("toolu_1", "Map the parser module", "Explore")
                    .task("toolu_2", "Write the tests", "test-writer")
                    .task("toolu_3", "Check error paths", "explore")
                    .at(600),
            ],
        )
        .with_subagent(
            PROJECT_DIR,
            SESSION_ID,
            "a1b2c3",
            &[RecordBuilder::user("s1").sidechain("a1b2c3").plain("Map the parser module").at(30)],
        )
        .with_session(
            PROJECT_DIR,
            OTHER_SESSION,
            &[RecordBuilder::user("o1").plain("hello").at(3600)],
        )
        .with_raw_file(PROJECT_DIR, "agent-ffff.jsonl", "")
}

#[test]
fn test_list_sessions_newest_first() {
    let world = world();
    let claude = ClaudeDir::new(world.claude_dir());
    let project = claude.find_project("proj").unwrap().unwrap();

    let sessions = list_sessions(
        &claude,
        &project,
        ListSessionsOptions {
            include_agent_types: true,
            ..Default::default()
        },
    )
    .unwrap();

    let ids: Vec<&str> = sessions.iter().map(|s| s.session_id.as_str()).collect();
    assert_eq!(ids, vec![OTHER_SESSION, SESSION_ID]);

    let main = &sessions[1];
    assert_eq!(main.project, "proj");
    assert_eq!(main.message_count, 3, "sub-agent records are counted");
    assert_eq!(main.cwd, "/Users/test/proj");
    assert_eq!(main.git_branch, "main");
    assert_eq!(main.first_user_message.chars().count(), 203);
    assert!(main.first_user_message.ends_with("..."));
    assert_eq!(main.agent_types_used, vec!["Explore", "explore", "test-writer"]);
    assert_eq!(
        main.end_time.unwrap() - main.start_time.unwrap(),
        chrono::Duration::minutes(10)
    );

    let limited = list_sessions(
        &claude,
        &project,
        ListSessionsOptions {
            limit: 1,
            days: 7,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(limited.len(), 1);
    assert!(limited[0].agent_types_used.is_empty());
}

#[test]
fn test_session_info_of_empty_file() {
    let world = SessionWorld::new().with_raw_file(PROJECT_DIR, &format!("{}.jsonl", SESSION_ID), "\n");
    let path = world.session_path(PROJECT_DIR, SESSION_ID);

    assert!(session_info(&path, SESSION_ID, "proj", false).unwrap().is_none());
}

#[test]
fn test_find_agent_file() {
    let world = world();
    let project_dir = world.project_dir(PROJECT_DIR);

    let direct = find_agent_file(&project_dir, "", "ffff").unwrap();
    assert!(direct.ends_with("agent-ffff.jsonl"));

    let nested = find_agent_file(&project_dir, SESSION_ID, "a1b2c3").unwrap();
    assert!(nested.ends_with(format!("{}/subagents/agent-a1b2c3.jsonl", SESSION_ID)));

    let searched = find_agent_file(&project_dir, "unknown-session", "a1b2c3");
    assert_eq!(searched, Some(nested));

    assert!(find_agent_file(&project_dir, SESSION_ID, "missing").is_none());
}

#[test]
fn test_find_sessions_by_agent_type() {
    let world = world();
    let claude = ClaudeDir::new(world.claude_dir());

    let usages = find_sessions_by_agent_type(&claude, "EXPLORE", None, 0, 10).unwrap();

    assert_eq!(usages.len(), 1);
    assert_eq!(usages[0].session_id, SESSION_ID);
    assert_eq!(usages[0].usage_count, 2);
    assert_eq!(
        usages[0].prompts,
        vec!["Map the parser module", "Check error paths"]
    );

    assert!(
        find_sessions_by_agent_type(&claude, "reviewer", Some("proj"), 0, 0)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_huge_day_window_keeps_everything() {
    let world = world();
    let claude = ClaudeDir::new(world.claude_dir());
    let project = claude.find_project("proj").unwrap().unwrap();

    let sessions = list_sessions(
        &claude,
        &project,
        ListSessionsOptions {
            days: u32::MAX,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(sessions.len(), 2);

    let usages = find_sessions_by_agent_type(&claude, "Explore", None, u32::MAX, 0).unwrap();
    assert_eq!(usages.len(), 1);
}
