// Decision log round trip
//
// Whatever the debug logger writes must load back through the replay engine:
// one JSON object per line with side, chosen move (or null), board and an RFC 3339
// timestamp. Opening a log truncates any previous content.

use othello_engine::config::Config;
use othello_engine::debug_logger::DebugLogger;
use othello_engine::replay::ReplayEngine;
use othello_engine::types::{Board, Side};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Per-test log path in the system temp directory
fn temp_log(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "othello_debug_{}_{}.jsonl",
        name,
        std::process::id()
    ))
}

fn replay_engine() -> ReplayEngine {
    let mut config = Config::default_hardcoded();
    config.search.depth = 2;
    ReplayEngine::new(config, false)
}

#[tokio::test]
async fn test_logged_decisions_load_back_into_replay() {
    let path = temp_log("round_trip");
    fs::write(&path, "left over from an earlier run\n").unwrap();

    let logger = DebugLogger::new(true, path.to_str().unwrap()).await;
    assert!(logger.is_enabled());

    logger
        .log_decision_now(Board::initial(), Side::Black, Some(20))
        .await;
    logger
        .log_decision_now(Board::empty(), Side::White, None)
        .await;

    // The stale line would fail to parse if the file had not been truncated
    let entries = replay_engine()
        .load_log_file(&path)
        .expect("log written by the debug logger should load");
    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0].side, Side::Black);
    assert_eq!(entries[0].chosen_move, Some(20));
    assert_eq!(entries[0].board, Board::initial());
    assert!(chrono::DateTime::parse_from_rfc3339(&entries[0].timestamp).is_ok());

    assert_eq!(entries[1].side, Side::White);
    assert_eq!(entries[1].chosen_move, None);
    assert_eq!(entries[1].board, Board::empty());

    let contents = fs::read_to_string(&path).unwrap();
    let first: Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
    assert_eq!(first["side"], "black");
    assert_eq!(first["chosen_move"], 20);
    assert_eq!(first["board"].as_array().unwrap().len(), 64);
    let second: Value = serde_json::from_str(contents.lines().nth(1).unwrap()).unwrap();
    assert_eq!(second["chosen_move"], Value::Null);

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn test_reopening_log_truncates_it() {
    let path = temp_log("truncate");

    let logger = DebugLogger::new(true, path.to_str().unwrap()).await;
    logger
        .log_decision_now(Board::initial(), Side::Black, Some(29))
        .await;
    assert!(!fs::read_to_string(&path).unwrap().is_empty());
    drop(logger);

    let reopened = DebugLogger::new(true, path.to_str().unwrap()).await;
    assert!(reopened.is_enabled());
    assert!(fs::read_to_string(&path).unwrap().is_empty());

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn test_disabled_logger_writes_nothing() {
    let path = temp_log("disabled");
    let _ = fs::remove_file(&path);

    let logger = DebugLogger::new(false, path.to_str().unwrap()).await;
    assert!(!logger.is_enabled());
    logger
        .log_decision_now(Board::initial(), Side::Black, Some(20))
        .await;
    assert!(!path.exists());

    assert!(!DebugLogger::disabled().is_enabled());
}
