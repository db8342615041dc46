//! Integration tests for logger behavior.

use gpa_calc::logger::{set_level, set_level_from_str, Level};
use gpa_calc::{debug, error, info, verbose, warn};

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("warn"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("debug"));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
    verbose!("verbose integration");
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_writes_tagged_lines() {
    use gpa_calc::logger::init_file_logging;

    let dir = tempfile::tempdir().expect("temp dir");
    let log_path = dir.path().join("logs").join("gpacalc.log");

    assert!(init_file_logging(&log_path));
    error!("merged {} courses", 14);

    let contents = std::fs::read_to_string(&log_path).expect("read log");
    assert!(contents.contains("[ERROR] merged 14 courses"));
}

#[cfg(feature = "log-debug")]
#[test]
fn debug_respects_runtime_flag() {
    use gpa_calc::logger::{disable_debug, enable_debug};
    set_level(Level::Debug);
    disable_debug();
    debug!("should be silent");
    enable_debug();
    debug!("should emit");
}
