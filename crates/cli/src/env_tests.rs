use serial_test::serial;

use super::*;

#[test]
#[serial]
fn project_root_defaults_to_current_dir() {
    std::env::remove_var("SIGMAQ_PROJECT_ROOT");
    assert_eq!(project_root().unwrap(), std::env::current_dir().unwrap());
}

#[test]
#[serial]
fn project_root_honors_override() {
    std::env::set_var("SIGMAQ_PROJECT_ROOT", "/tmp/sigmaq-test-root");
    assert_eq!(project_root().unwrap(), std::path::PathBuf::from("/tmp/sigmaq-test-root"));
    std::env::remove_var("SIGMAQ_PROJECT_ROOT");
}

#[test]
#[serial]
fn log_filter_defaults_to_info() {
    std::env::remove_var("SIGMAQ_LOG");
    std::env::remove_var("RUST_LOG");
    assert_eq!(log_filter(), "info");
}

#[test]
#[serial]
fn log_filter_prefers_sigmaq_log_over_rust_log() {
    std::env::set_var("RUST_LOG", "warn");
    std::env::set_var("SIGMAQ_LOG", "debug");
    assert_eq!(log_filter(), "debug");
    std::env::remove_var("SIGMAQ_LOG");
    std::env::remove_var("RUST_LOG");
}
