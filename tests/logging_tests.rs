//! Subscriber installation; kept in its own binary because the global
//! subscriber can only be set once per process

use screenshot_overlay::util::logging::{init_json_tracing, init_tracing};

#[test]
fn test_json_tracing_installs_once() {
    init_json_tracing(Some("screenshot_overlay=debug")).unwrap();
    tracing::info!(session = "session-1", "json subscriber ready");

    assert!(init_json_tracing(None).is_err());
    assert!(init_tracing(None).is_err());
}
