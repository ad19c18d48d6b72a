//! Loading configuration from a file on disk

use deck_dashboard::{DashboardError, DeckConfig};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn loads_explicit_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[auth]
client_id = "from-file"
redirect_uri = "http://127.0.0.1:8888/callback"

[api]
base_url = "http://localhost:9999/v1"
"#
    )
    .unwrap();

    let config = DeckConfig::load(Some(file.path())).unwrap();
    config.validate().unwrap();
    assert_eq!(config.auth.client_id, "from-file");
    assert_eq!(config.auth.redirect_uri, "http://127.0.0.1:8888/callback");
    assert_eq!(config.api.base_url, "http://localhost:9999/v1");
    assert_eq!(config.app.progress_interval_ms, 100);
}

#[test]
fn malformed_file_is_a_config_error() {
    let mut file: NamedTempFile = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[auth\nclient_id = ").unwrap();

    let result = DeckConfig::load(Some(file.path()));
    assert!(matches!(result, Err(DashboardError::Config(_))));
}
