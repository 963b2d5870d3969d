use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use fitbot::config::Config;

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Configuration pointing the Gemini client at a mock server
#[allow(dead_code)]
pub fn config_for_server(uri: &str, api_key: Option<&str>) -> Config {
    let mut config = Config::default();
    config.provider.api_base = uri.to_string();
    config.provider.api_key = api_key.map(str::to_string);
    config.provider.timeout_seconds = 5;
    config
}
