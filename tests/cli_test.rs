use httpmock::prelude::*;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn write_config(dir: &Path, url: &str) -> String {
    write_config_with(dir, url, "0.0", "INFO")
}

fn write_config_with(dir: &Path, url: &str, delay: &str, level: &str) -> String {
    let config_path = dir.join("crits_import.toml");
    let log_path = dir.join("import.log");
    std::fs::write(
        &config_path,
        format!(
            r#"
[crits]
url = "{}"
user = "analyst"
key = "secret-key"
source = "ExampleFeed"

[importer]
delay = {}

[logging]
filename = '{}'
level = "{}"
"#,
            url,
            delay,
            log_path.display(),
            level
        ),
    )
    .unwrap();
    config_path.to_string_lossy().to_string()
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_crits-import"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_placeholder_url_exits_before_submitting() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path(), "<https://127.0.0.1>");

    let output = run(&["-d", "example.com", "-c", &config]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let log = std::fs::read_to_string(temp_dir.path().join("import.log")).unwrap();
    assert!(log.contains("Configuration validation failed"));
    assert!(!log.contains("Submitted domain"));
}

#[test]
fn test_missing_target_is_usage_error() {
    let output = run(&["-l"]);
    assert!(!output.status.success());
}

#[test]
fn test_list_and_folder_exit_without_requests() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });
    let config = write_config(temp_dir.path(), &server.base_url());

    let output = run(&["-s", temp_dir.path().to_str().unwrap(), "-l", "-f", "-c", &config]);

    assert_eq!(output.status.code(), Some(1));
    api_mock.assert_hits(0);
}

#[test]
fn test_single_domain_submitted_once() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/domains/")
            .body_contains("domain=example.com");
        then.status(200).json_body(serde_json::json!({"return_code": 0}));
    });
    let config = write_config(temp_dir.path(), &server.base_url());

    let output = run(&["-d", "example.com", "-c", &config]);

    assert!(output.status.success());
    api_mock.assert();
    let log = std::fs::read_to_string(temp_dir.path().join("import.log")).unwrap();
    assert!(log.contains("Submitted domain example.com to CRITs"));
}

#[test]
fn test_oversized_delay_exits_before_submitting() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });
    let config = write_config_with(temp_dir.path(), &server.base_url(), "1e20", "INFO");

    let output = run(&["-d", "example.com", "-c", &config]);

    assert_eq!(output.status.code(), Some(1));
    api_mock.assert_hits(0);
    let log = std::fs::read_to_string(temp_dir.path().join("import.log")).unwrap();
    assert!(log.contains("Configuration validation failed"));
    assert!(log.contains("importer.delay"));
}

#[test]
fn test_unknown_log_level_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });
    let config = write_config_with(temp_dir.path(), &server.base_url(), "0.0", "verbose");

    let output = run(&["-d", "example.com", "-c", &config]);

    assert_eq!(output.status.code(), Some(1));
    api_mock.assert_hits(0);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("logging.level"));
}
