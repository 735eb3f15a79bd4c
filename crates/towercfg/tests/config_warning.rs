//! Integration tests for config file errors and the duplicated-parameter warning.

use std::fs;
use std::process::Command;

fn towercfg(work: &std::path::Path, home: &std::path::Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_towercfg"));
    command.current_dir(work).env("HOME", home);
    for var in [
        "TOWER_HOST",
        "TOWER_USERNAME",
        "TOWER_PASSWORD",
        "TOWER_VERIFY_SSL",
        "TOWER_OAUTH_TOKEN",
    ] {
        command.env_remove(var);
    }
    command
}

/// Params given together with --config-file produce a warning, not an error.
#[test]
fn test_warning_on_params_with_config_file() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = temp_dir.path().join("custom.yml");
    fs::write(&config, "host: file.example.com\n").expect("Failed to write config");

    let output = towercfg(temp_dir.path(), temp_dir.path())
        .args(["show", "--host", "flag.example.com", "--config-file"])
        .arg(&config)
        .output()
        .expect("Failed to execute towercfg");

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Warning: The parameter(s) host were provided"),
        "Expected warning in stderr, got: {}",
        stderr
    );
    assert!(stdout.contains("https://flag.example.com"));
}

/// A config file without params does not warn.
#[test]
fn test_no_warning_with_config_file_only() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = temp_dir.path().join("custom.yml");
    fs::write(&config, "host: file.example.com\n").expect("Failed to write config");

    let output = towercfg(temp_dir.path(), temp_dir.path())
        .args(["show", "--config-file"])
        .arg(&config)
        .output()
        .expect("Failed to execute towercfg");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("Warning:"),
        "Unexpected warning in stderr: {}",
        stderr
    );
}

/// A missing explicit config file is fatal.
#[test]
fn test_missing_explicit_config_fails() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

    let output = towercfg(temp_dir.path(), temp_dir.path())
        .args(["show", "--config-file", "nowhere.cfg"])
        .output()
        .expect("Failed to execute towercfg");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("nowhere.cfg"),
        "Expected path in error output, got: {}",
        stderr
    );
}

/// The duplicated-parameter warning survives a failing explicit config file.
#[test]
fn test_warning_kept_when_explicit_config_missing() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

    let output = towercfg(temp_dir.path(), temp_dir.path())
        .args([
            "show",
            "--host",
            "flag.example.com",
            "--config-file",
            "nowhere.cfg",
        ])
        .output()
        .expect("Failed to execute towercfg");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Warning: The parameter(s) host were provided"),
        "Expected warning in stderr, got: {}",
        stderr
    );
    assert!(stderr.contains("nowhere.cfg"));
}

/// A malformed discovered config file is fatal even though discovery is implicit.
#[test]
fn test_malformed_discovered_config_fails() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let work = temp_dir.path().join("work");
    fs::create_dir_all(&work).expect("Failed to create work dir");
    fs::write(work.join(".tower_cli.cfg"), "[general\nhost = broken\n")
        .expect("Failed to write invalid config");

    let output = towercfg(&work, temp_dir.path())
        .arg("show")
        .output()
        .expect("Failed to execute towercfg");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("not properly formatted"),
        "Expected format error in stderr, got: {}",
        stderr
    );
}

/// A resolution failure is logged once and surfaces as the process error.
#[test]
fn test_resolve_failure_logged_once() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

    let output = towercfg(temp_dir.path(), temp_dir.path())
        .args(["show", "--config-file", "nowhere.cfg"])
        .output()
        .expect("Failed to execute towercfg");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stderr.matches("core.app.error_occurred").count(),
        1,
        "Expected a single error event, got: {}",
        stderr
    );
    assert!(!stderr.contains("cli.resolve_failed"));
    assert!(stderr.contains("Error: "));
}
