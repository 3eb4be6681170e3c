use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn cargo_bin() -> PathBuf {
    if let Ok(path) = env::var("CARGO_BIN_EXE_edi") {
        return PathBuf::from(path);
    }

    let target_dir = env::var("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| repo_root().join("target"));
    let executable_name = format!("edi{}", std::env::consts::EXE_SUFFIX);
    let fallback = target_dir.join("debug").join(executable_name);

    if fallback.exists() {
        return fallback;
    }

    panic!(
        "CARGO_BIN_EXE_edi is not set and fallback binary was not found at {}",
        fallback.display()
    );
}

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn unique_temp_path(name: &str, extension: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time should be after UNIX_EPOCH")
        .as_nanos();
    env::temp_dir().join(format!(
        "edi-cli-{name}-{}-{nanos}.{extension}",
        std::process::id()
    ))
}

struct TempFile {
    path: PathBuf,
}

impl TempFile {
    fn create(name: &str, extension: &str, content: &str) -> Self {
        let path = unique_temp_path(name, extension);
        fs::write(&path, content).expect("temporary file should be created");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

fn run_edi(args: &[&str]) -> Output {
    Command::new(cargo_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("edi should execute")
}

fn assert_exit_code(output: &Output, expected: i32) {
    let actual = output.status.code().unwrap_or(-1);
    assert_eq!(
        actual,
        expected,
        "unexpected exit code; stdout: {}; stderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

const TWO_PASS_FINDINGS: &str = r"name: '850'
control_number: '0001'
ack_requested: false
passes:
  - - level: message
      code: one_or_more_segments_in_error
    - level: segment
      segment: REF
      position: 3
      value: REF*ZZ*123~
      code: required_segment_missing
  - - level: element
      segment: REF
      segment_position: 3
      name: REF02
      position: 2
      code: invalid_code_value
      value: '123'
    - level: element
      segment: DTM
      segment_position: 4
      segment_value: DTM*002*20261340~
      name: DTM02
      position: 2
      code: invalid_date
      value: '20261340'
";

#[test]
fn report_merges_passes_into_text_report() {
    let findings = TempFile::create("two-pass", "yaml", TWO_PASS_FINDINGS);
    let input = findings.path().to_string_lossy().to_string();
    let output = run_edi(&["report", &input]);

    assert_exit_code(&output, 2);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Message 850 (control number 0001): rejected\n"));
    assert!(stdout.contains("  message error 5 (One or more segments in error)\n"));
    assert!(stdout.contains("  segment REF at position 3: REF*ZZ*123~\n"));
    assert!(stdout.contains("    segment error 3 (Required segment missing)\n"));
    assert!(stdout.contains("element REF02 at position 2: 7 (Invalid code value) value '123'"));
    assert!(stdout.contains("  segment DTM at position 4: DTM*002*20261340~\n"));
    assert!(stdout.contains("Technical acknowledgment: not generated (policy default)"));
    assert_eq!(stdout.matches("segment REF at position 3").count(), 1);
}

#[test]
fn report_renders_json_with_one_entry_per_segment() {
    let findings = TempFile::create("two-pass-json", "yaml", TWO_PASS_FINDINGS);
    let input = findings.path().to_string_lossy().to_string();
    let output = run_edi(&["report", &input, "--format", "json"]);

    assert_exit_code(&output, 2);

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    let segments = value["segments"].as_array().expect("segments should be a list");
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0]["name"], "REF");
    assert_eq!(segments[0]["codes"][0], "required_segment_missing");
    assert_eq!(segments[0]["element_errors"][0]["name"], "REF02");
    assert_eq!(segments[1]["name"], "DTM");
    assert!(segments[1]["codes"].as_array().unwrap().is_empty());
}

#[test]
fn report_returns_success_for_clean_message() {
    let findings = TempFile::create(
        "clean",
        "json",
        r#"{"name": "810", "control_number": "77", "ack_requested": true, "passes": [[], []]}"#,
    );
    let input = findings.path().to_string_lossy().to_string();
    let output = run_edi(&["report", &input]);

    assert_exit_code(&output, 0);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Message 810 (control number 77): accepted\n"));
    assert!(stdout.contains("Technical acknowledgment: generated (policy default)"));
}

#[test]
fn report_applies_acknowledgment_policy_from_config() {
    let findings = TempFile::create(
        "ack",
        "json",
        r#"{"name": "810", "control_number": "78", "ack_requested": true}"#,
    );
    let config = TempFile::create("ack-config", "yaml", "technical_acknowledgment: suppress\n");
    let input = findings.path().to_string_lossy().to_string();
    let config_path = config.path().to_string_lossy().to_string();
    let output = run_edi(&["--config", &config_path, "report", &input]);

    assert_exit_code(&output, 0);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Technical acknowledgment: not generated (policy suppress)"));
}

#[test]
fn report_fails_for_unknown_violation_code() {
    let findings = TempFile::create(
        "bad-code",
        "yaml",
        "name: '850'\npasses:\n  - - level: message\n      code: not_a_code\n",
    );
    let input = findings.path().to_string_lossy().to_string();
    let output = run_edi(&["report", &input]);

    assert_exit_code(&output, 1);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid YAML findings"));
}

#[test]
fn report_fails_when_input_is_missing() {
    let missing = unique_temp_path("missing", "yaml");
    let input = missing.to_string_lossy().to_string();
    let output = run_edi(&["report", &input]);

    assert_exit_code(&output, 1);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read findings"));
}
