use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;

fn md2struct(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_md2struct"))
        .args(args)
        .arg("--no-color")
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch md2struct")
}

fn read_json(path: &Path) -> Value {
    let text = fs::read_to_string(path).expect("output missing");
    serde_json::from_str(&text).expect("output is not JSON")
}

#[test]
fn fixtures_pass() {
    let cases = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/cases");
    let cases = cases.to_str().unwrap();
    let output = md2struct(Path::new(env!("CARGO_MANIFEST_DIR")), &["test", cases]);
    assert!(
        output.status.success(),
        "fixtures failed:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn converts_named_input() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.md"), "# Title\n\n- item one\nplain\n").unwrap();

    let output = md2struct(dir.path(), &["convert", "notes.md", "-o", "notes.json"]);
    assert!(output.status.success());

    let json = read_json(&dir.path().join("notes.json"));
    let blocks = json.as_array().unwrap();
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0]["style"], "sidetittel");
    assert_eq!(blocks[1]["listItem"], "bullet");
    assert_eq!(blocks[2]["markDefs"], Value::Array(vec![]));
}

#[test]
fn bare_invocation_uses_default_paths() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("input.md"), "hello\n").unwrap();

    let output = md2struct(dir.path(), &[]);
    assert!(output.status.success());

    let json = read_json(&dir.path().join("output.json"));
    assert_eq!(json[0]["children"][0]["text"], "hello");
}

#[test]
fn file_name_alone_means_convert() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("doc.md"), "_x_\n").unwrap();

    let output = md2struct(dir.path(), &["doc.md"]);
    assert!(output.status.success());

    let json = read_json(&dir.path().join("output.json"));
    assert_eq!(json[0]["children"][0]["marks"][0], "italic");
}

#[test]
fn settings_file_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("input.md"), "[a](one) [b](two)\n").unwrap();
    fs::write(
        dir.path().join("md2struct.toml"),
        "output = \"custom.json\"\npretty = true\ncompatibility = \"legacy\"\n",
    )
    .unwrap();

    let output = md2struct(dir.path(), &["convert"]);
    assert!(output.status.success());

    let text = fs::read_to_string(dir.path().join("custom.json")).unwrap();
    assert!(text.contains('\n'), "pretty output expected");
    let json: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json[0]["markDefs"][1]["href"], "one");
}

#[test]
fn flags_override_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("input.md"), "[a](one) [b](two)\n").unwrap();
    fs::write(dir.path().join("md2struct.toml"), "compatibility = \"legacy\"\n").unwrap();

    let output = md2struct(dir.path(), &["convert", "--stdout"]);
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["markDefs"][1]["href"], "one");

    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("input.md"), "bad [link\n").unwrap();
    fs::write(dir.path().join("md2struct.toml"), "on_malformed = \"skip\"\n").unwrap();
    let output = md2struct(dir.path(), &["convert", "--stdout", "--on-malformed", "literal"]);
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["children"][0]["text"], "bad [link");
}

#[test]
fn malformed_line_is_reported_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("input.md"), "ok\nbad [link\n").unwrap();

    let output = md2struct(dir.path(), &["convert"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("malformed link"), "stderr: {}", stderr);

    let json = read_json(&dir.path().join("output.json"));
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[test]
fn strict_refuses_to_write() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("input.md"), "ok\nbad [link\n").unwrap();

    let output = md2struct(dir.path(), &["convert", "--strict"]);
    assert!(!output.status.success());
    assert!(!dir.path().join("output.json").exists());
}

#[test]
fn missing_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();

    let output = md2struct(dir.path(), &["convert", "nope.md"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot read 'nope.md'"), "stderr: {}", stderr);
}

#[test]
fn unknown_setting_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("input.md"), "x\n").unwrap();
    fs::write(dir.path().join("md2struct.toml"), "colour = true\n").unwrap();

    let output = md2struct(dir.path(), &["convert"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("md2struct.toml"), "stderr: {}", stderr);
}

#[test]
fn outline_lists_blocks() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("input.md"), "## Sub\n- point [x](y)\n").unwrap();

    let output = md2struct(dir.path(), &["convert", "--outline"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("innholdstittel"));
    assert!(lines[1].ends_with("- point x (1 link(s))"));
}

#[test]
fn progress_is_logged_only_when_verbose() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("input.md"), "plain\n").unwrap();

    let quiet = md2struct(dir.path(), &["convert"]);
    assert!(quiet.status.success());
    assert!(quiet.stderr.is_empty(), "stderr: {}", String::from_utf8_lossy(&quiet.stderr));

    let verbose = md2struct(dir.path(), &["convert", "-v"]);
    assert!(verbose.status.success());
    let stderr = String::from_utf8_lossy(&verbose.stderr);
    assert!(stderr.contains("== md2struct =="), "stderr: {}", stderr);
    assert!(stderr.contains("parsing file input.md"), "stderr: {}", stderr);
}
