//! Integration tests for the glyphscrub CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn glyphscrub() -> Command {
    let mut cmd = Command::cargo_bin("glyphscrub").unwrap();
    for var in [
        "GLYPHSCRUB_DRY_RUN",
        "GLYPHSCRUB_FORCE",
        "GLYPHSCRUB_CRLF",
        "GLYPHSCRUB_LF",
        "GLYPHSCRUB_PRESERVE_TIMESTAMP",
        "GLYPHSCRUB_FORMAT",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Test CLI binary exists and responds to --help
#[test]
fn test_cli_help() {
    glyphscrub()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("walks a directory tree"))
        .stdout(predicate::str::contains("--dry-run"));
}

/// Short help shows the one-line description
#[test]
fn test_cli_short_help() {
    glyphscrub()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Strip invisible and confusable Unicode"));
}

/// Test CLI responds to --version
#[test]
fn test_cli_version() {
    glyphscrub()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("glyphscrub"));
}

#[test]
fn test_missing_root_fails() {
    let temp_dir = TempDir::new().unwrap();
    glyphscrub()
        .arg(temp_dir.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("scan root is not available"));
}

#[test]
fn test_missing_root_in_dry_run_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    glyphscrub()
        .arg(temp_dir.path().join("nope"))
        .arg("--dry-run")
        .assert()
        .success()
        .stderr(predicate::str::contains("not found"))
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn test_missing_root_in_dry_run_json_report() {
    let temp_dir = TempDir::new().unwrap();
    let assert = glyphscrub()
        .arg(temp_dir.path().join("nope"))
        .args(["--dry-run", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["statistics"]["files_failed"], 1);
    assert_eq!(report["results"][0]["outcome"], "error");
}

#[test]
fn test_cleans_tree_and_skips_ignored_files() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "h\u{200B}ello\r\n").unwrap();
    fs::write(temp_dir.path().join(".gitignore"), "*.log\n").unwrap();
    fs::write(temp_dir.path().join("b.log"), "h\u{200B}ello\r\n").unwrap();

    glyphscrub()
        .arg(temp_dir.path())
        .arg("--lf")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleaned"))
        .stdout(predicate::str::contains("a.txt"))
        .stdout(predicate::str::contains("b.log").not());

    assert_eq!(fs::read_to_string(temp_dir.path().join("a.txt")).unwrap(), "hello\n");
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("b.log")).unwrap(),
        "h\u{200B}ello\r\n"
    );
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("note.md");
    fs::write(&file, "\u{0421}\u{0430}t\u{2060}\n").unwrap();
    let before = fs::metadata(&file).unwrap().modified().unwrap();

    glyphscrub()
        .arg(temp_dir.path())
        .arg("--dry-run")
        .arg("--crlf")
        .assert()
        .success()
        .stdout(predicate::str::contains("Would clean"))
        .stdout(predicate::str::contains("note.md"));

    assert_eq!(fs::read_to_string(&file).unwrap(), "\u{0421}\u{0430}t\u{2060}\n");
    assert_eq!(fs::metadata(&file).unwrap().modified().unwrap(), before);
}

#[test]
fn test_crlf_from_environment() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("win.txt");
    fs::write(&file, "one\ntwo\r\n").unwrap();

    glyphscrub()
        .arg(temp_dir.path())
        .env("GLYPHSCRUB_CRLF", "true")
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&file).unwrap(), "one\r\ntwo\r\n");
}

#[test]
fn test_json_report() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "\u{0430}").unwrap();
    fs::write(temp_dir.path().join("bad.txt"), b"caf\xe9").unwrap();
    fs::write(temp_dir.path().join("blob.bin"), b"\x00\x01").unwrap();

    let assert = glyphscrub()
        .arg(temp_dir.path())
        .args(["--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(report["statistics"]["files_cleaned"], 1);
    assert_eq!(report["statistics"]["files_failed"], 1);
    assert_eq!(report["statistics"]["binary_files_skipped"], 1);

    let results = report["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    let failed = results.iter().find(|r| r["outcome"] == "error").unwrap();
    assert!(failed["path"].as_str().unwrap().ends_with("bad.txt"));
    assert!(failed["detail"].as_str().unwrap().contains("UTF-8"));
}

#[test]
fn test_verbose_shows_excluded_and_binary_entries() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".gitignore"), "*.log\n").unwrap();
    fs::write(temp_dir.path().join("b.log"), "x").unwrap();
    fs::write(temp_dir.path().join("blob.bin"), b"\x00\x01").unwrap();

    glyphscrub()
        .arg(temp_dir.path())
        .arg("--dry-run")
        .arg("-vv")
        .assert()
        .success()
        .stderr(predicate::str::contains("Excluded"))
        .stderr(predicate::str::contains("b.log: matched ignore pattern"))
        .stderr(predicate::str::contains("blob.bin: binary or unreadable file"));

    glyphscrub()
        .arg(temp_dir.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stderr(predicate::str::contains("b.log").not())
        .stderr(predicate::str::contains("blob.bin").not());
}

#[test]
fn test_errors_do_not_change_exit_status() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("bad.txt"), b"\xff\xfe broken").unwrap();
    fs::write(temp_dir.path().join("good.txt"), "ok\u{200B}").unwrap();

    glyphscrub()
        .arg(temp_dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("bad.txt"));

    assert_eq!(fs::read_to_string(temp_dir.path().join("good.txt")).unwrap(), "ok");
}

#[cfg(unix)]
#[test]
fn test_read_only_root_fails_unless_dry_run() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("locked");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("a.txt"), "\u{0430}").unwrap();
    fs::set_permissions(&root, fs::Permissions::from_mode(0o555)).unwrap();

    // Running as root bypasses permission bits
    let writable = fs::write(root.join("probe"), "").is_ok();
    if writable {
        fs::remove_file(root.join("probe")).unwrap();
    } else {
        glyphscrub().arg(&root).assert().failure();
        glyphscrub().arg(&root).arg("--dry-run").assert().success();
    }

    fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).unwrap();
}
