#![cfg(unix)]

// Logs go to stderr (or a file), never into the report on stdout.

use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn json_logs_stay_on_stderr() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("a"), b"a").unwrap();

    let me = assert_cmd::cargo::cargo_bin!("mv_sed");
    let out = Command::new(me)
        .current_dir(td.path())
        .env_remove("MV_SED_TRANSFORM")
        .args(["--json", "--log-level", "info", "s/a/b/", "a"])
        .output()
        .expect("spawn binary");
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout, "rename a b\n");

    let stderr = String::from_utf8_lossy(&out.stderr);
    let events: Vec<serde_json::Value> = stderr
        .lines()
        .map(|l| serde_json::from_str(l).expect("each stderr line is a JSON event"))
        .collect();
    assert!(
        events.iter().any(|e| e["fields"]["message"] == "renamed"),
        "stderr: {stderr}"
    );
}

#[test]
fn log_file_receives_events() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    fs::write(base.join("a"), b"a").unwrap();
    let log = base.join("logs").join("mv_sed.log");

    let me = assert_cmd::cargo::cargo_bin!("mv_sed");
    let out = Command::new(me)
        .current_dir(&base)
        .env_remove("MV_SED_TRANSFORM")
        .arg("--log-file")
        .arg(&log)
        .args(["--log-level", "debug", "s/a/b/", "a"])
        .output()
        .expect("spawn binary");
    assert!(out.status.success());

    let content = fs::read_to_string(&log).expect("log file written");
    assert!(content.contains("renamed"), "log: {content}");
    assert!(content.contains("planned"), "log: {content}");
}

#[test]
fn log_file_behind_symlink_is_refused() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    fs::write(base.join("a"), b"a").unwrap();
    fs::create_dir_all(base.join("real")).unwrap();
    std::os::unix::fs::symlink(base.join("real"), base.join("link")).unwrap();
    let log = base.join("link").join("mv_sed.log");

    let me = assert_cmd::cargo::cargo_bin!("mv_sed");
    let out = Command::new(me)
        .current_dir(&base)
        .env_remove("MV_SED_TRANSFORM")
        .arg("--log-file")
        .arg(&log)
        .args(["s/a/b/", "a"])
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "file logging problems are not fatal");
    assert!(!base.join("real").join("mv_sed.log").exists());
    assert!(base.join("b").exists());
}
