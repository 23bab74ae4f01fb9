#![cfg(unix)]

// End-to-end runs of the binary against a scratch directory, using the
// system `sed` as the default transformation.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn run_in(dir: &Path, args: &[&str]) -> Output {
    let me = assert_cmd::cargo::cargo_bin!("mv_sed");
    Command::new(me)
        .current_dir(dir)
        .env_remove("MV_SED_TRANSFORM")
        .env_remove("MV_SED_LOG_LEVEL")
        .env_remove("MV_SED_LOG_FILE")
        .args(args)
        .output()
        .expect("spawn binary")
}

fn rows(out: &Output) -> Vec<Vec<String>> {
    String::from_utf8_lossy(&out.stdout)
        .lines()
        .map(|l| l.split_whitespace().map(str::to_string).collect())
        .collect()
}

fn touch(dir: &Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), name.as_bytes()).unwrap();
    }
}

#[test]
fn chain_onto_existing_files_renames_only_the_tail() {
    let td = tempdir().unwrap();
    touch(td.path(), &["a", "b", "c"]);

    let out = run_in(td.path(), &["y/abc/bcd/", "a", "b", "c"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(
        stdout,
        "dest_exists a b\ndest_exists b c\nrename      c d\n"
    );
    assert_eq!(fs::read_to_string(td.path().join("a")).unwrap(), "a");
    assert_eq!(fs::read_to_string(td.path().join("b")).unwrap(), "b");
    assert_eq!(fs::read_to_string(td.path().join("d")).unwrap(), "c");
    assert!(!td.path().join("c").exists());
}

#[test]
fn two_sources_onto_one_destination() {
    let td = tempdir().unwrap();
    touch(td.path(), &["x", "y"]);

    let out = run_in(td.path(), &["s/.*/z/", "x", "y"]);
    assert!(out.status.success());
    assert_eq!(
        rows(&out),
        vec![
            vec!["rename", "x", "z"],
            vec!["dest_conflict:z", "y", "z"],
        ]
    );
    assert_eq!(fs::read_to_string(td.path().join("z")).unwrap(), "x");
    assert!(td.path().join("y").exists());
}

#[test]
fn refused_rows_keep_stderr_quiet_at_default_level() {
    let td = tempdir().unwrap();
    touch(td.path(), &["a", "b", "c"]);

    let out = run_in(td.path(), &["y/abc/bcd/", "a", "b", "c"]);
    assert!(out.status.success());
    assert_eq!(rows(&out).len(), 3);
    assert!(
        out.stderr.is_empty(),
        "unexpected stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
}

#[test]
fn rename_into_a_path_another_rename_creates_is_refused() {
    let td = tempdir().unwrap();
    touch(td.path(), &["dir", "file"]);

    // dir -> new, file -> new/file: the second depends on the first
    let out = run_in(td.path(), &["s/^dir$/new/; s/^file$/new\\/file/", "dir", "file"]);
    assert!(out.status.success());
    assert_eq!(
        rows(&out),
        vec![
            vec!["rename", "dir", "new"],
            vec!["dest_conflict:new", "file", "new/file"],
        ]
    );
    assert!(td.path().join("file").exists());
}

#[test]
fn dry_run_reports_but_does_not_rename() {
    let td = tempdir().unwrap();
    touch(td.path(), &["one.txt", "two.txt"]);

    let dry = run_in(td.path(), &["--dry-run", "s/txt/md/", "one.txt", "two.txt"]);
    assert!(dry.status.success());
    assert_eq!(
        rows(&dry),
        vec![
            vec!["rename_dry_run", "one.txt", "one.md"],
            vec!["rename_dry_run", "two.txt", "two.md"],
        ]
    );
    assert!(td.path().join("one.txt").exists());
    assert!(!td.path().join("one.md").exists());

    let wet = run_in(td.path(), &["s/txt/md/", "one.txt", "two.txt"]);
    assert!(wet.status.success());
    assert_eq!(
        rows(&wet),
        vec![
            vec!["rename", "one.txt", "one.md"],
            vec!["rename", "two.txt", "two.md"],
        ]
    );
    assert!(td.path().join("one.md").exists());
    assert!(!td.path().join("two.txt").exists());
}

#[test]
fn more_destinations_than_sources() {
    let td = tempdir().unwrap();
    touch(td.path(), &["a", "b", "c"]);

    // duplicate the first two lines: a a b b c
    let out = run_in(td.path(), &["1p;2p", "a", "b", "c"]);
    assert!(out.status.success());
    let got = rows(&out);
    assert_eq!(got.len(), 5);
    assert_eq!(got[0], vec!["nop", "a", "a"]);
    assert_eq!(got[3], vec!["source_not_set", "b", "b"]);
    assert_eq!(got[4], vec!["source_not_set", "c", "c"]);
}

#[test]
fn more_sources_than_destinations() {
    let td = tempdir().unwrap();
    touch(td.path(), &["a", "b", "c", "d", "e"]);

    let out = run_in(td.path(), &["4,$d", "a", "b", "c", "d", "e"]);
    assert!(out.status.success());
    let got = rows(&out);
    assert_eq!(got.len(), 5);
    assert_eq!(got[3], vec!["dest_not_set", "d", "d"]);
    assert_eq!(got[4], vec!["dest_not_set", "e", "e"]);
    assert!(td.path().join("d").exists());
}

#[test]
fn missing_source_and_missing_parent_are_reported_not_fatal() {
    let td = tempdir().unwrap();
    touch(td.path(), &["real"]);

    let out = run_in(td.path(), &["s/^/nowhere\\//", "ghost", "real"]);
    assert!(out.status.success());
    assert_eq!(
        rows(&out),
        vec![
            vec!["source_not_exist", "ghost", "nowhere/ghost"],
            vec!["dest_parent_not_exist", "real", "nowhere/real"],
        ]
    );
}

#[test]
fn same_file_given_twice_is_renamed_once() {
    let td = tempdir().unwrap();
    touch(td.path(), &["a"]);

    let out = run_in(td.path(), &["s/a/b/", "a", "./a", "a"]);
    assert!(out.status.success());
    assert_eq!(rows(&out), vec![vec!["rename", "a", "b"]]);
    assert!(td.path().join("b").exists());
}

#[test]
fn substitute_transformation_runs_in_process() {
    let td = tempdir().unwrap();
    touch(td.path(), &["IMG_001.jpeg", "IMG_002.jpeg"]);

    let out = run_in(
        td.path(),
        &[
            "--transform",
            "substitute",
            r"s/IMG_(\d+)/photo-\1/; s/\.jpeg$/.jpg/",
            "IMG_001.jpeg",
            "IMG_002.jpeg",
        ],
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(td.path().join("photo-001.jpg").exists());
    assert!(td.path().join("photo-002.jpg").exists());
}

#[test]
fn transform_selected_through_environment() {
    let td = tempdir().unwrap();
    touch(td.path(), &["a"]);

    let me = assert_cmd::cargo::cargo_bin!("mv_sed");
    let out = Command::new(me)
        .current_dir(td.path())
        .env("MV_SED_TRANSFORM", "substitute")
        .args(["s/a/b/", "a"])
        .output()
        .expect("spawn binary");
    assert!(out.status.success());
    assert!(td.path().join("b").exists());
}
