use clap::Parser;
use mv_sed::cli::Args;
use mv_sed::config::types::{Config, LogLevel};
use std::path::PathBuf;

#[test]
fn positional_arg_and_files() {
    let args = Args::parse_from(["mv_sed", "s/a/b/", "one", "two"]);
    assert_eq!(args.arg, "s/a/b/");
    assert_eq!(args.files, vec!["one", "two"]);
    assert!(!args.dry_run);
    assert!(args.transform.is_none());
}

#[test]
fn at_least_one_file_is_required() {
    let err = Args::try_parse_from(["mv_sed", "s/a/b/"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}

#[test]
fn effective_log_level_precedence() {
    let args = Args::parse_from(["mv_sed", "--debug", "--log-level", "quiet", "x", "f"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Debug)); // --debug wins

    let args = Args::parse_from(["mv_sed", "--log-level", "info", "x", "f"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Info));

    let args = Args::parse_from(["mv_sed", "--log-level", "bogus", "x", "f"]);
    assert_eq!(args.effective_log_level(), None);
}

#[test]
fn apply_overrides_sets_flags() {
    let args = Args::parse_from([
        "mv_sed",
        "-n",
        "-t",
        "substitute",
        "--log-file",
        "/tmp/mv_sed.log",
        "--json",
        "s/a/b/",
        "f",
    ]);
    let mut cfg = Config::default();
    args.apply_overrides(&mut cfg);
    assert!(cfg.dry_run);
    assert!(cfg.json_logs);
    assert_eq!(cfg.transform, "substitute");
    assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/mv_sed.log")));
    assert_eq!(cfg.log_level, LogLevel::Normal);
}

#[test]
fn unset_flags_leave_config_alone() {
    let args = Args::parse_from(["mv_sed", "x", "f"]);
    let mut cfg = Config::default();
    cfg.transform = "command:tr a b".into();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.transform, "command:tr a b");
    assert!(!cfg.dry_run);
}
