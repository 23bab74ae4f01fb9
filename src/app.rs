//! Application orchestrator.
//! Merges config, initializes logging, installs the interrupt handler, then
//! runs the pipeline: select transformation -> de-duplicate inputs ->
//! transform -> plan -> execute.

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use mv_sed::cli::Args;
use mv_sed::config::apply_env_overrides;
use mv_sed::output as out;
use mv_sed::{
    Config, MvSedError, Transform, TransformRegistry, dedup_sources, execute_plan, plan_renames,
    shutdown,
};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // defaults < environment < flags
    let mut cfg = Config::default();
    let env_warnings = apply_env_overrides(&mut cfg);
    args.apply_overrides(&mut cfg);

    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), cfg.json_logs)
        .context("failed to initialize logging")?;
    for warning in &env_warnings {
        out::print_warn(warning);
    }

    // Guard is dropped on interrupt so buffered file logs are flushed.
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; stopping before the next rename...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        })
        .context("failed to install signal handler")?;
    }

    debug!(?args, ?cfg, "starting mv_sed");

    // The user-facing diagnostic is the single line printed by main.
    let result = rename_all(&cfg, &args.arg, &args.files).map_err(|e| {
        debug!(code = e.code(), error = %e, "run aborted");
        anyhow::Error::new(e)
    });

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

fn rename_all(cfg: &Config, arg: &str, files: &[String]) -> Result<(), MvSedError> {
    let registry = TransformRegistry::builtin();
    let transformation = registry.select(&cfg.transform)?;

    let unique = dedup_sources(files)?;
    let transformed = transformation.apply(arg, &unique)?;
    debug!(sources = unique.len(), destinations = transformed.len(), "transformed");

    let olds: Vec<PathBuf> = unique.iter().map(PathBuf::from).collect();
    let news: Vec<PathBuf> = transformed.iter().map(PathBuf::from).collect();
    let planned = plan_renames(&olds, &news)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let summary = execute_plan(&planned, cfg.dry_run, &mut handle)?;
    handle.flush()?;

    info!(
        renamed = summary.renamed,
        planned = summary.planned_renames,
        nop = summary.nops,
        refused = summary.refused,
        dry_run = cfg.dry_run,
        "done"
    );
    Ok(())
}
