use std::process::ExitCode;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = mv_sed::cli::parse();
    match app::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            mv_sed::output::print_fatal(env!("CARGO_BIN_NAME"), &format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
