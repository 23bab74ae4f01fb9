use owo_colors::OwoColorize;

/// Small wrapper around stderr printing for user-facing diagnostics.
/// stdout carries the report table only, so nothing here writes to it.
/// Colors are enabled only when stderr is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

/// Print the single fatal line for a failed run: `<program>: <message>`.
/// Kept uncolored so scripts can match on it.
pub fn print_fatal(program: &str, msg: &str) {
    eprintln!("{}", fatal_line(program, msg));
}

pub(crate) fn fatal_line(program: &str, msg: &str) -> String {
    // Multi-line causes (e.g. io hints) are folded so the diagnostic stays one line.
    let folded: Vec<&str> = msg.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    format!("{}: {}", program, folded.join(" "))
}
