//! External filter transformation.
//! Runs `argv... <arg>`, feeds the paths on stdin one per line and reads the
//! replacement list back from stdout, one per line. A non-zero exit fails
//! the whole run.

use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;
use tracing::debug;

use super::Transform;
use crate::errors::{MvSedError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFilter {
    argv: Vec<String>,
}

impl CommandFilter {
    /// `argv` must hold at least the program name.
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }

    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or_default()
    }
}

impl Transform for CommandFilter {
    fn apply(&self, arg: &str, paths: &[String]) -> Result<Vec<String>> {
        let program = self.program().to_string();
        let extra = self.argv.get(1..).unwrap_or_default();
        let input: String = paths.iter().map(|p| format!("{p}\n")).collect();
        debug!(%program, args = ?extra, arg, count = paths.len(), "running filter");

        let mut child = Command::new(&program)
            .args(extra)
            .arg(arg)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| MvSedError::TransformSpawn {
                program: program.clone(),
                source,
            })?;

        // Feed stdin from a thread so a chatty filter cannot deadlock on a full pipe.
        let stdin = child.stdin.take();
        let writer = thread::spawn(move || -> io::Result<()> {
            if let Some(mut stdin) = stdin {
                stdin.write_all(input.as_bytes())?;
            }
            Ok(())
        });

        let output = child.wait_with_output()?;
        check_writer(&program, writer.join())?;

        if !output.status.success() {
            return Err(MvSedError::TransformFailed {
                program,
                status: output.status.to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| MvSedError::TransformOutput(e.to_string()))?;
        Ok(stdout.lines().map(str::to_string).collect())
    }
}

/// A filter that exits without reading all of its input breaks the pipe;
/// that is left to the exit status to judge. Any other write failure, or a
/// panicked writer, fails the run.
fn check_writer(program: &str, joined: thread::Result<io::Result<()>>) -> Result<()> {
    let source = match joined {
        Ok(Ok(())) => return Ok(()),
        Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => return Ok(()),
        Ok(Err(e)) => e,
        Err(_) => io::Error::other("stdin writer panicked"),
    };
    Err(MvSedError::TransformSpawn {
        program: program.to_string(),
        source,
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn filter(argv: &[&str]) -> CommandFilter {
        CommandFilter::new(argv.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn sed_rewrites_each_line() {
        let out = filter(&["sed"])
            .apply("s/old/new/", &["a/old.txt".into(), "b/old.txt".into()])
            .unwrap();
        assert_eq!(out, vec!["a/new.txt", "b/new.txt"]);
    }

    #[test]
    fn extra_argv_comes_before_the_argument() {
        let out = filter(&["sed", "-E"])
            .apply("s/([0-9]+)/<\\1>/", &["file1".into()])
            .unwrap();
        assert_eq!(out, vec!["file<1>"]);
    }

    #[test]
    fn output_count_is_whatever_the_filter_prints() {
        let out = filter(&["sh", "-c", "cat; echo extra", "sh"])
            .apply("ignored", &["one".into()])
            .unwrap();
        assert_eq!(out, vec!["one", "extra"]);
    }

    #[test]
    fn non_zero_exit_is_an_error() {
        let err = filter(&["sh", "-c", "exit 3", "sh"])
            .apply("x", &["a".into()])
            .unwrap_err();
        assert_eq!(err.code(), "transform_failed");
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let err = filter(&["definitely-not-a-real-filter-xyz"])
            .apply("x", &["a".into()])
            .unwrap_err();
        assert_eq!(err.code(), "transform_spawn");
    }

    #[test]
    fn filter_that_stops_reading_early_is_not_an_error() {
        let paths: Vec<String> = (0..200_000).map(|i| format!("file{i}")).collect();
        let out = filter(&["sh", "-c", "head -n 1", "sh"])
            .apply("ignored", &paths)
            .unwrap();
        assert_eq!(out, vec!["file0"]);
    }

    #[test]
    fn writer_failures_other_than_broken_pipe_are_errors() {
        assert!(check_writer("sed", Ok(Err(io::ErrorKind::BrokenPipe.into()))).is_ok());

        let err = check_writer("sed", Ok(Err(io::ErrorKind::PermissionDenied.into()))).unwrap_err();
        assert_eq!(err.code(), "transform_spawn");

        let panicked: thread::Result<io::Result<()>> = Err(Box::new("boom"));
        let err = check_writer("sed", panicked).unwrap_err();
        assert_eq!(err.code(), "transform_spawn");
    }
}
