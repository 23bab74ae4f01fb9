//! Path transformations.
//!
//! A transformation maps N source path strings to N destination strings,
//! in order. The set of variants is closed; a `TransformRegistry` built
//! once at startup maps fixed names to constructors, and a selector of the
//! form `name` or `name:config` picks one.
//!
//! Built-ins:
//! - `command[:PROGRAM ARGS...]`: pipe paths through an external filter
//!   (default `sed`), the transformation argument appended last.
//! - `substitute`: apply a sed-style `s/pattern/replacement/` script in-process.

pub mod command;
pub mod substitute;

use tracing::debug;

use crate::errors::{MvSedError, Result};

pub use command::CommandFilter;
pub use substitute::{SedSubstitute, parse_sed_substitutions};

/// The one capability a transformation offers.
pub trait Transform {
    fn apply(&self, arg: &str, paths: &[String]) -> Result<Vec<String>>;
}

/// Closed set of available transformations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transformation {
    Command(CommandFilter),
    Substitute(SedSubstitute),
}

impl Transform for Transformation {
    fn apply(&self, arg: &str, paths: &[String]) -> Result<Vec<String>> {
        match self {
            Transformation::Command(filter) => filter.apply(arg, paths),
            Transformation::Substitute(sub) => sub.apply(arg, paths),
        }
    }
}

type Builder = fn(Option<&str>) -> Result<Transformation>;

/// Name -> constructor table, built once and passed to whoever selects.
pub struct TransformRegistry {
    entries: Vec<(&'static str, Builder)>,
}

impl TransformRegistry {
    /// Registry holding the built-in transformations.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                ("command", build_command as Builder),
                ("substitute", build_substitute as Builder),
            ],
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(name, _)| *name).collect()
    }

    /// Parse `name` or `name:config` and construct the matching variant.
    pub fn select(&self, selector: &str) -> Result<Transformation> {
        let selector = selector.trim();
        let (name, config) = match selector.split_once(':') {
            Some((name, config)) => (name.trim(), Some(config)),
            None => (selector, None),
        };
        let builder = self
            .entries
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, builder)| *builder)
            .ok_or_else(|| MvSedError::UnknownTransform {
                name: name.to_string(),
                known: self.names().join(", "),
            })?;
        let transformation = builder(config)?;
        debug!(selector, ?transformation, "selected transformation");
        Ok(transformation)
    }
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn build_command(config: Option<&str>) -> Result<Transformation> {
    let argv: Vec<String> = match config {
        None => vec!["sed".to_string()],
        Some(raw) => raw.split_whitespace().map(str::to_string).collect(),
    };
    if argv.is_empty() {
        return Err(MvSedError::InvalidTransformConfig {
            name: "command".into(),
            reason: "no program given".into(),
        });
    }
    Ok(Transformation::Command(CommandFilter::new(argv)))
}

fn build_substitute(config: Option<&str>) -> Result<Transformation> {
    match config {
        Some(raw) if !raw.trim().is_empty() => Err(MvSedError::InvalidTransformConfig {
            name: "substitute".into(),
            reason: format!("takes no configuration, got '{raw}'"),
        }),
        _ => Ok(Transformation::Substitute(SedSubstitute)),
    }
}
