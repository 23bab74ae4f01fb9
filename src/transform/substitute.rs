//! In-process sed-style substitution.
//!
//! The transformation argument is a script of `s<sep>pattern<sep>replacement<sep>`
//! commands, separated by whitespace and/or `;`. Every command is applied to
//! every path in order, replacing all matches.
//!
//! Replacements use sed/Python-style escapes: `\1`..`\99` and `\g<name>` for
//! groups, `\\` for a backslash, `\n`/`\t`. A bare `$` is literal.

use regex::Regex;

use super::Transform;
use crate::errors::{MvSedError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SedSubstitute;

impl Transform for SedSubstitute {
    fn apply(&self, arg: &str, paths: &[String]) -> Result<Vec<String>> {
        let compiled = parse_sed_substitutions(arg)?
            .into_iter()
            .map(|(pattern, replacement)| {
                let regex = Regex::new(&pattern).map_err(|e| {
                    MvSedError::MalformedArgument(format!("bad pattern '{pattern}': {e}"))
                })?;
                Ok((regex, translate_replacement(&replacement)?))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(paths
            .iter()
            .map(|path| {
                compiled
                    .iter()
                    .fold(path.clone(), |acc, (regex, replacement)| {
                        regex.replace_all(&acc, replacement.as_str()).into_owned()
                    })
            })
            .collect())
    }
}

fn malformed(msg: &str) -> MvSedError {
    MvSedError::MalformedArgument(msg.to_string())
}

/// Split a script into (pattern, replacement) pairs.
pub fn parse_sed_substitutions(script: &str) -> Result<Vec<(String, String)>> {
    let mut substitutions = Vec::new();
    let mut rest = script;
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        rest = rest
            .strip_prefix('s')
            .ok_or_else(|| malformed("only 's' sed-style command is supported"))?;
        let sep = rest
            .chars()
            .next()
            .ok_or_else(|| malformed("missing separator after 's'"))?;
        rest = &rest[sep.len_utf8()..];

        let mut parts = rest.splitn(3, sep);
        let (Some(pattern), Some(replacement), Some(tail)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed("expected 3 separators after 's'"));
        };
        substitutions.push((pattern.to_string(), replacement.to_string()));
        rest = tail.trim_start_matches(|c: char| c.is_whitespace() || c == ';');
    }
    Ok(substitutions)
}

/// Rewrite a sed-style replacement into `regex` expansion syntax.
fn translate_replacement(raw: &str) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '$' => out.push_str("$$"),
            '\\' => match chars.next() {
                None => return Err(malformed("replacement ends with a lone '\\'")),
                Some('\\') => out.push('\\'),
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(d) if d.is_ascii_digit() => {
                    let mut group = d.to_string();
                    if let Some(&next) = chars.peek() {
                        if next.is_ascii_digit() {
                            group.push(next);
                            chars.next();
                        }
                    }
                    out.push_str(&format!("${{{group}}}"));
                }
                Some('g') => {
                    if chars.next() != Some('<') {
                        return Err(malformed("expected '<' after '\\g'"));
                    }
                    let name: String = chars.by_ref().take_while(|&c| c != '>').collect();
                    if name.is_empty() {
                        return Err(malformed("empty group name in '\\g<>'"));
                    }
                    out.push_str(&format!("${{{name}}}"));
                }
                Some(other) if other.is_ascii_alphabetic() => {
                    return Err(MvSedError::MalformedArgument(format!(
                        "bad escape '\\{other}' in replacement"
                    )));
                }
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
            },
            _ => out.push(c),
        }
    }
    Ok(out)
}
