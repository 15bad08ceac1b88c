//! Accept single-dash long flags (`-input dir`, `-recursive=false`).
//!
//! Older scripts spell long flags with a single dash. clap only understands
//! `--long`, so known long names written with one dash are rewritten before
//! parsing. Short flags and values are left alone.

use std::ffi::OsString;

/// Long flag names that may be written with a single dash.
const LONG_FLAGS: &[&str] = &[
    "input",
    "output",
    "recursive",
    "threads",
    "config",
    "strict-verify",
    "no-verify",
    "remove-failed",
    "report-tags",
    "dry-run",
    "summary",
    "verbose",
    "json-logs",
    "help",
    "version",
];

/// Rewrite `-name` / `-name=value` to `--name` / `--name=value` for known names.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut expect_value = false;
    args.into_iter()
        .map(|arg| {
            if expect_value {
                expect_value = false;
                return arg;
            }
            match rewrite(&arg) {
                Some((rewritten, takes_value)) => {
                    expect_value = takes_value;
                    rewritten
                }
                None => arg,
            }
        })
        .collect()
}

/// Returns the rewritten flag and whether the next argument is its value.
fn rewrite(arg: &OsString) -> Option<(OsString, bool)> {
    let text = arg.to_str()?;
    let body = text.strip_prefix('-')?;
    if body.starts_with('-') {
        return None;
    }
    let (name, inline_value) = match body.split_once('=') {
        Some((name, _)) => (name, true),
        None => (body, false),
    };
    if !LONG_FLAGS.contains(&name) {
        return None;
    }
    let takes_value = !inline_value && matches!(name, "input" | "output" | "threads" | "config" | "summary");
    Some((OsString::from(format!("-{text}")), takes_value))
}
