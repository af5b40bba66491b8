// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration diagnostics.
//!
//! Figment errors are turned into miette reports that point at the offending
//! line of `vocalis.toml`, list the keys the section accepts, and suggest the
//! closest one (Jaro-Winkler) when a key looks like a typo.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, GraphicalReportHandler, NamedSource, SourceSpan};
use thiserror::Error;

/// Keys scoring below this against every valid key get no suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// TOML text that fed the figment, kept so diagnostics can show spans.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Display name, usually the file path.
    pub name: String,
    /// Raw file contents.
    pub content: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Read `path`, returning `None` if it does not exist or is unreadable.
    pub fn read(path: &std::path::Path) -> Option<Self> {
        std::fs::read_to_string(path)
            .ok()
            .map(|content| Self::new(path.display().to_string(), content))
    }
}

/// A configuration problem, rendered through miette.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(vocalis::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        /// Closest valid key, if any is similar enough.
        suggestion: Option<String>,
        /// Comma-separated keys accepted by the section.
        valid_keys: String,
        #[label("not a recognized key")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("invalid type for key `{key}`: found {found}")]
    #[diagnostic(code(vocalis::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        found: String,
        expected: String,
        #[label("expected {expected}")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(vocalis::config::missing_key),
        help("set `{key}` in vocalis.toml or through its VOCALIS_* variable")
    )]
    MissingKey { key: String },

    #[error("validation error: {message}")]
    #[diagnostic(code(vocalis::config::validation))]
    Validation { message: String },

    #[error("config file not found: {path}")]
    #[diagnostic(code(vocalis::config::file_not_found))]
    FileNotFound { path: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(vocalis::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Convert every error inside `err` into a [`ConfigError`].
///
/// `sources` are searched for the file each error came from so that unknown
/// keys and type mismatches carry a span.
pub fn figment_to_config_errors(err: figment::Error, sources: &[SourceFile]) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| convert(&error, sources))
        .collect()
}

fn convert(error: &figment::Error, sources: &[SourceFile]) -> ConfigError {
    use figment::error::Kind;

    match &error.kind {
        Kind::UnknownField(field, expected) => {
            let (span, src) = locate(error, sources, &error.path, field);
            ConfigError::UnknownKey {
                key: field.clone(),
                suggestion: suggest_key(field, expected),
                valid_keys: expected.join(", "),
                span,
                src,
            }
        }
        Kind::MissingField(field) => ConfigError::MissingKey {
            key: dotted(&error.path, Some(&**field)),
        },
        Kind::InvalidType(found, expected) => {
            let (section, field) = match error.path.split_last() {
                Some((field, section)) => (section, field.as_str()),
                None => (&[][..], ""),
            };
            let (span, src) = locate(error, sources, section, field);
            ConfigError::InvalidType {
                key: error.path.join("."),
                found: found.to_string(),
                expected: expected.clone(),
                span,
                src,
            }
        }
        _ => ConfigError::Other(error.to_string()),
    }
}

fn dotted(path: &[String], leaf: Option<&str>) -> String {
    path.iter()
        .map(String::as_str)
        .chain(leaf)
        .collect::<Vec<_>>()
        .join(".")
}

/// Find the file `error` came from and the span of `field` inside `section`.
fn locate(
    error: &figment::Error,
    sources: &[SourceFile],
    section: &[String],
    field: &str,
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let origin = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    // Inline sources have no file origin; fall back to the only source given.
    let file = match origin {
        Some(name) => sources.iter().find(|s| s.name == name),
        None if sources.len() == 1 => sources.first(),
        None => None,
    };

    let Some(file) = file else {
        return (None, None);
    };

    match find_key_offset(&file.content, section, field) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), field.len())),
            Some(NamedSource::new(&file.name, file.content.clone())),
        ),
        None => (None, None),
    }
}

/// Byte offset of `field` as a key inside the TOML table named by `section`.
///
/// Headers are tracked line by line, so `[strategy]` does not match a key in
/// `[gateway]`. Array indices in `section` (as in `accounts.0`) are ignored
/// and match the first `[[accounts]]` entry holding the key.
pub fn find_key_offset(content: &str, section: &[String], field: &str) -> Option<usize> {
    let wanted: Vec<&str> = section
        .iter()
        .map(String::as_str)
        .filter(|s| s.parse::<usize>().is_err())
        .collect();
    let wanted = wanted.join(".");

    let mut current = String::new();
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();

        if let Some(header) = trimmed.strip_prefix('[') {
            current = header
                .trim_start_matches('[')
                .split(']')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string();
        } else if current == wanted
            && trimmed
                .strip_prefix(field)
                .is_some_and(|rest| rest.trim_start().starts_with('='))
        {
            return Some(offset + indent);
        }

        offset += line.len();
    }

    None
}

/// The valid key most similar to `unknown`, if any clears the threshold.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Render one error as a graphical miette report.
pub fn render(error: &ConfigError) -> String {
    let mut out = String::new();
    match GraphicalReportHandler::new().render_report(&mut out, error) {
        Ok(()) => out,
        Err(_) => format!("error: {error}\n"),
    }
}

/// Print every error to stderr.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        eprint!("{}", render(error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn suggests_closest_field_name() {
        let valid = &["developer_id", "email_field", "password_field", "wav_field"];
        assert_eq!(suggest_key("emial_field", valid).as_deref(), Some("email_field"));
        assert_eq!(suggest_key("wav_feild", valid).as_deref(), Some("wav_field"));
    }

    #[test]
    fn no_suggestion_for_distant_key() {
        let valid = &["host", "port", "strategy_name", "log_level"];
        assert_eq!(suggest_key("zzzzzz", valid), None);
    }

    #[test]
    fn key_offset_respects_section() {
        let content = "[gateway]\nconfidnce = 1\n\n[strategy]\n  confidnce = 90\n";
        let offset = find_key_offset(content, &path(&["strategy"]), "confidnce").unwrap();
        assert_eq!(offset, content.rfind("confidnce").unwrap());
    }

    #[test]
    fn key_offset_ignores_prefix_matches() {
        let content = "[strategy]\naccuracy_passes = 5\naccuracy = 2\n";
        let offset = find_key_offset(content, &path(&["strategy"]), "accuracy").unwrap();
        assert_eq!(&content[offset..offset + 12], "accuracy = 2");
    }

    #[test]
    fn key_offset_in_array_of_tables() {
        let content = "[[accounts]]\nemail = \"a@x.com\"\nlable = \"A\"\n";
        let offset = find_key_offset(content, &path(&["accounts", "0"]), "lable").unwrap();
        assert_eq!(&content[offset..offset + 5], "lable");
    }

    #[test]
    fn unknown_field_carries_suggestion_and_span() {
        let toml = "[strategy]\nconfidnce = 90\n";
        let err = crate::loader::load_config_from_str(toml).expect_err("unknown key");
        let errors = figment_to_config_errors(err, &[SourceFile::new("<inline>", toml)]);

        let Some(ConfigError::UnknownKey {
            key,
            suggestion,
            span,
            ..
        }) = errors.first()
        else {
            panic!("expected UnknownKey, got {errors:?}");
        };
        assert_eq!(key, "confidnce");
        assert_eq!(suggestion.as_deref(), Some("confidence"));
        assert_eq!(span.map(|s| s.offset()), Some(toml.find("confidnce").unwrap()));
    }

    #[test]
    fn missing_file_renders_its_path() {
        let rendered = render(&ConfigError::FileNotFound {
            path: "/nope/vocalis.toml".into(),
        });
        assert!(rendered.contains("/nope/vocalis.toml"), "got: {rendered}");
    }
}
