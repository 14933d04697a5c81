//! Translation-call patterns.
//!
//! `transMethods` may arrive as arbitrarily nested arrays and objects of regex
//! strings. They are flattened and compiled exactly once, when the
//! configuration is loaded, into an ordered [`TransPatterns`] list.

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid regex \"{pattern}\": {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("pattern \"{0}\" has no capturing group for the translation key")]
    NoCaptureGroup(String),
    #[error("unsupported value in pattern list: {0} (expected a string, array or object)")]
    UnsupportedValue(String),
}

/// Ordered, compiled translation-call patterns.
///
/// Capture group 1 of every pattern isolates the key literal.
#[derive(Debug, Clone, Default)]
pub struct TransPatterns {
    patterns: Vec<Regex>,
}

impl TransPatterns {
    /// Flatten and compile a `transMethods` configuration value.
    pub fn from_config(value: &Value) -> Result<Self, PatternError> {
        let mut sources = Vec::new();
        flatten_into(value, &mut sources)?;
        Self::compile(sources)
    }

    /// Compile an already flat list of pattern strings.
    pub fn compile<I, S>(sources: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = sources
            .into_iter()
            .map(|source| compile_one(source.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Regex> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn compile_one(source: &str) -> Result<Regex, PatternError> {
    let regex = Regex::new(source).map_err(|e| PatternError::InvalidRegex {
        pattern: source.to_string(),
        source: e,
    })?;
    // captures_len counts the implicit whole-match group.
    if regex.captures_len() < 2 {
        return Err(PatternError::NoCaptureGroup(source.to_string()));
    }
    Ok(regex)
}

fn flatten_into(value: &Value, out: &mut Vec<String>) -> Result<(), PatternError> {
    match value {
        Value::String(s) => out.push(s.clone()),
        Value::Array(items) => {
            for item in items {
                flatten_into(item, out)?;
            }
        }
        Value::Object(map) => {
            for item in map.values() {
                flatten_into(item, out)?;
            }
        }
        Value::Null => {}
        other => return Err(PatternError::UnsupportedValue(other.to_string())),
    }
    Ok(())
}

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}
