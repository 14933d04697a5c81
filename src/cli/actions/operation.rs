//! Low-level locale file operations.

use colored::Colorize;

use crate::core::LocaleFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Add `key` with `value` to `file`.
    AddLocaleKey {
        file: LocaleFile,
        key: String,
        value: String,
    },
    /// Remove `key` from `file`.
    DeleteLocaleKey { file: LocaleFile, key: String },
}

impl Operation {
    pub fn file(&self) -> &LocaleFile {
        match self {
            Operation::AddLocaleKey { file, .. } | Operation::DeleteLocaleKey { file, .. } => file,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Operation::AddLocaleKey { key, .. } | Operation::DeleteLocaleKey { key, .. } => key,
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Operation::AddLocaleKey { file, key, value } => format!(
                "  {} {}: {} = \"{}\"",
                "+".green().bold(),
                file,
                key,
                value
            ),
            Operation::DeleteLocaleKey { file, key } => {
                format!("  {} {}: {}", "-".red().bold(), file, key)
            }
        }
    }
}
