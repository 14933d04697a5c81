//! AddKey action.
//!
//! Adds missing translation keys to locale files. Used by `lemmascan sync`.

use super::operation::Operation;
use super::traits::Action;
use crate::issues::MissingKeyIssue;

/// Adds every missing key with a placeholder value.
///
/// The value is the configured prefix followed by the key as written inside
/// its file: `messages.nav.home` becomes `TODO: nav.home`.
pub struct AddKey {
    value_prefix: String,
}

impl AddKey {
    pub fn new(value_prefix: impl Into<String>) -> Self {
        Self {
            value_prefix: value_prefix.into(),
        }
    }

    pub fn placeholder(&self, issue: &MissingKeyIssue) -> String {
        format!("{}{}", self.value_prefix, issue.file.local_key(&issue.key))
    }
}

impl Action<MissingKeyIssue> for AddKey {
    fn to_operations(&self, issues: &[MissingKeyIssue]) -> Vec<Operation> {
        issues
            .iter()
            .map(|issue| Operation::AddLocaleKey {
                file: issue.file.clone(),
                key: issue.key.clone(),
                value: self.placeholder(issue),
            })
            .collect()
    }
}
