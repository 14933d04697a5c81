//! DeleteKey action.
//!
//! Deletes obsolete translation keys from locale files. Used by `lemmascan sync`.

use super::operation::Operation;
use super::traits::Action;
use crate::issues::ObsoleteKeyIssue;

pub struct DeleteKey;

impl Action<ObsoleteKeyIssue> for DeleteKey {
    fn to_operations(&self, issues: &[ObsoleteKeyIssue]) -> Vec<Operation> {
        issues
            .iter()
            .map(|issue| Operation::DeleteLocaleKey {
                file: issue.file.clone(),
                key: issue.key.clone(),
            })
            .collect()
    }
}
