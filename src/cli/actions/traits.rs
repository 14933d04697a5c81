//! Action trait definition.
//!
//! Actions convert Issues into Operations. One Action type may implement
//! the trait for several Issue types.

use std::{cmp::Ordering, collections::BTreeMap, path::Path};

use anyhow::Result;
use colored::Colorize;

use super::operation::Operation;
use crate::core::{
    LocaleFile,
    locale::{KeyAction, LocaleEditor, compare_key_paths},
};

/// Statistics from running an action.
#[derive(Debug, Clone, Default)]
pub struct ActionStats {
    /// Number of operations processed.
    pub processed: usize,
    /// Number of operations that changed nothing (key already present or absent).
    pub skipped: usize,
    /// Number of changes actually applied to files.
    pub changes_applied: usize,
    /// Number of files written.
    pub files_modified: usize,
}

/// Where and how locale files are written.
#[derive(Debug, Clone, Copy)]
pub struct WriteTarget<'a> {
    pub lang_root: &'a Path,
    /// Write group files as flat `{"a.b": ...}` objects.
    pub flat: bool,
}

/// Converts issues into operations.
///
/// ```ignore
/// let ops = AddKey::new(prefix).to_operations(&issues);
/// execute_operations(&ops, target)?;
/// ```
pub trait Action<I> {
    /// Convert issues to low-level operations.
    fn to_operations(&self, issues: &[I]) -> Vec<Operation>;
}

/// Apply operations file by file.
///
/// Each touched file is opened once, edited in memory and saved only when
/// something changed.
pub(crate) fn execute_operations(ops: &[Operation], target: WriteTarget<'_>) -> Result<ActionStats> {
    let mut by_file: BTreeMap<&LocaleFile, Vec<&Operation>> = BTreeMap::new();
    for op in ops {
        by_file.entry(op.file()).or_default().push(op);
    }

    let mut stats = ActionStats {
        processed: ops.len(),
        ..Default::default()
    };

    for (file, mut file_ops) in by_file {
        // Additions first, then removals from the back so array indices
        // never shift under a pending removal.
        file_ops.sort_by(|a, b| match (a, b) {
            (Operation::AddLocaleKey { .. }, Operation::DeleteLocaleKey { .. }) => Ordering::Less,
            (Operation::DeleteLocaleKey { .. }, Operation::AddLocaleKey { .. }) => {
                Ordering::Greater
            }
            (Operation::AddLocaleKey { .. }, Operation::AddLocaleKey { .. }) => Ordering::Equal,
            (Operation::DeleteLocaleKey { key: a, .. }, Operation::DeleteLocaleKey { key: b, .. }) => {
                compare_key_paths(b, a)
            }
        });

        let mut editor = LocaleEditor::open(target.lang_root, file, target.flat)?;
        let mut changed = 0;

        for op in file_ops {
            let applied = match op {
                Operation::AddLocaleKey { key, value, .. } => {
                    if editor.contains(key) {
                        false
                    } else {
                        match editor.set(key, value.clone()) {
                            KeyAction::Added => true,
                            KeyAction::Updated => false,
                            KeyAction::Conflict => {
                                eprintln!(
                                    "{} not adding {} to {}: it collides with an existing entry",
                                    "warning:".bold().yellow(),
                                    key,
                                    file
                                );
                                false
                            }
                        }
                    }
                }
                Operation::DeleteLocaleKey { key, .. } => editor.remove(key),
            };
            if applied {
                changed += 1;
            } else {
                stats.skipped += 1;
            }
        }

        if changed > 0 {
            editor.save()?;
            stats.changes_applied += changed;
            stats.files_modified += 1;
        }
    }

    Ok(stats)
}
