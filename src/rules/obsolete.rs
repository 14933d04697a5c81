//! Obsolete translation key detection rule.
//!
//! Detects keys defined in a locale file that no source file references and
//! that no `neverObsoleteKeys` entry protects.

use std::path::Path;

use crate::{
    core::{LocaleStore, ReconciliationReport, ScanContext},
    issues::ObsoleteKeyIssue,
    utils::relative_path,
};

pub fn check_obsolete_keys_issues(ctx: &ScanContext) -> Vec<ObsoleteKeyIssue> {
    check_obsolete_keys(ctx.report(), ctx.store(), &ctx.project_root)
}

pub fn check_obsolete_keys(
    report: &ReconciliationReport,
    store: &LocaleStore,
    project_root: &Path,
) -> Vec<ObsoleteKeyIssue> {
    report
        .files
        .iter()
        .flat_map(|(file, file_report)| {
            let file_path = relative_path(&file.path(&store.lang_root), project_root);
            let values = store.get(file);
            file_report.obsolete.iter().map(move |key| ObsoleteKeyIssue {
                file: file.clone(),
                file_path: file_path.clone(),
                key: key.clone(),
                value: values
                    .and_then(|set| set.get(key))
                    .cloned()
                    .unwrap_or_default(),
            })
        })
        .collect()
}
