//! Missing translation key detection rule.
//!
//! Detects keys referenced in source code but absent from a locale file.
//! Every managed locale is checked, so one key can yield one issue per locale.

use std::path::Path;

use crate::{
    core::{ReconciliationReport, ScanContext, ScanResult},
    issues::MissingKeyIssue,
    utils::relative_path,
};

pub fn check_missing_keys_issues(ctx: &ScanContext) -> Vec<MissingKeyIssue> {
    check_missing_keys(
        ctx.report(),
        ctx.scan(),
        &ctx.lang_root,
        &ctx.project_root,
    )
}

/// Turn the missing sets of a report into issues.
///
/// # Arguments
/// * `report` - Reconciliation result
/// * `scan` - Scan result, used to attach the referencing source files
/// * `lang_root` - Locale root the report was computed against
/// * `project_root` - Paths are displayed relative to this directory
pub fn check_missing_keys(
    report: &ReconciliationReport,
    scan: &ScanResult,
    lang_root: &Path,
    project_root: &Path,
) -> Vec<MissingKeyIssue> {
    report
        .files
        .iter()
        .flat_map(|(file, file_report)| {
            let file_path = relative_path(&file.path(lang_root), project_root);
            file_report.missing.iter().map(move |key| MissingKeyIssue {
                file: file.clone(),
                file_path: file_path.clone(),
                key: key.clone(),
                usages: scan
                    .usages
                    .get(key)
                    .map(|paths| {
                        paths
                            .iter()
                            .map(|p| relative_path(p, project_root))
                            .collect()
                    })
                    .unwrap_or_default(),
            })
        })
        .collect()
}
