use std::collections::BTreeSet;

use anyhow::Result;

use super::super::{
    actions::{Action, ActionStats, AddKey, DeleteKey, Operation, WriteTarget, execute_operations},
    args::SyncCommand,
};
use super::helper::finish;
use super::{CommandResult, CommandSummary, SyncSummary};
use crate::{
    core::ScanContext,
    issues::{Issue, MissingKeyIssue, ObsoleteKeyIssue},
    rules::{missing::check_missing_keys_issues, obsolete::check_obsolete_keys_issues},
};

pub fn sync(cmd: SyncCommand) -> Result<CommandResult> {
    let ctx = ScanContext::new(&cmd.common)?;
    let apply = cmd.apply;

    let missing_issues: Vec<MissingKeyIssue> = check_missing_keys_issues(&ctx);
    let obsolete_issues: Vec<ObsoleteKeyIssue> = if cmd.keep_obsolete {
        Vec::new()
    } else {
        check_obsolete_keys_issues(&ctx)
    };

    let add = AddKey::new(ctx.config.new_value_prefix.clone());
    let mut ops: Vec<Operation> = add.to_operations(&missing_issues);
    ops.extend(DeleteKey.to_operations(&obsolete_issues));

    let (file_count, applied_count) = if apply {
        let stats: ActionStats = execute_operations(
            &ops,
            WriteTarget {
                lang_root: &ctx.lang_root,
                flat: cmd.output_flat || ctx.config.output_flat,
            },
        )?;
        (stats.files_modified, stats.changes_applied)
    } else {
        let files: BTreeSet<_> = ops.iter().map(Operation::file).collect();
        (files.len(), 0)
    };

    let mut all_issues: Vec<Issue> = Vec::new();
    all_issues.extend(ctx.parse_errors().into_iter().map(Issue::ParseError));

    Ok(finish(
        CommandSummary::Sync(SyncSummary {
            missing_count: missing_issues.len(),
            obsolete_count: obsolete_issues.len(),
            file_count,
            is_apply: apply,
            keep_obsolete: cmd.keep_obsolete,
            applied_count,
            operations: ops,
        }),
        all_issues,
        ctx.scan().files_scanned,
        ctx.store().file_count(),
        false,
    ))
}
