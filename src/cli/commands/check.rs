use anyhow::Result;

use super::super::args::CheckCommand;
use super::{
    helper::finish,
    {CommandResult, CommandSummary},
};

use crate::{
    core::ScanContext,
    issues::Issue,
    rules::{missing::check_missing_keys_issues, obsolete::check_obsolete_keys_issues},
};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = ScanContext::new(&cmd.common)?;

    let mut all_issues: Vec<Issue> = Vec::new();
    all_issues.extend(
        check_missing_keys_issues(&ctx)
            .into_iter()
            .map(Issue::MissingKey),
    );
    if !cmd.no_obsolete {
        all_issues.extend(
            check_obsolete_keys_issues(&ctx)
                .into_iter()
                .map(Issue::ObsoleteKey),
        );
    }
    all_issues.extend(ctx.parse_errors().into_iter().map(Issue::ParseError));

    Ok(finish(
        CommandSummary::Check,
        all_issues,
        ctx.scan().files_scanned,
        ctx.store().file_count(),
        true,
    ))
}
