//! Report formatting and printing utilities.
//!
//! Displays issues in cargo-style format. Kept apart from the core so
//! lemmascan can be used as a library.

use std::{
    collections::BTreeMap,
    io::{self, Write},
};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::actions::Operation;
use super::commands::{CommandResult, CommandSummary, FindSummary, InitSummary, SyncSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::LocaleFile;
use crate::issues::{Issue, Report, ReportLocation, Severity};
use crate::utils::pluralize;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Maximum number of usages to display per issue.
const MAX_USAGES_DISPLAY: usize = 3;

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    for issue in &sorted {
        print_issue(issue, writer);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success(source_files: usize, locale_files: usize) {
    print_success_to(source_files, locale_files, &mut io::stdout().lock());
}

pub fn print_success_to<W: Write>(source_files: usize, locale_files: usize, writer: &mut W) {
    let checked = if locale_files == 0 {
        format!("Checked {}", pluralize(source_files, "source file", "source files"))
    } else {
        format!(
            "Checked {}, {}",
            pluralize(source_files, "source file", "source files"),
            pluralize(locale_files, "locale file", "locale files")
        )
    };
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("{} - no issues found", checked).green()
    );
}

/// Print a warning about files that could not be read.
pub fn print_parse_warning(count: usize, verbose: bool) {
    print_parse_warning_to(count, verbose, &mut io::stderr().lock());
}

pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be read (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    let location = match issue.location() {
        ReportLocation::Key { path, key } => format!("{} ({})", path, key),
        ReportLocation::File { path } => path.to_string(),
    };
    let _ = writeln!(writer, "  {} {}", "-->".blue(), location);

    if let Some(details) = issue.details() {
        let _ = writeln!(writer, "  {} {} {}", "=".blue(), "note:".bold(), details);
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(writer, "  {} {} {}", "=".blue(), "hint:".bold().cyan(), hint);
    }

    print_usages(issue.usages(), writer);

    let _ = writeln!(writer);
}

fn print_usages<W: Write>(usages: &[String], writer: &mut W) {
    let total = usages.len();
    let display_count = total.min(MAX_USAGES_DISPLAY);

    for (i, usage) in usages.iter().take(display_count).enumerate() {
        let is_last = i == display_count - 1;
        let remaining = total.saturating_sub(display_count);
        let suffix = if is_last && remaining > 0 {
            format!(" (and {} more)", remaining)
        } else {
            String::new()
        };

        let _ = writeln!(
            writer,
            "  {} {} {}{}",
            "=".blue(),
            "used:".bold(),
            usage,
            suffix
        );
    }
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Warning)
        .count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} problems ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

pub fn print(result: &CommandResult, verbose: bool) {
    print_command_output(result, verbose);

    if matches!(result.summary, CommandSummary::Check) {
        if result.issues.is_empty() {
            print_success(result.source_files_checked, result.locale_files_checked);
        }
    } else {
        // `check` lists unreadable files with the other issues.
        print_parse_warning(result.parse_error_count, verbose);
    }
}

fn print_command_output(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Check => {
            report(&result.issues);
        }
        CommandSummary::Sync(summary) => {
            if verbose {
                report(&result.issues);
            }
            print_sync_to(summary, &mut io::stdout().lock());
        }
        CommandSummary::Find(summary) => {
            if verbose {
                report(&result.issues);
            }
            print_find_to(summary, &mut io::stdout().lock());
        }
        CommandSummary::Init(summary) => {
            print_init(summary);
        }
    }
}

fn print_sync_to<W: Write>(summary: &SyncSummary, writer: &mut W) {
    let total = summary.missing_count + summary.obsolete_count;
    if total == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "Locale files are in sync".green()
        );
        return;
    }

    if summary.is_apply {
        let _ = writeln!(
            writer,
            "{} {} in {} (processed {}).",
            "Updated".green().bold(),
            pluralize(summary.applied_count, "key", "keys"),
            pluralize(summary.file_count, "file", "files"),
            pluralize(total, "key", "keys")
        );
        for (file, (added, removed)) in per_file_counts(&summary.operations) {
            let _ = writeln!(writer, "  {}: {} added, {} removed", file, added, removed);
        }
    } else {
        for op in &summary.operations {
            let _ = writeln!(writer, "{}", op.describe());
        }
        let _ = writeln!(
            writer,
            "{} {} in {}:",
            "Would update".yellow().bold(),
            pluralize(total, "key", "keys"),
            pluralize(summary.file_count, "file", "files")
        );
    }

    if summary.missing_count > 0 {
        let _ = writeln!(writer, "  - missing: {} added", summary.missing_count);
    }
    if summary.obsolete_count > 0 {
        let _ = writeln!(writer, "  - obsolete: {} removed", summary.obsolete_count);
    }
    if summary.keep_obsolete {
        let _ = writeln!(writer, "  - obsolete keys kept ({})", "--keep-obsolete".cyan());
    }
    if !summary.is_apply {
        let _ = writeln!(writer, "Run with {} to write these changes.", "--apply".cyan());
    }
}

/// Planned additions and removals per locale file.
fn per_file_counts(operations: &[Operation]) -> BTreeMap<&LocaleFile, (usize, usize)> {
    let mut counts: BTreeMap<&LocaleFile, (usize, usize)> = BTreeMap::new();
    for op in operations {
        let entry = counts.entry(op.file()).or_default();
        match op {
            Operation::AddLocaleKey { .. } => entry.0 += 1,
            Operation::DeleteLocaleKey { .. } => entry.1 += 1,
        }
    }
    counts
}

fn print_find_to<W: Write>(summary: &FindSummary, writer: &mut W) {
    if summary.matches.is_empty() {
        let _ = writeln!(
            writer,
            "{} No translation key matching \"{}\"",
            FAILURE_MARK.red(),
            summary.lemma
        );
        return;
    }

    let width = summary
        .matches
        .iter()
        .map(|m| UnicodeWidthStr::width(m.file_path.as_str()))
        .max()
        .unwrap_or(0);

    for m in &summary.matches {
        let padding = width - UnicodeWidthStr::width(m.file_path.as_str());
        let _ = writeln!(
            writer,
            "{}{:padding$}  {}",
            m.file_path,
            "",
            m.keys.join(", ").dimmed(),
            padding = padding
        );
    }

    let _ = writeln!(
        writer,
        "{} {} referencing \"{}\"",
        SUCCESS_MARK.green(),
        pluralize(summary.matches.len(), "file", "files"),
        summary.lemma
    );
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

// ============================================================
// Tests
// ============================================================
