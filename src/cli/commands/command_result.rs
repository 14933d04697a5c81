use super::super::actions::Operation;
use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Check,
    Sync(SyncSummary),
    Find(FindSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct SyncSummary {
    pub missing_count: usize,
    pub obsolete_count: usize,
    /// Files that would be (or were) written.
    pub file_count: usize,
    pub is_apply: bool,
    pub keep_obsolete: bool,
    /// Keys actually added and removed; zero in dry-run.
    pub applied_count: usize,
    /// Planned operations, previewed in dry-run.
    pub operations: Vec<Operation>,
}

/// Source files referencing keys that match the lemma.
#[derive(Debug)]
pub struct FindSummary {
    pub lemma: String,
    pub matches: Vec<FindMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindMatch {
    pub file_path: String,
    /// Matching keys referenced by the file, sorted.
    pub keys: Vec<String>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running lemmascan commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 is returned when any issue was reported.
    /// If false, always exit 0 (used for commands that fix what they report).
    pub exit_on_errors: bool,
    /// All issues found, sorted.
    pub issues: Vec<Issue>,
    /// Number of files that failed to read or parse.
    pub parse_error_count: usize,
    /// Number of source files scanned.
    pub source_files_checked: usize,
    /// Number of locale files loaded.
    pub locale_files_checked: usize,
}
