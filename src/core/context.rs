use std::{
    cell::OnceCell,
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};
use colored::Colorize;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        extract::{KeyExtractor, ScanResult, scan_sources},
        lang_root::resolve_lang_root,
        locale::{LocaleScanWarning, LocaleStore, reader::load_locale_store},
        patterns::TransPatterns,
        reconcile::{ReconciliationReport, reconcile},
        walker::{SourceWalker, expand_roots},
    },
    issues::{ParseErrorFileType, ParseErrorIssue},
    utils::relative_path,
};

/// Everything one command needs: merged configuration, the source file list
/// and the loaded locale store.
///
/// Configuration is merged with the following priority (highest to lowest):
/// 1. CLI arguments (`--lang-path`)
/// 2. `.lemmascan.json`
/// 3. Built-in defaults
///
/// Source scanning and reconciliation run on first access.
pub struct ScanContext {
    pub config: Config,
    pub project_root: PathBuf,
    pub lang_root: PathBuf,
    /// Source files to scan, deduplicated and sorted.
    pub files: Vec<PathBuf>,
    pub verbose: bool,

    extractor: KeyExtractor,
    store: LocaleStore,
    locale_warnings: Vec<LocaleScanWarning>,
    scan: OnceCell<ScanResult>,
    report: OnceCell<ReconciliationReport>,
}

impl ScanContext {
    /// Build a context from command line arguments.
    ///
    /// Fails when the configuration is invalid or when no lang folder exists.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let (config, project_root) = merged_config(common_args)?;
        Self::with_config(config, project_root, common_args.verbose)
    }

    /// Build a context from an already merged configuration.
    pub fn with_config(config: Config, project_root: PathBuf, verbose: bool) -> Result<Self> {
        let extractor = key_extractor(&config)?;
        let lang_root = resolve_lang_root(&config.lang_root_candidates(&project_root))?;
        let walker = source_walker(&config, &project_root, verbose)?;

        let (files, (store, locale_warnings)) = rayon::join(
            || collect_sources(&walker, verbose),
            || load_locale_store(&lang_root, &config.locales, &config.ignore_lang_files),
        );

        if verbose {
            for warning in &locale_warnings {
                eprintln!(
                    "{} skipping {}: {}",
                    "warning:".bold().yellow(),
                    warning.file_path,
                    warning.error
                );
            }
            eprintln!(
                "{} {} source file(s), {} locale file(s) under {}",
                "note:".bold().cyan(),
                files.len(),
                store.file_count(),
                lang_root.display()
            );
        }

        Ok(Self {
            config,
            project_root,
            lang_root,
            files,
            verbose,
            extractor,
            store,
            locale_warnings,
            scan: OnceCell::new(),
            report: OnceCell::new(),
        })
    }

    pub fn store(&self) -> &LocaleStore {
        &self.store
    }

    /// Keys referenced by the source files (lazy).
    pub fn scan(&self) -> &ScanResult {
        self.scan.get_or_init(|| {
            let result = scan_sources(&self.files, &self.extractor);
            if self.verbose {
                for (path, error) in &result.unreadable {
                    eprintln!(
                        "{} {} - {}",
                        "warning:".bold().yellow(),
                        path.display(),
                        error
                    );
                }
            }
            result
        })
    }

    /// Per-file missing and obsolete keys (lazy).
    pub fn report(&self) -> &ReconciliationReport {
        self.report.get_or_init(|| {
            reconcile(
                &self.scan().keys(),
                &self.store,
                &self.config.ignore_lang_files,
                &self.config.never_obsolete_keys,
            )
        })
    }

    /// Files that could not be read: unreadable sources and malformed locale
    /// files.
    pub fn parse_errors(&self) -> Vec<ParseErrorIssue> {
        let sources = self.scan().unreadable.iter().map(|(path, error)| ParseErrorIssue {
            file_path: self.display_path(path),
            error: error.clone(),
            file_type: ParseErrorFileType::Source,
        });
        let locales = self.locale_warnings.iter().map(|warning| ParseErrorIssue {
            file_path: self.display_path(Path::new(&warning.file_path)),
            error: warning.error.clone(),
            file_type: ParseErrorFileType::Locale,
        });
        sources.chain(locales).collect()
    }

    /// Path relative to the project root when possible.
    pub fn display_path(&self, path: &Path) -> String {
        relative_path(path, &self.project_root)
    }
}

/// Load `.lemmascan.json` from the project root and apply CLI overrides
/// (CLI > config file > defaults).
pub fn merged_config(common_args: &CommonArgs) -> Result<(Config, PathBuf)> {
    let project_root = common_args
        .project_root
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let config_result = load_config(&project_root)?;
    if common_args.verbose && !config_result.from_file {
        eprintln!(
            "{} No {} found, using default configuration",
            "note:".bold().cyan(),
            CONFIG_FILE_NAME
        );
    }

    let mut config = config_result.config;
    if let Some(ref lang_path) = common_args.lang_path {
        config.lang_folder_path = Some(lang_path.to_string_lossy().to_string());
    }

    Ok((config, project_root))
}

pub fn key_extractor(config: &Config) -> Result<KeyExtractor> {
    let patterns = TransPatterns::from_config(&config.trans_methods)
        .context("Invalid 'transMethods' configuration")?;
    Ok(KeyExtractor::new(patterns))
}

/// Walker over the configured `folders`, placeholders and globs expanded.
pub fn source_walker(config: &Config, project_root: &Path, verbose: bool) -> Result<SourceWalker> {
    let file_pattern = config.file_regex()?;
    let roots = expand_roots(&config.source_folders(project_root), verbose);
    Ok(SourceWalker::new(roots, file_pattern))
}

/// Walk every root, returning the deduplicated, sorted file list.
///
/// Entries that cannot be read are skipped; in verbose mode they are listed.
pub fn collect_sources(walker: &SourceWalker, verbose: bool) -> Vec<PathBuf> {
    let mut files = BTreeSet::new();
    let mut iter = walker.files();
    for path in iter.by_ref() {
        files.insert(path);
    }

    let skipped = iter.skipped();
    if verbose && !skipped.is_empty() {
        eprintln!(
            "{} {} path(s) skipped due to access errors",
            "warning:".bold().yellow(),
            skipped.len()
        );
        for reason in skipped {
            eprintln!("  {}", reason);
        }
    }

    files.into_iter().collect()
}
