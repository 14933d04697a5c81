use std::{collections::BTreeMap, path::Path};

use anyhow::{Context, Result};
use regex::Regex;

use super::super::args::FindCommand;
use super::helper::finish;
use super::{CommandResult, CommandSummary, FindMatch, FindSummary};
use crate::{
    core::{
        ScanResult,
        context::{collect_sources, key_extractor, merged_config, source_walker},
        extract::scan_sources,
    },
    issues::{Issue, ParseErrorFileType, ParseErrorIssue},
    utils::relative_path,
};

/// How a lemma selects keys.
pub enum LemmaMatcher {
    Contains(String),
    Regex(Regex),
}

impl LemmaMatcher {
    pub fn new(lemma: &str, regex: bool) -> Result<Self> {
        if regex {
            let re = Regex::new(lemma).with_context(|| format!("Invalid regex: \"{}\"", lemma))?;
            Ok(Self::Regex(re))
        } else {
            Ok(Self::Contains(lemma.to_string()))
        }
    }

    pub fn is_match(&self, key: &str) -> bool {
        match self {
            Self::Contains(lemma) => key.contains(lemma.as_str()),
            Self::Regex(re) => re.is_match(key),
        }
    }
}

/// Group matching keys by the source file referencing them.
///
/// Files are sorted by path. With `project_root`, paths are shortened
/// relative to it.
pub fn find_matches(
    scan: &ScanResult,
    matcher: &LemmaMatcher,
    project_root: Option<&Path>,
) -> Vec<FindMatch> {
    let mut by_file: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, paths) in &scan.usages {
        if !matcher.is_match(key) {
            continue;
        }
        for path in paths {
            let file_path = match project_root {
                Some(root) => relative_path(path, root),
                None => path.to_string_lossy().to_string(),
            };
            by_file.entry(file_path).or_default().push(key.clone());
        }
    }

    by_file
        .into_iter()
        .map(|(file_path, mut keys)| {
            keys.sort();
            FindMatch { file_path, keys }
        })
        .collect()
}

pub fn find(cmd: FindCommand) -> Result<CommandResult> {
    let verbose = cmd.common.verbose;
    let matcher = LemmaMatcher::new(&cmd.lemma, cmd.regex)?;

    let (config, project_root) = merged_config(&cmd.common)?;
    let extractor = key_extractor(&config)?;
    let walker = source_walker(&config, &project_root, verbose)?;
    let files = collect_sources(&walker, verbose);
    let scan = scan_sources(&files, &extractor);

    let short_root = cmd.short.then_some(project_root.as_path());
    let matches = find_matches(&scan, &matcher, short_root);

    let issues: Vec<Issue> = scan
        .unreadable
        .iter()
        .map(|(path, error)| {
            Issue::ParseError(ParseErrorIssue {
                file_path: relative_path(path, &project_root),
                error: error.clone(),
                file_type: ParseErrorFileType::Source,
            })
        })
        .collect();

    Ok(finish(
        CommandSummary::Find(FindSummary {
            lemma: cmd.lemma,
            matches,
        }),
        issues,
        scan.files_scanned,
        0,
        false,
    ))
}
