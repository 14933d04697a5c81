//! Source file enumeration.

use std::path::{Path, PathBuf};

use colored::Colorize;
use glob::glob;
use regex::Regex;
use walkdir::WalkDir;

use crate::core::patterns::is_glob_pattern;

/// Walks one or more root directories, yielding files whose name matches
/// the configured file pattern.
///
/// The walker itself holds no iteration state: every call to [`files`]
/// starts a fresh pre-order traversal.
///
/// [`files`]: SourceWalker::files
#[derive(Debug, Clone)]
pub struct SourceWalker {
    roots: Vec<PathBuf>,
    file_pattern: Regex,
}

impl SourceWalker {
    pub fn new(roots: Vec<PathBuf>, file_pattern: Regex) -> Self {
        Self {
            roots,
            file_pattern,
        }
    }

    pub fn files(&self) -> SourceFiles<'_> {
        SourceFiles {
            file_pattern: &self.file_pattern,
            roots: self.roots.iter(),
            current: None,
            skipped: Vec::new(),
        }
    }
}

impl<'a> IntoIterator for &'a SourceWalker {
    type Item = PathBuf;
    type IntoIter = SourceFiles<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.files()
    }
}

/// Lazy file sequence produced by [`SourceWalker::files`].
///
/// Entries that cannot be read are recorded in [`skipped`](SourceFiles::skipped)
/// and never end the sequence.
pub struct SourceFiles<'a> {
    file_pattern: &'a Regex,
    roots: std::slice::Iter<'a, PathBuf>,
    current: Option<walkdir::IntoIter>,
    skipped: Vec<String>,
}

impl SourceFiles<'_> {
    /// Descriptions of the entries skipped so far.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.file_pattern.is_match(name))
    }
}

impl Iterator for SourceFiles<'_> {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let Some(walker) = self.current.as_mut() else {
                let root = self.roots.next()?;
                if root.is_dir() {
                    self.current = Some(WalkDir::new(root).into_iter());
                }
                continue;
            };

            match walker.next() {
                Some(Ok(entry)) => {
                    let path = entry.path();
                    if path.is_file() && self.matches(path) {
                        return Some(entry.into_path());
                    }
                }
                Some(Err(e)) => self.skipped.push(e.to_string()),
                None => self.current = None,
            }
        }
    }
}

/// Expand wildcard folders into the directories they match.
///
/// Literal folders are kept as-is, even when they do not exist; the walker
/// treats a missing root as empty.
pub fn expand_roots(folders: &[PathBuf], verbose: bool) -> Vec<PathBuf> {
    let mut roots = Vec::new();
    for folder in folders {
        let pattern = folder.to_string_lossy();
        if !is_glob_pattern(&pattern) {
            if verbose && !folder.exists() {
                eprintln!(
                    "{} Source folder does not exist: {}",
                    "warning:".bold().yellow(),
                    folder.display()
                );
            }
            roots.push(folder.clone());
            continue;
        }

        match glob(&pattern) {
            Ok(entries) => roots.extend(entries.flatten().filter(|entry| entry.is_dir())),
            Err(e) => {
                if verbose {
                    eprintln!(
                        "{} Invalid glob pattern '{}': {}",
                        "warning:".bold().yellow(),
                        pattern,
                        e
                    );
                }
            }
        }
    }
    roots
}
