//! Translation key extraction.
//!
//! Every pattern is applied to the whole file text and capture group 1 is
//! taken as the key literal. A capture is rejected when it contains `$`
//! (computed at runtime) or `::` (a package catalogue key), and is then
//! normalized from PHP string-literal syntax to the bare key.

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;

use crate::core::patterns::TransPatterns;

/// Marks a key whose value is only known at runtime.
pub const INTERPOLATION_MARKER: char = '$';

/// Separates a package namespace from the key (`package::file.key`).
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Applies [`TransPatterns`] to source text.
#[derive(Debug, Clone)]
pub struct KeyExtractor {
    patterns: TransPatterns,
}

impl KeyExtractor {
    pub fn new(patterns: TransPatterns) -> Self {
        Self { patterns }
    }

    /// Extract the set of literal keys referenced in `text`.
    pub fn extract(&self, text: &str) -> HashSet<String> {
        let mut keys = HashSet::new();
        for pattern in self.patterns.iter() {
            for captures in pattern.captures_iter(text) {
                let Some(raw) = captures.get(1) else {
                    continue;
                };
                if let Some(key) = accept_key(raw.as_str()) {
                    keys.insert(key);
                }
            }
        }
        keys
    }

    /// Read a file and extract its keys.
    pub fn extract_file(&self, path: &Path) -> std::io::Result<HashSet<String>> {
        let bytes = fs::read(path)?;
        Ok(self.extract(&String::from_utf8_lossy(&bytes)))
    }
}

/// Apply the filters and normalization to one raw capture.
///
/// Returns `None` for captures that are not compile-time literal keys.
pub fn accept_key(raw: &str) -> Option<String> {
    if raw.contains(INTERPOLATION_MARKER) || raw.contains(NAMESPACE_SEPARATOR) {
        return None;
    }
    let key = normalize_literal(raw)?;
    (!key.is_empty()).then_some(key)
}

/// Turn the captured argument into the key it denotes.
///
/// - `'a.b'` / `"a.b"` are unquoted, resolving `\'`, `\"` and `\\`
/// - `'a.' . 'b'` concatenations of literals are joined
/// - a capture with no quotes at all is already a bare key
///
/// Anything else mixes literals with code and yields `None`.
fn normalize_literal(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if !trimmed.contains(['\'', '"']) {
        return Some(trimmed.to_string());
    }

    let mut key = String::new();
    let mut rest = trimmed;
    loop {
        let (literal, tail) = take_quoted(rest)?;
        key.push_str(&literal);
        let tail = tail.trim_start();
        if tail.is_empty() {
            return Some(key);
        }
        rest = tail.strip_prefix('.')?.trim_start();
    }
}

/// Split a leading quoted literal off `input`, returning its unescaped
/// content and the remaining text.
fn take_quoted(input: &str) -> Option<(String, &str)> {
    let mut chars = input.char_indices();
    let (_, quote) = chars.next()?;
    if quote != '\'' && quote != '"' {
        return None;
    }

    let mut value = String::new();
    while let Some((idx, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, escaped)) if escaped == quote || escaped == '\\' => value.push(escaped),
                Some((_, other)) => {
                    value.push('\\');
                    value.push(other);
                }
                None => return None,
            },
            c if c == quote => return Some((value, &input[idx + c.len_utf8()..])),
            c => value.push(c),
        }
    }
    None
}

/// Keys referenced across a set of source files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// Every referenced key, with the files referencing it.
    pub usages: BTreeMap<String, BTreeSet<PathBuf>>,
    /// Number of files read successfully.
    pub files_scanned: usize,
    /// Files that could not be read, with the reason.
    pub unreadable: Vec<(PathBuf, String)>,
}

impl ScanResult {
    pub fn keys(&self) -> BTreeSet<String> {
        self.usages.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.usages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.usages.is_empty()
    }

    /// Merge the keys extracted from one file.
    pub fn add_file(&mut self, path: &Path, keys: HashSet<String>) {
        self.files_scanned += 1;
        for key in keys {
            self.usages
                .entry(key)
                .or_default()
                .insert(path.to_path_buf());
        }
    }
}

/// Extract keys from every file in parallel and merge them.
///
/// Files are read and matched on the rayon pool; the per-file sets are
/// merged afterwards on the calling thread.
pub fn scan_sources(files: &[PathBuf], extractor: &KeyExtractor) -> ScanResult {
    let per_file: Vec<(&PathBuf, std::io::Result<HashSet<String>>)> = files
        .par_iter()
        .map(|path| (path, extractor.extract_file(path)))
        .collect();

    let mut result = ScanResult::default();
    for (path, keys) in per_file {
        match keys {
            Ok(keys) => result.add_file(path, keys),
            Err(e) => result.unreadable.push((path.clone(), e.to_string())),
        }
    }
    result
}
