//! Locale storage.
//!
//! Locale files live under a lang root in two shapes:
//!
//! - `<root>/<locale>/<group>.json`: nested JSON, keys addressed as `group.key`
//! - `<root>/<locale>.json`: flat JSON, keys addressed verbatim
//!
//! ## Module Structure
//!
//! - `reader`: Loads every locale file into a [`LocaleStore`]
//! - `writer`: Merge-writes changes back to one locale file

pub mod reader;
pub mod writer;

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    path::{Path, PathBuf},
};

pub use reader::{LocaleScanWarning, read_locale_file};
pub(crate) use writer::compare_key_paths;
pub use writer::{KeyAction, LocaleEditor, write_locale_set};

/// Extension of every locale file.
pub const LOCALE_FILE_EXTENSION: &str = "json";

/// Flat key→value mapping of one locale file.
pub type LocaleSet = BTreeMap<String, String>;

/// Identity of a single locale file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocaleFile {
    pub locale: String,
    /// `None` for the locale's root JSON file.
    pub group: Option<String>,
}

impl LocaleFile {
    pub fn group(locale: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            group: Some(group.into()),
        }
    }

    pub fn root(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            group: None,
        }
    }

    /// The file a key belongs to within `locale`.
    pub fn for_key(locale: &str, key: &str) -> Self {
        match key_group(key) {
            Some(group) => Self::group(locale, group),
            None => Self::root(locale),
        }
    }

    pub fn file_name(&self) -> String {
        let stem = self.group.as_deref().unwrap_or(&self.locale);
        format!("{}.{}", stem, LOCALE_FILE_EXTENSION)
    }

    pub fn path(&self, lang_root: &Path) -> PathBuf {
        match &self.group {
            Some(_) => lang_root.join(&self.locale).join(self.file_name()),
            None => lang_root.join(self.file_name()),
        }
    }

    /// Whether `ignore_lang_files` names this file, by stem or full name.
    pub fn is_ignored(&self, ignore_lang_files: &[String]) -> bool {
        let stem = self.group.as_deref().unwrap_or(&self.locale);
        let file_name = self.file_name();
        ignore_lang_files
            .iter()
            .any(|ignored| ignored == stem || *ignored == file_name)
    }

    /// Key as stored in the store (`welcome` → `messages.welcome`).
    pub fn qualify(&self, local_key: &str) -> String {
        match &self.group {
            Some(group) => format!("{}.{}", group, local_key),
            None => local_key.to_string(),
        }
    }

    /// Key as written inside the file (`messages.welcome` → `welcome`).
    pub fn local_key<'a>(&self, key: &'a str) -> &'a str {
        match &self.group {
            Some(group) => key
                .strip_prefix(group.as_str())
                .and_then(|rest| rest.strip_prefix('.'))
                .unwrap_or(key),
            None => key,
        }
    }
}

impl fmt::Display for LocaleFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.group {
            Some(_) => write!(f, "{}/{}", self.locale, self.file_name()),
            None => write!(f, "{}", self.file_name()),
        }
    }
}

/// Group a key is stored under, if any.
///
/// `messages.welcome` belongs to group `messages`. Keys without a dot, with an
/// empty side, or whose first segment contains whitespace (sentence keys such
/// as `Welcome back. Log in`) belong to the locale's root JSON file.
pub fn key_group(key: &str) -> Option<&str> {
    let (group, rest) = key.split_once('.')?;
    if group.is_empty() || rest.is_empty() || group.chars().any(char::is_whitespace) {
        return None;
    }
    Some(group)
}

/// Every locale file under a lang root.
#[derive(Debug, Clone, Default)]
pub struct LocaleStore {
    pub lang_root: PathBuf,
    /// Locales found (or configured) under the root.
    pub locales: BTreeSet<String>,
    pub sets: BTreeMap<LocaleFile, LocaleSet>,
    /// Files that exist but could not be parsed.
    pub unreadable: BTreeMap<LocaleFile, String>,
}

impl LocaleStore {
    pub fn get(&self, file: &LocaleFile) -> Option<&LocaleSet> {
        self.sets.get(file)
    }

    /// Files of one locale, in order.
    pub fn files_of<'a>(&'a self, locale: &'a str) -> impl Iterator<Item = &'a LocaleFile> {
        self.sets.keys().filter(move |file| file.locale == locale)
    }

    pub fn key_count(&self, locale: &str) -> usize {
        self.sets
            .iter()
            .filter(|(file, _)| file.locale == locale)
            .map(|(_, set)| set.len())
            .sum()
    }

    pub fn file_count(&self) -> usize {
        self.sets.len()
    }

    pub fn is_unreadable(&self, file: &LocaleFile) -> bool {
        self.unreadable.contains_key(file)
    }
}
