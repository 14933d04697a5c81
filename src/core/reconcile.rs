//! Reconciliation of scanned keys against locale files.
//!
//! Everything here is a pure function of its inputs. Keys come out in
//! lexicographic order because every set is a `BTreeSet`.

use std::collections::{BTreeMap, BTreeSet};

use super::locale::{LocaleFile, LocaleStore};

/// Missing and obsolete keys of one locale file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReport {
    /// Referenced in code, absent from the file.
    pub missing: BTreeSet<String>,
    /// Present in the file, referenced nowhere and not exempted.
    pub obsolete: BTreeSet<String>,
}

impl FileReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.obsolete.is_empty()
    }
}

/// Per-file reconciliation result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationReport {
    pub files: BTreeMap<LocaleFile, FileReport>,
}

impl ReconciliationReport {
    pub fn missing_count(&self) -> usize {
        self.files.values().map(|r| r.missing.len()).sum()
    }

    pub fn obsolete_count(&self) -> usize {
        self.files.values().map(|r| r.obsolete.len()).sum()
    }
}

/// Whether `key` falls under a never-obsolete entry.
///
/// An entry exempts the key itself and every key below it at any depth:
/// `validation` exempts `validation.required` and `validation.custom.a.b`,
/// but not `validations.x`.
pub fn is_never_obsolete(key: &str, never_obsolete_keys: &[String]) -> bool {
    never_obsolete_keys.iter().any(|prefix| {
        key == prefix
            || key
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.starts_with('.'))
    })
}

/// The set kernel.
///
/// `missing = scan - locale` and `obsolete = (locale - scan) - never_obsolete`.
pub fn reconcile_keys<'a>(
    scan_keys: impl IntoIterator<Item = &'a String>,
    locale_keys: impl IntoIterator<Item = &'a String>,
    never_obsolete_keys: &[String],
) -> FileReport {
    let scan: BTreeSet<&String> = scan_keys.into_iter().collect();
    let locale: BTreeSet<&String> = locale_keys.into_iter().collect();

    FileReport {
        missing: scan.difference(&locale).map(|k| (*k).clone()).collect(),
        obsolete: locale
            .difference(&scan)
            .filter(|k| !is_never_obsolete(k, never_obsolete_keys))
            .map(|k| (*k).clone())
            .collect(),
    }
}

/// Reconcile scanned keys against every managed locale file.
///
/// Scan keys are routed to the file they belong to. Each locale's report
/// covers its existing files plus the files scan keys point to; ignored and
/// unreadable files are left out entirely.
pub fn reconcile(
    scan_keys: &BTreeSet<String>,
    store: &LocaleStore,
    ignore_lang_files: &[String],
    never_obsolete_keys: &[String],
) -> ReconciliationReport {
    let mut files = BTreeMap::new();

    for locale in &store.locales {
        let mut assigned: BTreeMap<LocaleFile, BTreeSet<&String>> = store
            .files_of(locale)
            .map(|file| (file.clone(), BTreeSet::new()))
            .collect();
        for key in scan_keys {
            assigned
                .entry(LocaleFile::for_key(locale, key))
                .or_default()
                .insert(key);
        }

        for (file, keys) in assigned {
            if file.is_ignored(ignore_lang_files) || store.is_unreadable(&file) {
                continue;
            }
            let empty = BTreeMap::new();
            let locale_set = store.get(&file).unwrap_or(&empty);
            let mut report = reconcile_keys(keys, locale_set.keys(), never_obsolete_keys);
            report.obsolete.retain(|key| !scan_keys.contains(key));
            files.insert(file, report);
        }
    }

    ReconciliationReport { files }
}
