use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;
use thiserror::Error;

use super::{LOCALE_FILE_EXTENSION, LocaleFile, LocaleSet, LocaleStore};

#[derive(Debug, Error)]
pub enum LocaleFileError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("root of {path} must be a JSON object")]
    NotAnObject { path: PathBuf },
}

/// A locale file that was skipped while loading the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleScanWarning {
    pub file: LocaleFile,
    pub file_path: String,
    pub error: String,
}

/// Parse one locale file into a flat, qualified [`LocaleSet`].
///
/// A file that does not exist is an empty set.
pub fn read_locale_file(lang_root: &Path, file: &LocaleFile) -> Result<LocaleSet, LocaleFileError> {
    let path = file.path(lang_root);
    if !path.exists() {
        return Ok(LocaleSet::new());
    }

    let content = fs::read_to_string(&path).map_err(|source| LocaleFileError::Read {
        path: path.clone(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(LocaleSet::new());
    }

    let json: Value = serde_json::from_str(&content).map_err(|source| LocaleFileError::Parse {
        path: path.clone(),
        source,
    })?;
    if !json.is_object() {
        return Err(LocaleFileError::NotAnObject { path });
    }

    let mut set = LocaleSet::new();
    let prefix = file.group.clone().unwrap_or_default();
    flatten_json(&json, prefix, &mut set);
    Ok(set)
}

/// Flatten nested JSON into dotted keys.
///
/// Arrays expand with their indices (`items.0`), scalars are stringified and
/// `null` becomes the empty string.
pub(crate) fn flatten_json(value: &Value, prefix: String, result: &mut LocaleSet) {
    let join = |segment: &str| {
        if prefix.is_empty() {
            segment.to_string()
        } else {
            format!("{}.{}", prefix, segment)
        }
    };

    match value {
        Value::Object(map) => {
            for (key, val) in map {
                flatten_json(val, join(key), result);
            }
        }
        Value::Array(items) => {
            for (index, val) in items.iter().enumerate() {
                flatten_json(val, join(&index.to_string()), result);
            }
        }
        Value::String(s) => {
            result.insert(prefix, s.clone());
        }
        Value::Null => {
            result.insert(prefix, String::new());
        }
        other => {
            result.insert(prefix, other.to_string());
        }
    }
}

fn is_locale_file(path: &Path) -> bool {
    path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(LOCALE_FILE_EXTENSION)
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

fn dir_entries(dir: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(entries) => entries.flatten().map(|entry| entry.path()).collect(),
        Err(_) => Vec::new(),
    };
    entries.sort();
    entries
}

/// Enumerate the locale files under `lang_root`.
///
/// Locales are the subdirectories of the root plus the stems of its JSON
/// files. `locales` restricts the result when non-empty.
pub fn discover_locale_files(lang_root: &Path, locales: &[String]) -> Vec<LocaleFile> {
    let wanted = |locale: &str| locales.is_empty() || locales.iter().any(|l| l == locale);
    let mut files = Vec::new();

    for path in dir_entries(lang_root) {
        let Some(name) = file_stem(&path) else {
            continue;
        };
        if path.is_dir() {
            let Some(locale) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !wanted(locale) {
                continue;
            }
            for group_path in dir_entries(&path) {
                if is_locale_file(&group_path)
                    && let Some(group) = file_stem(&group_path)
                {
                    files.push(LocaleFile::group(locale, group));
                }
            }
        } else if is_locale_file(&path) && wanted(&name) {
            files.push(LocaleFile::root(name));
        }
    }

    files.sort();
    files
}

/// Load every locale file under `lang_root` into a [`LocaleStore`].
///
/// A missing or empty root yields an empty store. Files named in
/// `ignore_lang_files` are not read. Files that fail to parse are recorded
/// in [`LocaleStore::unreadable`] and returned as warnings.
pub fn load_locale_store(
    lang_root: &Path,
    locales: &[String],
    ignore_lang_files: &[String],
) -> (LocaleStore, Vec<LocaleScanWarning>) {
    let mut store = LocaleStore {
        lang_root: lang_root.to_path_buf(),
        ..Default::default()
    };
    let mut warnings = Vec::new();

    if lang_root.is_dir() {
        for path in dir_entries(lang_root) {
            let locale = if path.is_dir() {
                path.file_name().and_then(|n| n.to_str()).map(String::from)
            } else if is_locale_file(&path) {
                file_stem(&path)
            } else {
                None
            };
            if let Some(locale) = locale
                && (locales.is_empty() || locales.contains(&locale))
            {
                store.locales.insert(locale);
            }
        }
    }
    store.locales.extend(locales.iter().cloned());

    for file in discover_locale_files(lang_root, locales) {
        if file.is_ignored(ignore_lang_files) {
            continue;
        }
        match read_locale_file(lang_root, &file) {
            Ok(set) => {
                store.sets.insert(file, set);
            }
            Err(e) => {
                warnings.push(LocaleScanWarning {
                    file: file.clone(),
                    file_path: file.path(lang_root).to_string_lossy().to_string(),
                    error: e.to_string(),
                });
                store.unreadable.insert(file, e.to_string());
            }
        }
    }

    (store, warnings)
}
