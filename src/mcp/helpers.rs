//! Helper functions for MCP server operations.

use std::{collections::BTreeMap, path::Path};

use serde_json::Value;

use super::types::{KeyActionDetail, LocaleError, LocaleResult, TranslationEntry};
use crate::core::{
    LocaleFile,
    locale::{KeyAction, LocaleEditor, key_group},
};

/// Write one locale's keys, routing each to its group or root file.
///
/// Every key is validated and every file opened before anything is written,
/// so a bad entry or an unreadable file leaves the locale's files unchanged.
/// Files are saved one at a time; a failed save can leave the files saved
/// before it written. Keys that collide with an existing nested entry are
/// reported as `conflict` and not written.
pub fn process_locale_translation(
    entry: &TranslationEntry,
    lang_root: &Path,
    flat: bool,
) -> Result<LocaleResult, LocaleError> {
    let locale = entry.locale.as_str();
    validate_locale_name(locale).map_err(|msg| LocaleError::new(locale, msg))?;

    if entry.keys.is_empty() {
        return Err(LocaleError::new(locale, "Keys cannot be empty"));
    }

    let mut by_file: BTreeMap<LocaleFile, Vec<(&str, &str)>> = BTreeMap::new();
    for (key, value) in &entry.keys {
        validate_key_format(key)
            .map_err(|msg| LocaleError::new(locale, format!("Invalid key '{}': {}", key, msg)))?;
        let value = validate_value(value).map_err(|msg| {
            LocaleError::new(locale, format!("Invalid value for key '{}': {}", key, msg))
        })?;
        by_file
            .entry(LocaleFile::for_key(locale, key))
            .or_default()
            .push((key.as_str(), value));
    }

    let mut added_count = 0;
    let mut updated_count = 0;
    let mut details = Vec::new();
    let mut file_paths = Vec::new();

    let mut editors = Vec::with_capacity(by_file.len());
    for (file, keys) in by_file {
        let editor = LocaleEditor::open(lang_root, &file, flat)
            .map_err(|e| LocaleError::new(locale, format!("Failed to open {}: {:#}", file, e)))?;
        editors.push((file, keys, editor));
    }

    for (file, keys, mut editor) in editors {
        let mut changed = false;
        for (key, value) in keys {
            let action = editor.set(key, value);
            match action {
                KeyAction::Added => added_count += 1,
                KeyAction::Updated => updated_count += 1,
                KeyAction::Conflict => {}
            }
            changed |= action != KeyAction::Conflict;
            details.push(KeyActionDetail {
                key: key.to_string(),
                file: file.to_string(),
                action: action.as_str().to_string(),
            });
        }

        if !changed {
            continue;
        }
        editor
            .save()
            .map_err(|e| LocaleError::new(locale, format!("Failed to save {}: {:#}", file, e)))?;
        file_paths.push(editor.file_path().to_string_lossy().to_string());
    }

    Ok(LocaleResult {
        locale: locale.to_string(),
        success: true,
        file_paths: Some(file_paths),
        added_count: Some(added_count),
        updated_count: Some(updated_count),
        details: Some(details),
        error: None,
    })
}

/// Validate a locale name before it becomes a path component.
///
/// Only ASCII letters, digits, hyphens and underscores are allowed.
pub fn validate_locale_name(locale: &str) -> Result<(), String> {
    if locale.is_empty() {
        return Err("Locale name cannot be empty".to_string());
    }
    if !locale
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(
            "Locale name can only contain letters, numbers, hyphens, and underscores".to_string(),
        );
    }
    Ok(())
}

/// Validate a translation key.
///
/// Sentence keys (`Log in`) are accepted as-is. Keys that route to a group
/// file must have well-formed dot segments, and the group itself becomes a
/// file name.
pub fn validate_key_format(key: &str) -> Result<(), String> {
    if key.trim().is_empty() {
        return Err("Key cannot be empty".to_string());
    }
    if key.chars().any(char::is_control) {
        return Err("Key cannot contain control characters".to_string());
    }
    if key.contains('$') || key.contains("::") {
        return Err("Key cannot contain '$' or '::'".to_string());
    }
    if let Some(group) = key_group(key) {
        if !group
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            return Err(
                "Group can only contain letters, numbers, underscores, and hyphens".to_string(),
            );
        }
        let rest = &key[group.len() + 1..];
        if rest.starts_with('.') || rest.ends_with('.') || rest.contains("..") {
            return Err("Key cannot contain empty segments".to_string());
        }
    }
    Ok(())
}

/// Locale values are plain strings.
pub fn validate_value(value: &Value) -> Result<&str, String> {
    value
        .as_str()
        .ok_or_else(|| "Value must be a string".to_string())
}

/// Clamp pagination arguments: limit defaults to 20 and is capped at 100.
pub fn page_bounds(limit: Option<u32>, offset: Option<u32>) -> (usize, usize) {
    let limit = limit.map(|v| v as usize).unwrap_or(20).min(100);
    let offset = offset.map(|v| v as usize).unwrap_or(0);
    (limit, offset)
}
