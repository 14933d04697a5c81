use std::{
    cmp::Ordering,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use super::{LocaleFile, LocaleSet, reader::flatten_json};

/// Action taken on a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Added,
    Updated,
    /// Left untouched: the key would replace a nested entry, or a nested
    /// entry would replace a string.
    Conflict,
}

impl KeyAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyAction::Added => "added",
            KeyAction::Updated => "updated",
            KeyAction::Conflict => "conflict",
        }
    }
}

/// Editor for a single locale file.
///
/// Changes are applied to the file's existing JSON, so entries the caller
/// does not touch survive unchanged. [`save`](LocaleEditor::save) writes keys
/// sorted alphabetically at every level.
pub struct LocaleEditor {
    file: LocaleFile,
    file_path: PathBuf,
    data: Map<String, Value>,
    /// Keys are written as-is instead of being nested on dots.
    flat: bool,
}

impl LocaleEditor {
    /// Open an existing locale file, or start an empty one.
    ///
    /// Root JSON files are always flat. With `flat`, group files are flattened
    /// on open and written back flat.
    pub fn open(lang_root: &Path, file: &LocaleFile, flat: bool) -> Result<Self> {
        let file_path = file.path(lang_root);
        let flat = flat || file.group.is_none();

        let mut data = if file_path.exists() {
            let content = fs::read_to_string(&file_path)
                .with_context(|| format!("Failed to read file: {}", file_path.display()))?;
            if content.trim().is_empty() {
                Map::new()
            } else {
                let value: Value = serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse JSON: {}", file_path.display()))?;
                match value {
                    Value::Object(map) => map,
                    _ => bail!(
                        "Root of JSON file must be an object: {}",
                        file_path.display()
                    ),
                }
            }
        } else {
            Map::new()
        };

        if flat && file.group.is_some() {
            let mut flattened = LocaleSet::new();
            flatten_json(&Value::Object(data), String::new(), &mut flattened);
            data = flattened
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect();
        }

        Ok(Self {
            file: file.clone(),
            file_path,
            data,
            flat,
        })
    }

    pub fn file(&self) -> &LocaleFile {
        &self.file
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Whether the file has a value for a qualified key.
    pub fn contains(&self, key: &str) -> bool {
        let local = self.file.local_key(key);
        if self.data.get(local).is_some_and(is_leaf) {
            return true;
        }
        let parts: Vec<&str> = local.split('.').collect();
        lookup_nested(&self.data, &parts).is_some_and(is_leaf)
    }

    /// Set a qualified key (`messages.nav.home`) to `value`.
    ///
    /// Never replaces an object or array with a string, nor a string with
    /// an object; such collisions return [`KeyAction::Conflict`].
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> KeyAction {
        let local = self.file.local_key(key);
        let value = Value::String(value.into());
        if self.flat {
            return insert_leaf(&mut self.data, local, value);
        }
        let parts: Vec<&str> = local.split('.').collect();
        insert_nested(&mut self.data, &parts, value)
    }

    /// Remove a qualified key. Returns whether it was removed.
    ///
    /// Parent objects and arrays left empty by the removal are pruned. Only
    /// the last element of an array is removed, so the indices of the
    /// remaining elements never shift.
    pub fn remove(&mut self, key: &str) -> bool {
        let local = self.file.local_key(key);
        if self.data.get(local).is_some_and(is_leaf) {
            self.data.shift_remove(local);
            return true;
        }
        let parts: Vec<&str> = local.split('.').collect();
        let removed = remove_nested(&mut self.data, &parts);
        if removed {
            prune_empty_objects(&mut self.data);
        }
        removed
    }

    /// The file's content as a flat, qualified [`LocaleSet`].
    pub fn entries(&self) -> LocaleSet {
        let mut set = LocaleSet::new();
        for (key, value) in &self.data {
            flatten_json(value, self.file.qualify(key), &mut set);
        }
        set
    }

    /// Render the file as pretty JSON with sorted keys and a trailing newline.
    pub fn render(&self) -> Result<String> {
        let sorted = sort_value(Value::Object(self.data.clone()));
        let content = serde_json::to_string_pretty(&sorted).context("Failed to serialize JSON")?;
        Ok(format!("{}\n", content))
    }

    /// Save the file.
    ///
    /// The content goes to a temporary file next to the target which then
    /// replaces it, so an interrupted write leaves the old file intact.
    pub fn save(&self) -> Result<()> {
        let content = self.render()?;
        let parent = self
            .file_path
            .parent()
            .with_context(|| format!("Invalid locale path: {}", self.file_path.display()))?;
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

        let mut tmp = NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
        keep_permissions(&tmp, &self.file_path)?;
        tmp.write_all(content.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .with_context(|| format!("Failed to write file: {}", self.file_path.display()))?;
        tmp.persist(&self.file_path)
            .with_context(|| format!("Failed to write file: {}", self.file_path.display()))?;

        Ok(())
    }
}

/// Give the temporary file the target's permissions, or the usual
/// `rw-r--r--` for a new file.
fn keep_permissions(tmp: &NamedTempFile, target: &Path) -> Result<()> {
    let permissions = match fs::metadata(target) {
        Ok(meta) => meta.permissions(),
        #[cfg(unix)]
        Err(_) => {
            use std::os::unix::fs::PermissionsExt;
            fs::Permissions::from_mode(0o644)
        }
        #[cfg(not(unix))]
        Err(_) => return Ok(()),
    };
    tmp.as_file()
        .set_permissions(permissions)
        .with_context(|| format!("Failed to set permissions for {}", target.display()))
}

/// Merge `set` into the file on disk and save it.
///
/// Keys already in the file but absent from `set` are kept.
pub fn write_locale_set(
    lang_root: &Path,
    file: &LocaleFile,
    set: &LocaleSet,
    flat: bool,
) -> Result<()> {
    let mut editor = LocaleEditor::open(lang_root, file, flat)?;
    for (key, value) in set {
        if editor.set(key, value.as_str()) == KeyAction::Conflict {
            bail!("Key {} collides with an existing entry in {}", key, file);
        }
    }
    editor.save()
}

fn is_leaf(value: &Value) -> bool {
    !value.is_object() && !value.is_array()
}

/// Insert a leaf value, refusing to overwrite an object or array.
fn insert_leaf(map: &mut Map<String, Value>, key: &str, value: Value) -> KeyAction {
    match map.get(key) {
        Some(existing) if !is_leaf(existing) => KeyAction::Conflict,
        Some(_) => {
            map.insert(key.to_string(), value);
            KeyAction::Updated
        }
        None => {
            map.insert(key.to_string(), value);
            KeyAction::Added
        }
    }
}

/// Insert a value at a nested path, creating intermediate objects as needed.
///
/// Array elements are addressed by index. A string in the way is a conflict.
fn insert_nested(root: &mut Map<String, Value>, path: &[&str], value: Value) -> KeyAction {
    let Some((last, parents)) = path.split_last() else {
        return KeyAction::Conflict;
    };
    if parents.is_empty() {
        return insert_leaf(root, last, value);
    }

    let next_level = root
        .entry(parents[0].to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    insert_into_value(next_level, &path[1..], value)
}

fn insert_into_value(current: &mut Value, path: &[&str], value: Value) -> KeyAction {
    match current {
        Value::Object(map) => insert_nested(map, path, value),
        Value::Array(items) => {
            let Some(index) = path.first().and_then(|p| p.parse::<usize>().ok()) else {
                return KeyAction::Conflict;
            };
            let Some(item) = items.get_mut(index) else {
                return KeyAction::Conflict;
            };
            if path.len() > 1 {
                insert_into_value(item, &path[1..], value)
            } else if is_leaf(item) {
                *item = value;
                KeyAction::Updated
            } else {
                KeyAction::Conflict
            }
        }
        _ => KeyAction::Conflict,
    }
}

fn lookup_nested<'a>(root: &'a Map<String, Value>, path: &[&str]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    rest.iter().try_fold(root.get(*first)?, |current, segment| match current {
        Value::Object(map) => map.get(*segment),
        Value::Array(items) => items.get(segment.parse::<usize>().ok()?),
        _ => None,
    })
}

fn remove_nested(root: &mut Map<String, Value>, path: &[&str]) -> bool {
    match path {
        [] => false,
        [last] => root.get(*last).is_some_and(is_leaf) && root.shift_remove(*last).is_some(),
        [first, rest @ ..] => root
            .get_mut(*first)
            .is_some_and(|child| remove_from_value(child, rest)),
    }
}

fn remove_from_value(current: &mut Value, path: &[&str]) -> bool {
    match current {
        Value::Object(map) => remove_nested(map, path),
        Value::Array(items) => {
            let Some(index) = path.first().and_then(|p| p.parse::<usize>().ok()) else {
                return false;
            };
            if path.len() > 1 {
                return items
                    .get_mut(index)
                    .is_some_and(|item| remove_from_value(item, &path[1..]));
            }
            let is_last = index + 1 == items.len();
            if is_last && items.get(index).is_some_and(is_leaf) {
                items.pop();
                true
            } else {
                false
            }
        }
        _ => false,
    }
}

/// Order key paths segment by segment, numeric segments by value.
///
/// Removing keys in descending order of this ordering removes array
/// elements from the back.
pub(crate) fn compare_key_paths(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let order = match (x.parse::<usize>(), y.parse::<usize>()) {
                    (Ok(x), Ok(y)) => x.cmp(&y),
                    _ => x.cmp(y),
                };
                if order != Ordering::Equal {
                    return order;
                }
            }
        }
    }
}

/// Recursively remove empty objects and arrays.
///
/// Inside arrays only trailing empty elements go.
fn prune_empty_objects(map: &mut Map<String, Value>) {
    for child in map.values_mut() {
        prune_value(child);
    }
    map.retain(|_, v| !is_empty_container(v));
}

fn prune_value(value: &mut Value) {
    match value {
        Value::Object(inner) => prune_empty_objects(inner),
        Value::Array(items) => {
            for item in items.iter_mut() {
                prune_value(item);
            }
            while items.last().is_some_and(is_empty_container) {
                items.pop();
            }
        }
        _ => {}
    }
}

fn is_empty_container(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Rebuild every object with its keys in lexicographic order.
fn sort_value(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_value(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_value).collect()),
        other => other,
    }
}
