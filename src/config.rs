use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::core::patterns::{TransPatterns, is_glob_pattern};

pub const CONFIG_FILE_NAME: &str = ".lemmascan.json";

/// Path placeholders substituted in `folders` and `langFolderPath`.
///
/// Each token maps to a directory relative to the project root.
pub const PATH_PLACEHOLDERS: &[(&str, &str)] = &[
    ("%APP", "app"),
    ("%BASE", ""),
    ("%PUBLIC", "public"),
    ("%STORAGE", "storage"),
];

/// Conventional locale roots probed when `langFolderPath` is not set.
pub const LANG_ROOT_CANDIDATES: &[&str] = &["app/lang", "resources/lang", "lang"];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Regex patterns capturing translation keys. Strings, arrays and objects
    /// may be nested freely; they are flattened in document order.
    #[serde(default = "default_trans_methods")]
    pub trans_methods: Value,
    #[serde(default = "default_folders")]
    pub folders: Vec<String>,
    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,
    #[serde(default = "default_ignore_lang_files")]
    pub ignore_lang_files: Vec<String>,
    #[serde(default = "default_never_obsolete_keys")]
    pub never_obsolete_keys: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang_folder_path: Option<String>,
    /// Locales to manage. Empty means every locale found under the lang root.
    #[serde(default)]
    pub locales: Vec<String>,
    #[serde(default = "default_new_value_prefix")]
    pub new_value_prefix: String,
    #[serde(default)]
    pub output_flat: bool,
}

fn default_trans_methods() -> Value {
    const LITERAL: &str = r#"('.*?'|".*?")"#;
    // Further arguments may span lines.
    let optional_args = |name: &str| format!(r"{}\(\s*{}(?s:\s*,.*?)?\s*\)", name, LITERAL);
    let required_args = |name: &str| format!(r"{}\(\s*{}(?s:\s*,.*?)\)", name, LITERAL);

    json!({
        "trans": [optional_args("trans")],
        "trans_choice": [required_args("trans_choice")],
        "Lang::get": [optional_args("Lang::get")],
        "Lang::choice": [required_args("Lang::choice")],
        "@lang": [optional_args("@lang")],
        "@choice": [required_args("@choice")],
        "__": [optional_args("__")],
    })
}

fn default_folders() -> Vec<String> {
    ["%APP", "%BASE/resources/views"].map(String::from).to_vec()
}

fn default_file_pattern() -> String {
    r"(?i)^.+\.php$".to_string()
}

fn default_ignore_lang_files() -> Vec<String> {
    vec!["validation".to_string()]
}

fn default_never_obsolete_keys() -> Vec<String> {
    ["dynamic", "fields"].map(String::from).to_vec()
}

fn default_new_value_prefix() -> String {
    "TODO: ".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trans_methods: default_trans_methods(),
            folders: default_folders(),
            file_pattern: default_file_pattern(),
            ignore_lang_files: default_ignore_lang_files(),
            never_obsolete_keys: default_never_obsolete_keys(),
            lang_folder_path: None,
            locales: Vec::new(),
            new_value_prefix: default_new_value_prefix(),
            output_flat: false,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if `transMethods` cannot be flattened into valid patterns,
    /// if `filePattern` is not a valid regex, or if a wildcard entry in `folders`
    /// is not a valid glob.
    pub fn validate(&self) -> Result<()> {
        TransPatterns::from_config(&self.trans_methods)
            .context("Invalid 'transMethods' configuration")?;

        self.file_regex()?;

        for folder in &self.folders {
            if is_glob_pattern(folder) {
                Pattern::new(folder)
                    .with_context(|| format!("Invalid glob pattern in 'folders': \"{}\"", folder))?;
            }
        }

        Ok(())
    }

    /// Compile `filePattern`.
    pub fn file_regex(&self) -> Result<Regex> {
        Regex::new(&self.file_pattern)
            .with_context(|| format!("Invalid regex in 'filePattern': \"{}\"", self.file_pattern))
    }

    /// Source folders with placeholders substituted, relative to `project_root`.
    pub fn source_folders(&self, project_root: &Path) -> Vec<PathBuf> {
        self.folders
            .iter()
            .map(|folder| resolve_path(project_root, folder))
            .collect()
    }

    /// Candidate locale roots, in probing order.
    pub fn lang_root_candidates(&self, project_root: &Path) -> Vec<PathBuf> {
        match &self.lang_folder_path {
            Some(path) => vec![resolve_path(project_root, path)],
            None => LANG_ROOT_CANDIDATES
                .iter()
                .map(|candidate| project_root.join(candidate))
                .collect(),
        }
    }
}

/// Substitute path placeholders and anchor relative paths at `project_root`.
///
/// `%BASE/resources/views` becomes `<root>/resources/views`; a plain
/// relative path such as `app/Http` is joined to the root as well.
pub fn resolve_path(project_root: &Path, raw: &str) -> PathBuf {
    let mut resolved = raw.to_string();
    for (token, dir) in PATH_PLACEHOLDERS {
        if resolved.contains(token) {
            let replacement = if dir.is_empty() {
                project_root.to_path_buf()
            } else {
                project_root.join(dir)
            };
            resolved = resolved.replace(token, &replacement.to_string_lossy());
        }
    }

    let path = PathBuf::from(resolved);
    if path.is_absolute() {
        path
    } else {
        let rel = path.strip_prefix(".").unwrap_or(&path);
        project_root.join(rel)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
