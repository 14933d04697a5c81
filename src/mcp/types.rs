use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================
// Tool Parameters
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetConfigParams {
    /// Absolute path to the Laravel project root
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetLocalesParams {
    /// Absolute path to the Laravel project root
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ScanOverviewParams {
    /// Absolute path to the Laravel project root
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ScanMissingParams {
    /// Absolute path to the Laravel project root
    pub project_root_path: String,
    /// Maximum number of items to return (default 20, max 100)
    pub limit: Option<u32>,
    /// Number of items to skip
    pub offset: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ScanObsoleteParams {
    /// Absolute path to the Laravel project root
    pub project_root_path: String,
    /// Maximum number of items to return (default 20, max 100)
    pub limit: Option<u32>,
    /// Number of items to skip
    pub offset: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddTranslationsParams {
    /// Absolute path to the Laravel project root
    pub project_root_path: String,
    /// Keys to write, grouped by locale
    pub translations: Vec<TranslationEntry>,
}

/// Keys for one locale. `messages.welcome` lands in `<locale>/messages.json`,
/// sentence keys such as `Log in` in `<locale>.json`.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TranslationEntry {
    pub locale: String,
    pub keys: Map<String, Value>,
}

// ============================================================
// Config Types (get_config)
// ============================================================

/// Configuration DTO for MCP
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    pub config: ConfigValues,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    pub trans_methods: Vec<String>,
    pub folders: Vec<String>,
    pub file_pattern: String,
    pub ignore_lang_files: Vec<String>,
    pub never_obsolete_keys: Vec<String>,
    pub lang_folder_path: Option<String>,
    pub locales: Vec<String>,
    pub new_value_prefix: String,
    pub output_flat: bool,
}

impl ConfigValues {
    /// `patterns` is the flattened `transMethods` list.
    pub fn new(c: crate::config::Config, patterns: Vec<String>) -> Self {
        Self {
            trans_methods: patterns,
            folders: c.folders,
            file_pattern: c.file_pattern,
            ignore_lang_files: c.ignore_lang_files,
            never_obsolete_keys: c.never_obsolete_keys,
            lang_folder_path: c.lang_folder_path,
            locales: c.locales,
            new_value_prefix: c.new_value_prefix,
            output_flat: c.output_flat,
        }
    }
}

// ============================================================
// Locales Types (get_locales)
// ============================================================

/// Result of get_locales operation
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocalesResult {
    pub lang_root: String,
    pub locales: Vec<LocaleInfo>,
}

/// Information about a single locale
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocaleInfo {
    pub locale: String,
    pub key_count: usize,
    pub files: Vec<LocaleFileInfo>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocaleFileInfo {
    /// Display name such as `en/messages.json`
    pub file: String,
    pub file_path: String,
    pub key_count: usize,
}

// ============================================================
// AddTranslations Types (add_translations)
// ============================================================

/// Result of add_translations operation (batch)
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddTranslationsResult {
    /// True if all locales were processed successfully
    pub success: bool,
    pub results: Vec<LocaleResult>,
    pub summary: AddTranslationsSummary,
}

/// Result for a single locale
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocaleResult {
    pub locale: String,
    pub success: bool,
    /// Files written (only on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_paths: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<KeyActionDetail>>,
    /// Error message (only on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddTranslationsSummary {
    pub total_locales: usize,
    pub successful_locales: usize,
    pub failed_locales: usize,
    pub total_keys_added: usize,
    pub total_keys_updated: usize,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeyActionDetail {
    pub key: String,
    pub file: String,
    pub action: String, // "added", "updated", "conflict"
}

/// Failure while writing one locale's keys.
#[derive(Debug)]
pub struct LocaleError {
    pub locale: String,
    pub message: String,
}

impl LocaleError {
    pub fn new(locale: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            message: message.into(),
        }
    }

    /// Convert this error into a LocaleResult for serialization
    pub fn into_result(self) -> LocaleResult {
        LocaleResult {
            locale: self.locale,
            success: false,
            file_paths: None,
            added_count: None,
            updated_count: None,
            details: None,
            error: Some(self.message),
        }
    }
}

// ============================================================
// Scan Overview Types (scan_overview)
// ============================================================

/// Result of scan_overview operation - statistics only
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanOverviewResult {
    pub source_file_count: usize,
    pub locale_file_count: usize,
    /// Distinct keys referenced in source files
    pub key_count: usize,
    pub missing: KeyStats,
    pub obsolete: KeyStats,
    pub parse_error_count: usize,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeyStats {
    pub total_count: usize,
    pub file_count: usize,
    pub affected_locales: Vec<String>,
}

// ============================================================
// Key Scan Types (scan_missing, scan_obsolete)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MissingScanResult {
    pub total_count: usize,
    pub items: Vec<MissingItem>,
    pub pagination: Pagination,
}

/// A key used in code but absent from a locale file
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MissingItem {
    pub key: String,
    pub locale: String,
    pub file: String,
    pub file_path: String,
    /// Source files referencing the key
    pub usages: Vec<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObsoleteScanResult {
    pub total_count: usize,
    pub items: Vec<ObsoleteItem>,
    pub pagination: Pagination,
}

/// A key defined in a locale file but never used
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObsoleteItem {
    pub key: String,
    pub locale: String,
    pub file: String,
    pub file_path: String,
    pub value: String,
}

// ============================================================
// Common Types
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}
