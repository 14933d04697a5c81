use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::Value;
use tempfile::TempDir;


/// Test fixture for MCP integration tests
///
/// Manages a temporary Laravel-like project with a `lang/` directory.
pub struct McpTestFixture {
    _temp_dir: TempDir,
    project_root: PathBuf,
}

impl McpTestFixture {
    /// Create an empty test project
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_root = temp_dir.path().canonicalize()?;

        fs::create_dir_all(project_root.join(".git"))?;
        fs::create_dir_all(project_root.join("lang"))?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_root,
        })
    }

    /// Write a locale JSON file relative to `lang/`, e.g. `en/messages.json`
    /// or `fr.json`.
    pub fn write_locale_file(&self, file: &str, content: &Value) -> Result<()> {
        let json_str = serde_json::to_string_pretty(content)
            .with_context(|| format!("Failed to serialize JSON for {}", file))?;
        self.write_file(&format!("lang/{}", file), &format!("{}\n", json_str))
    }

    /// Read a locale JSON file relative to `lang/`
    pub fn read_locale_file(&self, file: &str) -> Result<Value> {
        let path = self.project_root.join("lang").join(file);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read locale file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON from: {}", path.display()))
    }

    /// Write a PHP source file
    pub fn write_php_file(&self, relative_path: &str, content: &str) -> Result<()> {
        self.write_file(relative_path, content)
    }

    /// Write a .lemmascan.json config file
    pub fn write_config(&self, content: &Value) -> Result<()> {
        let json_str = serde_json::to_string_pretty(content)?;
        self.write_file(".lemmascan.json", &format!("{}\n", json_str))
    }

    fn write_file(&self, relative_path: &str, content: &str) -> Result<()> {
        let path = self.project_root.join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        Ok(())
    }

    /// Get the project root path as a string (for MCP parameters)
    pub fn root(&self) -> String {
        self.project_root.to_string_lossy().to_string()
    }

    /// Get the project root path as a Path reference
    pub fn root_path(&self) -> &Path {
        &self.project_root
    }
}

// ============================================================================
// Fixture Generators
// ============================================================================

/// Two locales, three used keys, one unused key per locale.
///
/// Used: `messages.welcome`, `messages.title`, `Log in`.
/// `en` lacks `messages.title`; `fr` lacks its whole `messages` group.
pub fn fixture_laravel() -> Result<McpTestFixture> {
    let fixture = McpTestFixture::new()?;
    fixture.write_php_file(
        "app/Http/Controllers/HomeController.php",
        "<?php\nreturn [trans('messages.welcome'), __('Log in')];\n",
    )?;
    fixture.write_php_file(
        "resources/views/home.blade.php",
        "<h1>@lang('messages.title')</h1>\n",
    )?;
    fixture.write_locale_file(
        "en/messages.json",
        &serde_json::json!({"welcome": "Welcome", "old": "Old"}),
    )?;
    fixture.write_locale_file(
        "en.json",
        &serde_json::json!({"Log in": "Log in", "Sign up": "Sign up"}),
    )?;
    fixture.write_locale_file("fr.json", &serde_json::json!({"Log in": "Connexion"}))?;
    Ok(fixture)
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert pagination fields in a scan result
pub fn assert_pagination(
    result: &Value,
    expected_offset: usize,
    expected_limit: usize,
    expected_has_more: bool,
) {
    let pagination = &result["pagination"];
    assert_eq!(
        pagination["offset"].as_u64().unwrap(),
        expected_offset as u64,
        "Pagination offset mismatch"
    );
    assert_eq!(
        pagination["limit"].as_u64().unwrap(),
        expected_limit as u64,
        "Pagination limit mismatch"
    );
    assert_eq!(
        pagination["hasMore"].as_bool().unwrap(),
        expected_has_more,
        "Pagination hasMore mismatch"
    );
}

/// Extract JSON value from a successful CallToolResult
///
/// Panics if the result indicates an error or cannot be parsed
pub fn extract_tool_result_json(result: &rmcp::model::CallToolResult) -> Value {
    if let Some(true) = result.is_error {
        panic!("Tool call returned an error: {:?}", result);
    }

    assert!(
        !result.content.is_empty(),
        "Tool result should have content"
    );

    let text_content = result.content[0]
        .as_text()
        .expect("Tool result content should be text");

    serde_json::from_str(&text_content.text).expect("Tool result should be valid JSON")
}
