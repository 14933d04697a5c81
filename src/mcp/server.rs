use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;

use crate::{
    cli::args::CommonArgs,
    config::load_config,
    core::{
        LocaleFile, ScanContext, TransPatterns,
        locale::reader::load_locale_store,
        resolve_lang_root,
    },
    rules::{missing::check_missing_keys_issues, obsolete::check_obsolete_keys_issues},
};

use super::helpers::{page_bounds, process_locale_translation};
use super::types::{
    AddTranslationsParams, AddTranslationsResult, AddTranslationsSummary, ConfigDto, ConfigValues,
    GetConfigParams, GetLocalesParams, KeyStats, LocaleFileInfo, LocaleInfo, LocalesResult,
    MissingItem, MissingScanResult, ObsoleteItem, ObsoleteScanResult, Pagination,
    ScanMissingParams, ScanObsoleteParams, ScanOverviewParams, ScanOverviewResult,
};

#[derive(Clone)]
pub struct LemmascanMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for LemmascanMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl LemmascanMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Get overview statistics of missing and obsolete keys
    #[tool(
        description = "Get statistics of missing and obsolete translation keys without detailed items. Use this first to understand the overall state."
    )]
    pub async fn scan_overview(
        &self,
        params: Parameters<ScanOverviewParams>,
    ) -> Result<CallToolResult, McpError> {
        let ctx = scan_context(&params.0.project_root_path)?;

        let missing = check_missing_keys_issues(&ctx);
        let obsolete = check_obsolete_keys_issues(&ctx);

        let result = ScanOverviewResult {
            source_file_count: ctx.scan().files_scanned,
            locale_file_count: ctx.store().file_count(),
            key_count: ctx.scan().len(),
            missing: key_stats(missing.iter().map(|i| &i.file)),
            obsolete: key_stats(obsolete.iter().map(|i| &i.file)),
            parse_error_count: ctx.parse_errors().len(),
        };

        json_result(&result)
    }

    /// Keys used in code but absent from locale files
    #[tool(
        description = "Get translation keys used in PHP sources but missing from locale files (paginated). Each item names the locale file the key belongs in."
    )]
    pub async fn scan_missing(
        &self,
        params: Parameters<ScanMissingParams>,
    ) -> Result<CallToolResult, McpError> {
        let (limit, offset) = page_bounds(params.0.limit, params.0.offset);
        let ctx = scan_context(&params.0.project_root_path)?;

        let all_items: Vec<MissingItem> = check_missing_keys_issues(&ctx)
            .into_iter()
            .map(|issue| MissingItem {
                locale: issue.file.locale.clone(),
                file: issue.file.to_string(),
                file_path: issue.file_path,
                key: issue.key,
                usages: issue.usages,
            })
            .collect();

        let total_count = all_items.len();
        let items: Vec<MissingItem> = all_items.into_iter().skip(offset).take(limit).collect();
        let has_more = offset + items.len() < total_count;

        json_result(&MissingScanResult {
            total_count,
            items,
            pagination: Pagination {
                offset,
                limit,
                has_more,
            },
        })
    }

    /// Keys defined in locale files but never used
    #[tool(
        description = "Get translation keys defined in locale files but not referenced by any PHP source (paginated). Keys listed in neverObsoleteKeys are excluded."
    )]
    pub async fn scan_obsolete(
        &self,
        params: Parameters<ScanObsoleteParams>,
    ) -> Result<CallToolResult, McpError> {
        let (limit, offset) = page_bounds(params.0.limit, params.0.offset);
        let ctx = scan_context(&params.0.project_root_path)?;

        let all_items: Vec<ObsoleteItem> = check_obsolete_keys_issues(&ctx)
            .into_iter()
            .map(|issue| ObsoleteItem {
                locale: issue.file.locale.clone(),
                file: issue.file.to_string(),
                file_path: issue.file_path,
                key: issue.key,
                value: issue.value,
            })
            .collect();

        let total_count = all_items.len();
        let items: Vec<ObsoleteItem> = all_items.into_iter().skip(offset).take(limit).collect();
        let has_more = offset + items.len() < total_count;

        json_result(&ObsoleteScanResult {
            total_count,
            items,
            pagination: Pagination {
                offset,
                limit,
                has_more,
            },
        })
    }

    /// Add translation keys to multiple locale files
    #[tool(
        description = "Add or update translation keys for one or more locales. Dotted keys such as 'messages.welcome' go to <locale>/messages.json, sentence keys go to <locale>.json. Values must be strings."
    )]
    pub async fn add_translations(
        &self,
        params: Parameters<AddTranslationsParams>,
    ) -> Result<CallToolResult, McpError> {
        let translations = &params.0.translations;
        if translations.is_empty() {
            return Err(McpError::invalid_params(
                "translations array cannot be empty",
                None,
            ));
        }

        let project_root = PathBuf::from(&params.0.project_root_path);
        let config = load_config(&project_root)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?
            .config;
        let lang_root = resolve_lang_root(&config.lang_root_candidates(&project_root))
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        let mut results = Vec::new();
        let mut total_keys_added = 0;
        let mut total_keys_updated = 0;
        let mut successful_locales = 0;
        let mut failed_locales = 0;

        for entry in translations {
            match process_locale_translation(entry, &lang_root, config.output_flat) {
                Ok(result) => {
                    total_keys_added += result.added_count.unwrap_or(0);
                    total_keys_updated += result.updated_count.unwrap_or(0);
                    successful_locales += 1;
                    results.push(result);
                }
                Err(e) => {
                    failed_locales += 1;
                    results.push(e.into_result());
                }
            }
        }

        json_result(&AddTranslationsResult {
            success: failed_locales == 0,
            results,
            summary: AddTranslationsSummary {
                total_locales: translations.len(),
                successful_locales,
                failed_locales,
                total_keys_added,
                total_keys_updated,
            },
        })
    }

    /// Get available locales and their files
    #[tool(description = "Get available locales, their locale files and key counts.")]
    pub async fn get_locales(
        &self,
        params: Parameters<GetLocalesParams>,
    ) -> Result<CallToolResult, McpError> {
        let project_root = Path::new(&params.0.project_root_path);
        let config = load_config(project_root)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?
            .config;
        let lang_root = resolve_lang_root(&config.lang_root_candidates(project_root))
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        let (store, _) = load_locale_store(&lang_root, &config.locales, &config.ignore_lang_files);

        let locales = store
            .locales
            .iter()
            .map(|locale| LocaleInfo {
                locale: locale.clone(),
                key_count: store.key_count(locale),
                files: store
                    .files_of(locale)
                    .map(|file| LocaleFileInfo {
                        file: file.to_string(),
                        file_path: file.path(&lang_root).to_string_lossy().to_string(),
                        key_count: store.get(file).map(|set| set.len()).unwrap_or(0),
                    })
                    .collect(),
            })
            .collect();

        json_result(&LocalesResult {
            lang_root: lang_root.to_string_lossy().to_string(),
            locales,
        })
    }

    /// Get the current lemmascan configuration
    #[tool(description = "Get the current lemmascan configuration.")]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = Path::new(&params.0.project_root_path);

        let result = load_config(path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?;
        let patterns = TransPatterns::from_config(&result.config.trans_methods)
            .map_err(|e| McpError::internal_error(format!("Invalid transMethods: {}", e), None))?
            .iter()
            .map(|re| re.as_str().to_string())
            .collect();

        json_result(&ConfigDto {
            from_file: result.from_file,
            config: ConfigValues::new(result.config, patterns),
        })
    }
}

#[tool_handler]
impl ServerHandler for LemmascanMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Lemmascan MCP helps AI agents keep Laravel locale files in sync with the translation keys used in PHP code.\n\n\
                 Available tools:\n\
                 1. get_config - Get project configuration\n\
                 2. get_locales - Get locales, their files and key counts\n\
                 3. scan_overview - Get statistics of missing and obsolete keys\n\
                 4. scan_missing - Get keys used in code but absent from locale files (paginated)\n\
                 5. scan_obsolete - Get keys defined in locale files but never used (paginated)\n\
                 6. add_translations - Add or update keys in locale files\n\n\
                 Recommended Workflow:\n\
                 1. Use scan_overview to understand the overall state\n\
                 2. Page through scan_missing and translate each key for its locale\n\
                 3. Write the translations with add_translations\n\
                 4. Review scan_obsolete before deleting anything; keys built at runtime are not detected"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

fn scan_context(project_root_path: &str) -> Result<ScanContext, McpError> {
    let common = CommonArgs {
        project_root: Some(PathBuf::from(project_root_path)),
        lang_path: None,
        verbose: false,
    };
    ScanContext::new(&common)
        .map_err(|e| McpError::internal_error(format!("Failed to initialize: {:#}", e), None))
}

fn key_stats<'a>(files: impl Iterator<Item = &'a LocaleFile>) -> KeyStats {
    let mut total_count = 0;
    let mut distinct_files = BTreeSet::new();
    let mut locales = BTreeSet::new();
    for file in files {
        total_count += 1;
        locales.insert(file.locale.clone());
        distinct_files.insert(file);
    }
    KeyStats {
        total_count,
        file_count: distinct_files.len(),
        affected_locales: locales.into_iter().collect(),
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("JSON serialization failed: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = LemmascanMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
