use lemmascan::mcp::{
    LemmascanMcpServer,
    types::{ScanMissingParams, ScanObsoleteParams, ScanOverviewParams},
};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, assert_pagination, extract_tool_result_json, fixture_laravel};

fn missing_params(root: String, limit: Option<u32>, offset: Option<u32>) -> Parameters<ScanMissingParams> {
    Parameters(ScanMissingParams {
        project_root_path: root,
        limit,
        offset,
    })
}

// ============================================================================
// scan_overview tests
// ============================================================================

#[tokio::test]
async fn test_scan_overview() {
    let fixture = fixture_laravel().unwrap();
    let server = LemmascanMcpServer::new();

    let params = Parameters(ScanOverviewParams {
        project_root_path: fixture.root(),
    });

    let result = server.scan_overview(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["sourceFileCount"], 2);
    assert_eq!(json_result["localeFileCount"], 3);
    assert_eq!(json_result["keyCount"], 3);
    assert_eq!(json_result["parseErrorCount"], 0);

    assert_eq!(json_result["missing"]["totalCount"], 3);
    assert_eq!(json_result["missing"]["fileCount"], 2);
    assert_eq!(json_result["missing"]["affectedLocales"], json!(["en", "fr"]));

    assert_eq!(json_result["obsolete"]["totalCount"], 2);
    assert_eq!(json_result["obsolete"]["fileCount"], 2);
    assert_eq!(json_result["obsolete"]["affectedLocales"], json!(["en"]));
}

#[tokio::test]
async fn test_scan_overview_without_lang_folder() {
    let fixture = McpTestFixture::new().unwrap();
    std::fs::remove_dir(fixture.root_path().join("lang")).unwrap();

    let server = LemmascanMcpServer::new();
    let params = Parameters(ScanOverviewParams {
        project_root_path: fixture.root(),
    });

    let err = server.scan_overview(params).await.unwrap_err();
    assert!(err.message.contains("no lang folder found"));
}

// ============================================================================
// scan_missing tests
// ============================================================================

#[tokio::test]
async fn test_scan_missing_items() {
    let fixture = fixture_laravel().unwrap();
    let server = LemmascanMcpServer::new();

    let result = server
        .scan_missing(missing_params(fixture.root(), None, None))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 3);
    assert_pagination(&json_result, 0, 20, false);

    let items = json_result["items"].as_array().unwrap();
    let pairs: Vec<(&str, &str)> = items
        .iter()
        .map(|i| (i["locale"].as_str().unwrap(), i["key"].as_str().unwrap()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("en", "messages.title"),
            ("fr", "messages.title"),
            ("fr", "messages.welcome"),
        ]
    );

    assert_eq!(items[0]["file"], "en/messages.json");
    assert_eq!(items[0]["filePath"], "lang/en/messages.json");
    assert_eq!(items[0]["usages"], json!(["resources/views/home.blade.php"]));
}

#[tokio::test]
async fn test_scan_missing_pagination() {
    let fixture = fixture_laravel().unwrap();
    let server = LemmascanMcpServer::new();

    let first = extract_tool_result_json(
        &server
            .scan_missing(missing_params(fixture.root(), Some(2), None))
            .await
            .unwrap(),
    );
    assert_eq!(first["items"].as_array().unwrap().len(), 2);
    assert_pagination(&first, 0, 2, true);

    let second = extract_tool_result_json(
        &server
            .scan_missing(missing_params(fixture.root(), Some(2), Some(2)))
            .await
            .unwrap(),
    );
    assert_eq!(second["items"].as_array().unwrap().len(), 1);
    assert_eq!(second["items"][0]["key"], "messages.welcome");
    assert_pagination(&second, 2, 2, false);
}

#[tokio::test]
async fn test_scan_missing_limit_is_capped() {
    let fixture = fixture_laravel().unwrap();
    let server = LemmascanMcpServer::new();

    let result = extract_tool_result_json(
        &server
            .scan_missing(missing_params(fixture.root(), Some(1000), None))
            .await
            .unwrap(),
    );
    assert_pagination(&result, 0, 100, false);
}

// ============================================================================
// scan_obsolete tests
// ============================================================================

#[tokio::test]
async fn test_scan_obsolete_items() {
    let fixture = fixture_laravel().unwrap();
    let server = LemmascanMcpServer::new();

    let params = Parameters(ScanObsoleteParams {
        project_root_path: fixture.root(),
        limit: None,
        offset: None,
    });

    let result = server.scan_obsolete(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 2);
    let items = json_result["items"].as_array().unwrap();
    assert_eq!(items[0]["key"], "Sign up");
    assert_eq!(items[0]["file"], "en.json");
    assert_eq!(items[0]["value"], "Sign up");
    assert_eq!(items[1]["key"], "messages.old");
    assert_eq!(items[1]["value"], "Old");
}

#[tokio::test]
async fn test_scan_obsolete_respects_never_obsolete() {
    let fixture = fixture_laravel().unwrap();
    fixture
        .write_config(&json!({"neverObsoleteKeys": ["messages", "Sign up"]}))
        .unwrap();
    let server = LemmascanMcpServer::new();

    let params = Parameters(ScanObsoleteParams {
        project_root_path: fixture.root(),
        limit: None,
        offset: None,
    });

    let result = server.scan_obsolete(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 0);
    assert_pagination(&json_result, 0, 20, false);
}
