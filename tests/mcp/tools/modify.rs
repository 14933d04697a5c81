use lemmascan::mcp::{
    LemmascanMcpServer,
    types::{AddTranslationsParams, ScanMissingParams, TranslationEntry},
};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::{Map, Value, json};

use crate::{McpTestFixture, extract_tool_result_json, fixture_laravel};

fn keys(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("keys must be an object"),
    }
}

fn add_params(root: String, translations: Vec<(&str, Value)>) -> Parameters<AddTranslationsParams> {
    Parameters(AddTranslationsParams {
        project_root_path: root,
        translations: translations
            .into_iter()
            .map(|(locale, value)| TranslationEntry {
                locale: locale.to_string(),
                keys: keys(value),
            })
            .collect(),
    })
}

#[tokio::test]
async fn test_add_translations_group_and_root_keys() {
    let fixture = McpTestFixture::new().unwrap();
    let server = LemmascanMcpServer::new();

    let params = add_params(
        fixture.root(),
        vec![(
            "en",
            json!({"messages.welcome": "Welcome", "messages.nav.home": "Home", "Log in": "Log in"}),
        )],
    );

    let result = server.add_translations(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["success"], true);
    assert_eq!(json_result["summary"]["totalLocales"], 1);
    assert_eq!(json_result["summary"]["successfulLocales"], 1);
    assert_eq!(json_result["summary"]["totalKeysAdded"], 3);
    assert_eq!(json_result["summary"]["totalKeysUpdated"], 0);
    assert_eq!(
        json_result["results"][0]["filePaths"].as_array().unwrap().len(),
        2
    );

    assert_eq!(
        fixture.read_locale_file("en/messages.json").unwrap(),
        json!({"nav": {"home": "Home"}, "welcome": "Welcome"})
    );
    assert_eq!(
        fixture.read_locale_file("en.json").unwrap(),
        json!({"Log in": "Log in"})
    );
}

#[tokio::test]
async fn test_add_translations_updates_existing() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_locale_file("fr/messages.json", &json!({"welcome": "Salut", "bye": "Au revoir"}))
        .unwrap();
    let server = LemmascanMcpServer::new();

    let params = add_params(fixture.root(), vec![("fr", json!({"messages.welcome": "Bienvenue"}))]);

    let result = server.add_translations(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["summary"]["totalKeysAdded"], 0);
    assert_eq!(json_result["summary"]["totalKeysUpdated"], 1);
    assert_eq!(json_result["results"][0]["details"][0]["action"], "updated");
    assert_eq!(
        fixture.read_locale_file("fr/messages.json").unwrap(),
        json!({"bye": "Au revoir", "welcome": "Bienvenue"})
    );
}

#[tokio::test]
async fn test_add_translations_partial_failure() {
    let fixture = McpTestFixture::new().unwrap();
    let server = LemmascanMcpServer::new();

    let params = add_params(
        fixture.root(),
        vec![
            ("en", json!({"messages.ok": "Ok"})),
            ("../etc", json!({"messages.ok": "Ok"})),
            ("de", json!({"messages.count": 3})),
        ],
    );

    let result = server.add_translations(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["success"], false);
    assert_eq!(json_result["summary"]["successfulLocales"], 1);
    assert_eq!(json_result["summary"]["failedLocales"], 2);
    assert!(
        json_result["results"][1]["error"]
            .as_str()
            .unwrap()
            .contains("Locale name")
    );
    assert!(
        json_result["results"][2]["error"]
            .as_str()
            .unwrap()
            .contains("must be a string")
    );
    assert!(!fixture.root_path().join("lang/de").exists());
}

#[tokio::test]
async fn test_add_translations_empty_request() {
    let fixture = McpTestFixture::new().unwrap();
    let server = LemmascanMcpServer::new();

    let params = add_params(fixture.root(), vec![]);
    assert!(server.add_translations(params).await.is_err());
}

#[tokio::test]
async fn test_add_translations_resolves_missing_keys() {
    let fixture = fixture_laravel().unwrap();
    let server = LemmascanMcpServer::new();

    let params = add_params(
        fixture.root(),
        vec![
            ("en", json!({"messages.title": "Home"})),
            (
                "fr",
                json!({"messages.title": "Accueil", "messages.welcome": "Bienvenue"}),
            ),
        ],
    );
    let result = server.add_translations(params).await.unwrap();
    assert_eq!(extract_tool_result_json(&result)["success"], true);

    let missing = server
        .scan_missing(Parameters(ScanMissingParams {
            project_root_path: fixture.root(),
            limit: None,
            offset: None,
        }))
        .await
        .unwrap();
    assert_eq!(extract_tool_result_json(&missing)["totalCount"], 0);
}
