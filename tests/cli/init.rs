use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let result = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    assert_eq!(result.code, Some(0));
    assert!(result.stdout.contains("Created .lemmascan.json"));

    let content = test.read_file(".lemmascan.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    for field in [
        "transMethods",
        "folders",
        "filePattern",
        "ignoreLangFiles",
        "neverObsoleteKeys",
        "newValuePrefix",
    ] {
        assert!(parsed.get(field).is_some(), "Config should have '{}'", field);
    }
    assert!(content.contains("\n  \""), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".lemmascan.json", "{}")?;

    let result = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    assert_eq!(result.code, Some(2));
    assert!(result.stderr.contains(".lemmascan.json already exists"));
    assert_eq!(test.read_file(".lemmascan.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_used_by_check() -> Result<()> {
    let test = CliTest::laravel()?;

    let mut init = test.command();
    init.arg("init");
    assert_eq!(run(init)?.code, Some(0));

    let result = run(test.check_command())?;
    assert_eq!(result.code, Some(1));
    assert!(result.stdout.contains("messages.title"));

    Ok(())
}
