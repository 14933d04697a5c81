use anyhow::Result;
use insta::assert_snapshot;
use serde_json::{Value, json};

use crate::{CliTest, run};

const ORIGINAL_MESSAGES: &str = r#"{"welcome": "Welcome", "old": "Old"}"#;

#[test]
fn test_sync_dry_run_leaves_files_untouched() -> Result<()> {
    let test = CliTest::laravel()?;

    let result = run(test.sync_command())?;

    assert_eq!(result.code, Some(0));
    assert!(
        result
            .stdout
            .contains("+ en/messages.json: messages.title = \"TODO: title\"")
    );
    assert!(result.stdout.contains("- en/messages.json: messages.old"));
    assert!(result.stdout.contains("Would update 2 keys in 1 file"));
    assert!(result.stdout.contains("--apply"));
    assert_eq!(test.read_file("lang/en/messages.json")?, ORIGINAL_MESSAGES);

    Ok(())
}

#[test]
fn test_sync_apply() -> Result<()> {
    let test = CliTest::laravel()?;

    let result = run({
        let mut cmd = test.sync_command();
        cmd.arg("--apply");
        cmd
    })?;

    assert_eq!(result.code, Some(0));
    assert!(result.stdout.contains("Updated 2 keys in 1 file"));
    assert!(result.stdout.contains("en/messages.json: 1 added, 1 removed"));
    assert_snapshot!(test.read_file("lang/en/messages.json")?, @r#"
    {
      "title": "TODO: title",
      "welcome": "Welcome"
    }
    "#);

    let recheck = run(test.check_command())?;
    assert_eq!(recheck.code, Some(0), "stdout: {}", recheck.stdout);

    Ok(())
}

#[test]
fn test_sync_apply_is_idempotent() -> Result<()> {
    let test = CliTest::laravel()?;

    for _ in 0..2 {
        let mut cmd = test.sync_command();
        cmd.arg("--apply");
        assert_eq!(run(cmd)?.code, Some(0));
    }

    let result = run(test.sync_command())?;
    assert!(result.stdout.contains("Locale files are in sync"));

    Ok(())
}

#[test]
fn test_sync_keep_obsolete() -> Result<()> {
    let test = CliTest::laravel()?;

    let result = run({
        let mut cmd = test.sync_command();
        cmd.args(["--apply", "--keep-obsolete"]);
        cmd
    })?;

    assert_eq!(result.code, Some(0));
    let messages: Value = serde_json::from_str(&test.read_file("lang/en/messages.json")?)?;
    assert_eq!(
        messages,
        json!({"old": "Old", "title": "TODO: title", "welcome": "Welcome"})
    );

    Ok(())
}

#[test]
fn test_sync_creates_group_files_for_every_locale() -> Result<()> {
    let test = CliTest::laravel()?;
    test.write_file("lang/fr.json", r#"{"Log in": "Connexion"}"#)?;

    let result = run({
        let mut cmd = test.sync_command();
        cmd.arg("--apply");
        cmd
    })?;

    assert_eq!(result.code, Some(0));
    let fr: Value = serde_json::from_str(&test.read_file("lang/fr/messages.json")?)?;
    assert_eq!(
        fr,
        json!({"title": "TODO: title", "welcome": "TODO: welcome"})
    );
    assert_eq!(test.read_file("lang/fr.json")?, r#"{"Log in": "Connexion"}"#);

    Ok(())
}

#[test]
fn test_sync_output_flat() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "app/Nav.php",
        "<?php echo trans('menu.nav.home'); echo trans('menu.nav.about');",
    )?;
    test.write_file("lang/en/menu.json", r#"{"nav": {"home": "Home"}}"#)?;

    let result = run({
        let mut cmd = test.sync_command();
        cmd.args(["--apply", "--output-flat"]);
        cmd
    })?;

    assert_eq!(result.code, Some(0));
    let menu: Value = serde_json::from_str(&test.read_file("lang/en/menu.json")?)?;
    assert_eq!(
        menu,
        json!({"nav.about": "TODO: nav.about", "nav.home": "Home"})
    );

    Ok(())
}

#[test]
fn test_sync_custom_prefix() -> Result<()> {
    let test = CliTest::laravel()?;
    test.write_file(".lemmascan.json", r#"{"newValuePrefix": "__"}"#)?;

    let result = run({
        let mut cmd = test.sync_command();
        cmd.arg("--apply");
        cmd
    })?;

    assert_eq!(result.code, Some(0));
    let messages: Value = serde_json::from_str(&test.read_file("lang/en/messages.json")?)?;
    assert_eq!(messages["title"], "__title");

    Ok(())
}

#[test]
fn test_sync_removes_obsolete_array() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("app/Home.php", "<?php echo trans('messages.welcome');")?;
    test.write_file(
        "lang/en/messages.json",
        r#"{"welcome": "Welcome", "steps": ["One", "Two", "Three"]}"#,
    )?;

    let result = run({
        let mut cmd = test.sync_command();
        cmd.arg("--apply");
        cmd
    })?;

    assert_eq!(result.code, Some(0));
    assert!(result.stdout.contains("Updated 3 keys in 1 file"));
    let messages: Value = serde_json::from_str(&test.read_file("lang/en/messages.json")?)?;
    assert_eq!(messages, json!({"welcome": "Welcome"}));

    let recheck = run(test.check_command())?;
    assert_eq!(recheck.code, Some(0), "stdout: {}", recheck.stdout);

    Ok(())
}

#[test]
fn test_sync_never_overwrites_colliding_entries() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "app/Nav.php",
        "<?php echo trans('messages.nav'); echo trans('messages.nav.home');",
    )?;
    let original = r#"{"nav": "Navigation"}"#;
    test.write_file("lang/en/messages.json", original)?;

    for _ in 0..2 {
        let result = run({
            let mut cmd = test.sync_command();
            cmd.arg("--apply");
            cmd
        })?;
        assert_eq!(result.code, Some(0));
        assert!(result.stderr.contains("warning:"), "stderr: {}", result.stderr);
        assert!(result.stderr.contains("messages.nav.home"));
        assert_eq!(test.read_file("lang/en/messages.json")?, original);
    }

    Ok(())
}
