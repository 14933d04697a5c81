use anyhow::Result;

use crate::{CliTest, run};

#[test]
fn test_check_reports_missing_and_obsolete() -> Result<()> {
    let test = CliTest::laravel()?;

    let result = run(test.check_command())?;

    assert_eq!(result.code, Some(1));
    assert!(
        result
            .stdout
            .contains("error: \"messages.title\"  missing-key")
    );
    assert!(
        result
            .stdout
            .contains("--> lang/en/messages.json (messages.title)")
    );
    assert!(
        result
            .stdout
            .contains("= used: resources/views/home.blade.php")
    );
    assert!(
        result
            .stdout
            .contains("warning: \"messages.old\"  obsolete-key")
    );
    assert!(result.stdout.contains("2 problems (1 error, 1 warning)"));

    // Dynamic and namespaced keys are never reported.
    assert!(!result.stdout.contains("courier"));
    assert!(!result.stdout.contains("\"messages.\""));

    Ok(())
}

#[test]
fn test_check_clean_project() -> Result<()> {
    let test = CliTest::laravel()?;
    test.write_file(
        "lang/en/messages.json",
        r#"{"welcome": "Welcome", "title": "Home"}"#,
    )?;

    let result = run(test.check_command())?;

    assert_eq!(result.code, Some(0));
    assert!(
        result
            .stdout
            .contains("Checked 2 source files, 2 locale files - no issues found")
    );

    Ok(())
}

#[test]
fn test_check_no_obsolete() -> Result<()> {
    let test = CliTest::laravel()?;
    test.write_file(
        "lang/en/messages.json",
        r#"{"welcome": "Welcome", "title": "Home", "old": "Old"}"#,
    )?;

    let result = run({
        let mut cmd = test.check_command();
        cmd.arg("--no-obsolete");
        cmd
    })?;

    assert_eq!(result.code, Some(0));
    assert!(!result.stdout.contains("obsolete-key"));

    Ok(())
}

#[test]
fn test_check_never_obsolete_and_ignored_files() -> Result<()> {
    let test = CliTest::laravel()?;
    test.write_file(
        ".lemmascan.json",
        r#"{
  "neverObsoleteKeys": ["messages.old"],
  "ignoreLangFiles": ["validation", "auth"]
}"#,
    )?;
    test.write_file(
        "lang/en/messages.json",
        r#"{"welcome": "Welcome", "title": "Home", "old": {"nested": "Kept"}}"#,
    )?;
    test.write_file("lang/en/auth.json", r#"{"failed": "Nope"}"#)?;
    test.write_file("lang/en/validation.json", r#"{"required": "Required"}"#)?;

    let result = run(test.check_command())?;

    assert_eq!(result.code, Some(0), "stdout: {}", result.stdout);
    assert!(!result.stdout.contains("auth.failed"));
    assert!(!result.stdout.contains("validation.required"));

    Ok(())
}

#[test]
fn test_check_without_lang_folder() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("app/Home.php", "<?php echo trans('messages.welcome');")?;

    let result = run(test.check_command())?;

    assert_eq!(result.code, Some(2));
    assert!(result.stderr.contains("no lang folder found"));
    assert!(result.stderr.contains("resources/lang"));

    Ok(())
}

#[test]
fn test_check_lang_path_override() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("app/Home.php", "<?php echo trans('site.name');")?;
    test.write_file("translations/en/site.json", r#"{"name": "Site"}"#)?;

    let result = run({
        let mut cmd = test.check_command();
        cmd.args(["--lang-path", "translations"]);
        cmd
    })?;

    assert_eq!(result.code, Some(0), "stdout: {}", result.stdout);

    Ok(())
}

#[test]
fn test_check_project_root_flag() -> Result<()> {
    let test = CliTest::laravel()?;
    let elsewhere = CliTest::new()?;

    let result = run({
        let mut cmd = elsewhere.check_command();
        cmd.arg("--project-root").arg(test.root());
        cmd
    })?;

    assert_eq!(result.code, Some(1));
    assert!(result.stdout.contains("messages.title"));

    Ok(())
}

#[test]
fn test_check_malformed_locale_file() -> Result<()> {
    let test = CliTest::laravel()?;
    test.write_file("lang/en/broken.json", "{ not json")?;

    let result = run(test.check_command())?;

    assert_eq!(result.code, Some(1));
    assert!(result.stdout.contains("parse-error"));
    assert!(result.stdout.contains("lang/en/broken.json"));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let result = run({
        let mut cmd = test.command();
        cmd.arg("--help");
        cmd
    })?;

    assert_eq!(result.code, Some(0));
    for command in ["check", "sync", "find", "init", "serve"] {
        assert!(result.stdout.contains(command), "missing {}", command);
    }

    Ok(())
}
