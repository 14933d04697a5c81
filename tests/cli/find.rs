use anyhow::Result;

use crate::{CliTest, run};

#[test]
fn test_find_lists_referencing_files() -> Result<()> {
    let test = CliTest::laravel()?;

    let result = run({
        let mut cmd = test.find_command();
        cmd.args(["welcome", "--short"]);
        cmd
    })?;

    assert_eq!(result.code, Some(0));
    assert!(
        result
            .stdout
            .contains("app/Http/Controllers/HomeController.php  messages.welcome")
    );
    assert!(
        result
            .stdout
            .contains("resources/views/home.blade.php           messages.welcome")
    );
    assert!(result.stdout.contains("2 files referencing \"welcome\""));

    Ok(())
}

#[test]
fn test_find_regex() -> Result<()> {
    let test = CliTest::laravel()?;

    let result = run({
        let mut cmd = test.find_command();
        cmd.args(["^messages\\.t", "--regex", "--short"]);
        cmd
    })?;

    assert_eq!(result.code, Some(0));
    assert!(result.stdout.contains("resources/views/home.blade.php"));
    assert!(result.stdout.contains("messages.title"));
    assert!(!result.stdout.contains("HomeController.php"));

    Ok(())
}

#[test]
fn test_find_does_not_need_lang_folder() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("app/Home.php", "<?php echo __('Sign up');")?;

    let result = run({
        let mut cmd = test.find_command();
        cmd.arg("Sign");
        cmd
    })?;

    assert_eq!(result.code, Some(0));
    assert!(result.stdout.contains("Home.php"));
    assert!(result.stdout.contains("Sign up"));

    Ok(())
}

#[test]
fn test_find_no_match() -> Result<()> {
    let test = CliTest::laravel()?;

    let result = run({
        let mut cmd = test.find_command();
        cmd.arg("nonexistent");
        cmd
    })?;

    assert_eq!(result.code, Some(0));
    assert!(
        result
            .stdout
            .contains("No translation key matching \"nonexistent\"")
    );

    Ok(())
}

#[test]
fn test_find_invalid_regex() -> Result<()> {
    let test = CliTest::laravel()?;

    let result = run({
        let mut cmd = test.find_command();
        cmd.args(["(", "--regex"]);
        cmd
    })?;

    assert_eq!(result.code, Some(2));
    assert!(result.stderr.contains("Invalid regex"));

    Ok(())
}
