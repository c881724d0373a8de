use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_extract_backend_and_frontend() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            "app/Nova/User.php",
            r#"<?php
  class User extends Resource
  {
      public static function label()
      {
          return __('user.resetPassword');
      }
  }
  "#,
        ),
        (
            "resources/views/profile.blade.php",
            r#"<h1>{{ __("profile.title") }}</h1>"#,
        ),
        (
            "resources/nuxt/admin/pages/index.vue",
            r#"<template>
    <button>{{ $_('menu.save', 'Save changes') }}</button>
  </template>"#,
        ),
        (
            "resources/nuxt/admin/node_modules/lib/index.js",
            "$_('vendor.key', 'Vendor')",
        ),
    ])?;

    let output = test.extract_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("lang/en.json")?,
        r#"{
    "user.resetPassword": "Reset password",
    "profile.title": "Title",
    "menu.save": "Save changes"
}
"#
    );
    assert_eq!(
        test.read_file("lang/cs.json")?,
        r#"{
    "user.resetPassword": "resetPassword",
    "profile.title": "title",
    "menu.save": "Save changes"
}
"#
    );

    let stdout = stdout(&output);
    assert!(stdout.contains("en: 3 new translations added"));
    assert!(stdout.contains("Scanned 3 source files, found 3 translation keys"));

    Ok(())
}

#[test]
fn test_extract_appends_to_existing_locale() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            "resources/views/nav.blade.php",
            "{{ __('nav.home') }} {{ __('nav.logout') }}",
        ),
        (
            "lang/cs.json",
            "{\n    \"zeta\": \"Poslední\",\n    \"nav.home\": \"Domů\"\n}\n",
        ),
    ])?;

    let output = test.extract_command().args(["-L", "cs"]).output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("lang/cs.json")?,
        "{\n    \"zeta\": \"Poslední\",\n    \"nav.home\": \"Domů\",\n    \"nav.logout\": \"logout\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_conflict_aborts_without_writing() -> Result<()> {
    let test = CliTest::with_files(&[
        ("resources/nuxt/admin/a.vue", "$_('a.b', 'Hello')"),
        ("resources/nuxt/admin/b.vue", "\n  $_('a.b', 'Goodbye')"),
        ("lang/en.json", "{}"),
    ])?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    let stdout = stdout(&output);
    assert!(stdout.contains("error: duplicate translation key \"a.b\" with different values"));
    assert!(stdout.contains("--> resources/nuxt/admin/b.vue:2:3"));
    assert!(stdout.contains("\"Goodbye\" here, \"Hello\" at resources/nuxt/admin/a.vue:1:1"));
    assert_eq!(test.read_file("lang/en.json")?, "{}");
    assert!(!test.root().join("lang/cs.json").exists());

    Ok(())
}

#[test]
fn test_unparsable_call_aborts() -> Result<()> {
    let test = CliTest::with_files(&[(
        "resources/views/form.blade.php",
        "<label>{{ __('form.name', $label) }}</label>",
    )])?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    let stdout = stdout(&output);
    assert!(stdout.contains("error: cannot parse translation call"));
    assert!(stdout.contains("--> resources/views/form.blade.php:1:11"));
    assert!(!test.root().join("lang").exists());

    Ok(())
}

#[test]
fn test_failure_report_keeps_earlier_warnings() -> Result<()> {
    let test = CliTest::with_files(&[
        ("resources/nuxt/admin/a.vue", "$_(label)\n$_('a.b', 'Hello')"),
        ("resources/nuxt/admin/b.vue", "$_('a.b', 'Goodbye')"),
    ])?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    let stdout = stdout(&output);
    assert!(stdout.contains("dynamic-key"));
    assert!(stdout.contains("--> resources/nuxt/admin/a.vue:1:1"));
    assert!(stdout.contains("error: duplicate translation key \"a.b\""));

    Ok(())
}

#[test]
fn test_translation_calls_in_comments_and_strings() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            "app/Nova/User.php",
            "<?php\n// TODO: wrap with __() later\nreturn __('user.name');",
        ),
        (
            "resources/nuxt/admin/help.vue",
            "$_('docs.hint', 'Wrap every label in $_() before shipping')",
        ),
    ])?;

    let output = test.extract_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("commented-call"));
    assert!(stdout.contains("--> app/Nova/User.php:2:20"));
    assert_eq!(
        test.read_file("lang/en.json")?,
        "{\n    \"user.name\": \"Name\",\n    \"docs.hint\": \"Wrap every label in $_() before shipping\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_invalid_locale_file_is_internal_error() -> Result<()> {
    let test = CliTest::with_files(&[
        ("resources/views/home.blade.php", "{{ __('home.title') }}"),
        ("lang/cs.json", "[\"not\", \"an\", \"object\"]"),
    ])?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error:"));
    assert!(!test.root().join("lang/en.json").exists());

    Ok(())
}

#[test]
fn test_dry_run_writes_nothing() -> Result<()> {
    let test = CliTest::with_files(&[(
        "resources/views/home.blade.php",
        "{{ __('home.title') }}",
    )])?;

    let output = test.extract_command().arg("--dry-run").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("1 new translation would be added"));
    assert!(stdout.contains("+ home.title"));
    assert!(!test.root().join("lang").exists());

    Ok(())
}

#[test]
fn test_dynamic_and_interpolated_keys_are_warnings() -> Result<()> {
    let test = CliTest::with_files(&[(
        "resources/views/status.blade.php",
        "{{ __($status->label) }}\n{{ __(\"status.$code\") }}\n{{ __('status.ok') }}",
    )])?;

    let output = test.extract_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("dynamic-key"));
    assert!(stdout.contains("--> resources/views/status.blade.php:2:4"));
    assert!(stdout.contains("interpolated-key"));
    assert_eq!(
        test.read_file("lang/en.json")?,
        "{\n    \"status.ok\": \"Ok\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_second_run_leaves_files_untouched() -> Result<()> {
    let test = CliTest::with_files(&[(
        "resources/views/home.blade.php",
        "{{ __('home.title') }}",
    )])?;

    test.extract_command().output()?;
    test.write_file("lang/en.json", "{\"home.title\":\"Welcome\"}")?;

    let output = test.extract_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("en: no new translations"));
    assert_eq!(test.read_file("lang/en.json")?, "{\"home.title\":\"Welcome\"}");

    Ok(())
}

#[test]
fn test_custom_config() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            ".toolkitrc.json",
            r#"{
    "langRoot": "locales",
    "locale": "de",
    "indent": "  ",
    "sources": [
        { "name": "web", "root": "src", "functions": ["t"], "extensions": ["ts"] }
    ]
}"#,
        ),
        ("src/app.ts", "const title = t('app.pageTitle');"),
        ("src/app.vue", "t('ignored.key')"),
    ])?;

    let output = test.extract_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("locales/en.json")?,
        "{\n  \"app.pageTitle\": \"Page title\"\n}\n"
    );
    assert_eq!(
        test.read_file("locales/de.json")?,
        "{\n  \"app.pageTitle\": \"pageTitle\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_mode_override() -> Result<()> {
    let test = CliTest::with_files(&[(
        "resources/views/home.blade.php",
        "{{ __('home.mainTitle') }}",
    )])?;

    let output = test
        .extract_command()
        .args(["--mode", "humanize", "--lang", "fr"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("lang/fr.json")?,
        "{\n    \"home.mainTitle\": \"Main title\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_help_without_command() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("extract"));

    Ok(())
}
