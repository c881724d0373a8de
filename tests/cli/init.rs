use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in ["langRoot", "primaryLocale", "locale", "indent", "sources"] {
        assert!(
            parsed.get(field).is_some(),
            "Config should have '{}' field",
            field
        );
    }
    assert_eq!(parsed["primaryLocale"], "en");
    assert_eq!(parsed["locale"], "cs");

    let sources = parsed["sources"]
        .as_array()
        .context("'sources' should be an array")?;
    let names: Vec<&str> = sources.iter().filter_map(|s| s["name"].as_str()).collect();
    assert_eq!(names, ["nova", "livewire", "filament", "views", "frontend"]);
    assert_eq!(sources[4]["functions"][0], "$_");

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Created .toolkitrc.json"));
    assert!(test.root().join(".toolkitrc.json").exists());

    let content = test.read_file(".toolkitrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".toolkitrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".toolkitrc.json already exists"));
    assert_eq!(test.read_file(".toolkitrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file(
        "resources/views/welcome.blade.php",
        "<h1>{{ __('welcome.title') }}</h1>",
    )?;

    let output = test.extract_command().output()?;
    assert!(
        output.status.success(),
        "Extract should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert_eq!(
        test.read_file("lang/en.json")?,
        "{\n    \"welcome.title\": \"Title\"\n}\n"
    );

    Ok(())
}
