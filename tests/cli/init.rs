use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["init"])?;
    assert!(output.status.success());
    assert_eq!(stdout(&output), "✓ Created .resxrc.json\n");

    let content = test.read_file(".resxrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["tabSize"], 4);
    assert_eq!(parsed["srcFolder"], "./resx/src");
    assert_eq!(parsed["distFolder"], "./resx/dist");
    assert_eq!(parsed["defaultLang"], "en");
    assert_eq!(parsed["currentLangNS"], "current");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_config("{}")?;

    let output = test.run(&["init"])?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "✘ .resxrc.json already exists\n");
    assert_eq!(test.read_file(".resxrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.run(&["init"])?;

    let output = test.run(&["create", "greeting"])?;
    assert!(output.status.success());
    assert!(test.exists("resx/src/greeting.json"));
    assert!(test.exists("resx/dist/js/en/greeting.js"));

    Ok(())
}
