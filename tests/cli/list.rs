use anyhow::Result;

use crate::{CONFIG_EN_RU, CliTest, stdout};

#[test]
fn test_list_resources() -> Result<()> {
    let test = CliTest::with_config(CONFIG_EN_RU)?;
    test.write_file(
        "resx/src/greeting.json",
        r#"{"hello":{"en":"Hello"},"bye":{"en":"Bye"}}"#,
    )?;
    test.write_file("resx/src/menu.json", r#"{"open":{"en":"Open"}}"#)?;

    let output = test.run(&["list"])?;
    assert!(output.status.success());
    assert_eq!(stdout(&output), "  greeting  2 keys\n  menu      1 key\n");

    Ok(())
}

#[test]
fn test_list_without_resources() -> Result<()> {
    let test = CliTest::with_config(CONFIG_EN_RU)?;

    let output = test.run(&["list"])?;
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("No resources found in"));
    assert!(out.contains("resx/src"));

    Ok(())
}
