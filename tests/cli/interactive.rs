use anyhow::Result;

use crate::{CONFIG_EN_RU, CliTest, stdout};

#[test]
fn test_wizard_creates_resource_with_key() -> Result<()> {
    let test = CliTest::with_config(CONFIG_EN_RU)?;

    let input = "2\ngreeting\ny\nhello\n\nHello\nПривет\nn\nn\n";
    let output = test.run_interactive(input)?;
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("Created resource 'greeting'"));
    assert!(out.contains("Added 'hello' to 'greeting'"));
    assert!(out.contains("Created 1 resource, added 1 key"));
    assert_eq!(
        test.read_file("resx/dist/resx/greeting.ru.txt")?,
        "prefix.greeting.hello=Привет\n"
    );

    Ok(())
}

#[test]
fn test_wizard_without_resources() -> Result<()> {
    let test = CliTest::with_config(CONFIG_EN_RU)?;

    let output = test.run_interactive("3\nn\n")?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("NO RESOURCES FOUND IN"));

    Ok(())
}

#[test]
fn test_wizard_regenerate_all() -> Result<()> {
    let test = CliTest::with_config(CONFIG_EN_RU)?;
    test.write_file("resx/src/greeting.json", r#"{"hello":{"en":"Hello"}}"#)?;

    let output = test.run_interactive("1\n")?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Compiled 1 resource, wrote 5 files"));
    assert!(test.exists("resx/dist/types/greeting.d.ts"));

    Ok(())
}
