use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CONFIG_EN_RU, CliTest, stderr, stdout};

#[test]
fn test_create_writes_empty_chunk_and_artifacts() -> Result<()> {
    let test = CliTest::with_config(CONFIG_EN_RU)?;

    let output = test.run(&["create", "greeting"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "✓ Created resource 'greeting'\n");

    assert_eq!(test.read_file("resx/src/greeting.json")?, "{}\n");
    assert_eq!(
        test.read_file("resx/dist/js/en/greeting.js")?,
        "var Resx = Resx || {};\nResx.current = Resx.current || {};\nResx.current.greeting = {};\n"
    );
    assert_eq!(test.read_file("resx/dist/resx/greeting.ru.txt")?, "");

    Ok(())
}

#[test]
fn test_create_existing_chunk_fails() -> Result<()> {
    let test = CliTest::with_config(CONFIG_EN_RU)?;
    test.run(&["create", "greeting"])?;
    test.run(&["add", "greeting", "hello", "-l", "en=Hello"])?;
    let before = test.read_file("resx/src/greeting.json")?;

    let output = test.run(&["create", "greeting"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Resource 'greeting' already exists"));
    assert_eq!(test.read_file("resx/src/greeting.json")?, before);

    Ok(())
}

#[test]
fn test_add_key_and_recompile() -> Result<()> {
    let test = CliTest::with_config(CONFIG_EN_RU)?;
    test.run(&["create", "greeting"])?;

    let output = test.run(&["add", "greeting", "hello", "-l", "en=Hello", "-l", "ru=Привет"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "✓ Added 'hello' to 'greeting' (en, ru)\n");

    let output = test.run(&["add", "greeting", "hello2", "--value", "en=Bye"])?;
    assert!(output.status.success());

    assert_eq!(
        test.read_file("resx/dist/resx/greeting.ru.txt")?,
        "prefix.greeting.hello=Привет\nprefix.greeting.hello2=Bye\n"
    );

    Ok(())
}

#[test]
fn test_add_duplicate_key_fails() -> Result<()> {
    let test = CliTest::with_config(CONFIG_EN_RU)?;
    test.run(&["create", "greeting"])?;
    test.run(&["add", "greeting", "hello", "-l", "en=Hello"])?;

    let output = test.run(&["add", "greeting", "hello", "-l", "en=Hi"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("hello"));
    assert_eq!(
        test.read_file("resx/dist/resx/greeting.en.txt")?,
        "prefix.greeting.hello=Hello\n"
    );

    Ok(())
}

#[test]
fn test_add_without_default_language_fails() -> Result<()> {
    let test = CliTest::with_config(CONFIG_EN_RU)?;
    test.run(&["create", "greeting"])?;

    let output = test.run(&["add", "greeting", "hello", "-l", "ru=Привет"])?;
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(test.read_file("resx/src/greeting.json")?, "{}\n");

    Ok(())
}

#[test]
fn test_add_to_missing_chunk_fails() -> Result<()> {
    let test = CliTest::with_config(CONFIG_EN_RU)?;

    let output = test.run(&["add", "nope", "hello", "-l", "en=Hello"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Resource 'nope' not found"));

    Ok(())
}

#[test]
fn test_add_leaves_other_chunks_untouched() -> Result<()> {
    let test = CliTest::with_config(CONFIG_EN_RU)?;
    test.run(&["create", "greeting"])?;
    test.run(&["create", "menu"])?;
    test.write_file("resx/dist/js/en/menu.js", "hand edited")?;

    test.run(&["add", "greeting", "hello", "-l", "en=Hello"])?;

    assert_eq!(test.read_file("resx/dist/js/en/menu.js")?, "hand edited");

    Ok(())
}
