use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use crate::{CONFIG_EN_RU, CliTest, stderr, stdout};

fn greeting_project() -> Result<CliTest> {
    let test = CliTest::with_config(CONFIG_EN_RU)?;
    test.write_file(
        "resx/src/greeting.json",
        r#"{"hello":{"ru":"Привет","en":"Hello"},"hello2":{"en":"Bye"}}"#,
    )?;
    Ok(test)
}

#[test]
fn test_build_generates_every_artifact() -> Result<()> {
    let test = greeting_project()?;

    let output = test.run(&["build"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "✓ Compiled 1 resource, wrote 5 files\n");

    assert_snapshot!(test.read_file("resx/dist/js/ru/greeting.js")?, @r#"
    var Resx = Resx || {};
    Resx.current = Resx.current || {};
    Resx.current.greeting = {
        hello: "Привет",
        hello2: "Bye"
    };
    "#);
    assert_snapshot!(test.read_file("resx/dist/types/greeting.d.ts")?, @r"
    interface IResx {
        greeting: {
            hello: string;
            hello2: string;
        };
    }
    ");
    assert_eq!(
        test.read_file("resx/dist/resx/greeting.ru.txt")?,
        "prefix.greeting.hello=Привет\nprefix.greeting.hello2=Bye\n"
    );
    assert_eq!(
        test.read_file("resx/dist/resx/greeting.en.txt")?,
        "prefix.greeting.hello=Hello\nprefix.greeting.hello2=Bye\n"
    );

    Ok(())
}

#[test]
fn test_dogood_normalizes_sources() -> Result<()> {
    let test = greeting_project()?;

    let output = test.run(&["--dogood"])?;
    assert!(output.status.success());

    assert_eq!(
        test.read_file("resx/src/greeting.json")?,
        r#"{
    "hello": {
        "en": "Hello",
        "ru": "Привет"
    },
    "hello2": {
        "en": "Bye"
    }
}
"#
    );

    Ok(())
}

#[test]
fn test_build_is_idempotent() -> Result<()> {
    let test = greeting_project()?;

    test.run(&["build"])?;
    let first = test.read_file("resx/dist/js/en/greeting.js")?;
    test.run(&["-d"])?;
    assert_eq!(test.read_file("resx/dist/js/en/greeting.js")?, first);

    Ok(())
}

#[test]
fn test_build_verbose_lists_written_files() -> Result<()> {
    let test = greeting_project()?;

    let output = test.run(&["build", "-v"])?;
    let out = stdout(&output);
    assert!(out.contains("normalized greeting"));
    assert!(out.contains("greeting.d.ts"));

    Ok(())
}

#[test]
fn test_build_invalid_source_fails() -> Result<()> {
    let test = CliTest::with_config(CONFIG_EN_RU)?;
    test.write_file("resx/src/broken.json", r#"{"hello":{"ru":"Привет"}}"#)?;

    let output = test.run(&["build"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error: Invalid source data in 'broken'"));
    assert!(!test.exists("resx/dist"));

    Ok(())
}

#[test]
fn test_build_rejects_invalid_config() -> Result<()> {
    let test = CliTest::with_config(r#"{ "languages": ["en"], "defaultLang": "ru" }"#)?;

    let output = test.run(&["build"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error:"));

    Ok(())
}
