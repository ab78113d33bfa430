use anyhow::Result;

use crate::{CONFIG_EN_RU, CliTest, stdout};

fn project_with_stale_artifact() -> Result<CliTest> {
    let test = CliTest::with_config(CONFIG_EN_RU)?;
    test.run(&["create", "greeting"])?;
    test.write_file("resx/dist/js/en/removed.js", "var Resx = Resx || {};\n")?;
    test.write_file("resx/dist/notes.md", "kept")?;
    Ok(test)
}

#[test]
fn test_clean_dry_run_keeps_files() -> Result<()> {
    let test = project_with_stale_artifact()?;

    let output = test.run(&["clean"])?;
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("removed.js"));
    assert!(!out.contains("notes.md"));
    assert!(out.contains("Would delete 1 stale file."));
    assert!(out.contains("Run with --apply to delete these files."));
    assert!(test.exists("resx/dist/js/en/removed.js"));

    Ok(())
}

#[test]
fn test_clean_apply_removes_stale_files() -> Result<()> {
    let test = project_with_stale_artifact()?;

    let output = test.run(&["clean", "--apply"])?;
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Deleted 1 stale file.\n");
    assert!(!test.exists("resx/dist/js/en/removed.js"));
    assert!(test.exists("resx/dist/js/en/greeting.js"));
    assert!(test.exists("resx/dist/notes.md"));

    Ok(())
}

#[test]
fn test_clean_nothing_to_do() -> Result<()> {
    let test = CliTest::with_config(CONFIG_EN_RU)?;
    test.run(&["create", "greeting"])?;

    let output = test.run(&["clean"])?;
    assert_eq!(stdout(&output), "✓ No stale artifacts\n");

    Ok(())
}
