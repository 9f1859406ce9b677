use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success());
    assert_eq!(stdout(&output), "\u{2713} Created .pagemacrorc.json\n");

    assert!(test.root().join(".pagemacrorc.json").exists());
    let content = test.read_file(".pagemacrorc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["macroName"], "definePage");
    assert_eq!(parsed["routesFolder"], "src/pages");
    assert!(parsed["extensions"].is_array());

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".pagemacrorc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stderr(&output), "Error: .pagemacrorc.json already exists\n");
    assert_eq!(test.read_file(".pagemacrorc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file(
        "src/pages/index.vue",
        "<script setup>\ndefinePage({ name: 'home' })\n</script>\n",
    )?;

    let output = test.scan_command().output()?;
    assert!(
        output.status.success(),
        "scan should work with initialized config. stderr: {}",
        stderr(&output)
    );

    Ok(())
}
