use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const PAGE: &str = r#"<script setup>
import { title } from './meta'
import { unused } from './other'
definePage({
  name: 'home',
  meta: { title },
})
const count = 1
</script>

<template>
  <div>{{ count }}</div>
</template>
"#;

#[test]
fn test_transform_removes_call() -> Result<()> {
    let test = CliTest::with_file("src/pages/index.vue", PAGE)?;

    let output = test.transform_command("src/pages/index.vue").output()?;

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "<script setup>\nimport { title } from './meta'\nimport { unused } from './other'\n\nconst count = 1\n</script>\n\n<template>\n  <div>{{ count }}</div>\n</template>\n\n"
    );

    Ok(())
}

#[test]
fn test_transform_extract() -> Result<()> {
    let test = CliTest::with_file("src/pages/index.vue", PAGE)?;

    let output = test
        .transform_command("src/pages/index.vue")
        .arg("--extract")
        .output()?;

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "import { title } from './meta'\nexport default {\n  name: 'home',\n  meta: { title },\n}\n"
    );

    Ok(())
}

#[test]
fn test_transform_with_explicit_id() -> Result<()> {
    let test = CliTest::with_file("page.jsx", "definePage({ path: '/x' })\n")?;

    let output = test
        .transform_command("page.jsx")
        .args(["--id", "src/pages/x.jsx?definePage&lang.jsx"])
        .output()?;

    assert_eq!(stdout(&output), "export default { path: '/x' }\n");

    Ok(())
}

#[test]
fn test_transform_nothing_to_do() -> Result<()> {
    let test = CliTest::with_file(
        "src/pages/about.vue",
        "<script setup>\n// definePage\n</script>\n",
    )?;

    let output = test.transform_command("src/pages/about.vue").output()?;
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");

    let output = test
        .transform_command("src/pages/about.vue")
        .arg("--extract")
        .output()?;
    assert_eq!(stdout(&output), "export default {}\n");

    Ok(())
}

#[test]
fn test_transform_syntax_error_warns() -> Result<()> {
    let test = CliTest::with_file(
        "src/pages/broken.vue",
        "<script setup>\ndefinePage({\n  name: 'test',,\n})\n</script>\n",
    )?;

    let output = test.transform_command("src/pages/broken.vue").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    assert!(stderr(&output).starts_with("warning: Failed to process definePage:"));
    assert_eq!(stderr(&output).matches("warning:").count(), 1);

    Ok(())
}

#[test]
fn test_transform_custom_macro_name() -> Result<()> {
    let test = CliTest::with_file("page.ts", "defineRoute({ name: 'r' })\n")?;
    test.write_file(".pagemacrorc.json", r#"{ "macroName": "defineRoute" }"#)?;

    let output = test.transform_command("page.ts").arg("--extract").output()?;
    assert_eq!(stdout(&output), "export default { name: 'r' }\n");

    let output = test
        .transform_command("page.ts")
        .args(["--extract", "--macro-name", "definePage"])
        .output()?;
    assert_eq!(stdout(&output), "export default {}\n");

    Ok(())
}

#[test]
fn test_transform_missing_file() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.transform_command("missing.vue").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: Failed to read file: missing.vue"));

    Ok(())
}
