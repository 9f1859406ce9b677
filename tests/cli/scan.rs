use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

fn project() -> Result<CliTest> {
    let test = CliTest::with_file(
        "src/pages/index.vue",
        "<script setup>\ndefinePage({ name: 'home', path: '/' })\n</script>\n",
    )?;
    test.write_file(
        "src/pages/users/[id].tsx",
        "definePage({ path: '/u/:id' })\nexport default () => <div />\n",
    )?;
    test.write_file("src/pages/about.vue", "<template>about</template>\n")?;
    test.write_file("src/pages/styles.css", "body {}\n")?;
    Ok(test)
}

#[test]
fn test_scan_table() -> Result<()> {
    let test = project()?;

    let output = test.scan_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "index.vue       home  /\nusers/[id].tsx  -     /u/:id\n\u{2713} Scanned 3 files, 2 with route configuration\n"
    );

    Ok(())
}

#[test]
fn test_scan_json() -> Result<()> {
    let test = project()?;

    let output = test.scan_command().arg("--json").output()?;

    assert!(output.status.success());
    let pages: serde_json::Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(
        pages,
        serde_json::json!([
            { "file": "index.vue", "name": "home", "path": "/" },
            { "file": "users/[id].tsx", "path": "/u/:id" }
        ])
    );

    Ok(())
}

#[test]
fn test_scan_reports_broken_pages() -> Result<()> {
    let test = project()?;
    test.write_file(
        "src/pages/broken.vue",
        "<script setup>\nconst a = 1\ndefinePage({ name: a })\n</script>\n",
    )?;

    let output = test.scan_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output)
            .contains("warning: Failed to extract definePage info: `definePage()` in <script setup> cannot reference locally declared variables")
    );

    Ok(())
}

#[test]
fn test_scan_respects_ignores() -> Result<()> {
    let test = project()?;
    test.write_file(".pagemacrorc.json", r#"{ "ignores": ["users/**"] }"#)?;

    let output = test.scan_command().arg("--json").output()?;

    let pages: serde_json::Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(
        pages,
        serde_json::json!([{ "file": "index.vue", "name": "home", "path": "/" }])
    );

    Ok(())
}

#[test]
fn test_scan_missing_routes_folder() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .scan_command()
        .args(["--routes-folder", "app/pages"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: Routes folder does not exist:"));

    Ok(())
}
