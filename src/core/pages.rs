//! Project-wide view: the route configuration of every page file.

use std::fs;
use std::path::Path;

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::core::file_scanner::scan_pages;
use crate::core::transform::{PageConfig, extract_config};
use crate::core::warnings::WarningSink;

/// A page file declaring a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageEntry {
    /// Path relative to the routes folder, `/`-separated.
    pub file: String,
    #[serde(flatten)]
    pub config: PageConfig,
}

/// Summary of a routes folder scan.
#[derive(Debug, Default)]
pub struct PageIndex {
    /// Pages with a configuration call, sorted by `file`.
    pub pages: Vec<PageEntry>,
    pub scanned_files: usize,
    /// Files that could not be walked or read.
    pub skipped_files: usize,
}

/// Run `extract_config` over every page under `root`, in parallel.
///
/// Extensions, ignores and the macro name come from `config`. The result
/// does not depend on scheduling: entries are sorted by path.
pub fn collect_page_configs(root: &Path, config: &Config, sink: &dyn WarningSink) -> PageIndex {
    let options = config.macro_options();
    let scan = scan_pages(root, &config.extensions, &config.ignores, sink);
    debug!(root = %root.display(), files = scan.files.len(), "scanned routes folder");

    let results: Vec<Option<Option<PageEntry>>> = scan
        .files
        .par_iter()
        .map(|path| {
            let code = fs::read_to_string(path).ok()?;
            let file = path
                .strip_prefix(root)
                .unwrap_or(path)
                .to_string_lossy()
                .replace('\\', "/");
            let page = extract_config(&code, &path.to_string_lossy(), &options, sink);
            Some(page.map(|config| PageEntry { file, config }))
        })
        .collect();

    let unreadable = results.iter().filter(|r| r.is_none()).count();
    let mut pages: Vec<PageEntry> = results.into_iter().flatten().flatten().collect();
    pages.sort_by(|a, b| a.file.cmp(&b.file));

    PageIndex {
        pages,
        scanned_files: scan.files.len(),
        skipped_files: scan.skipped_count + unreadable,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;
    use crate::core::warnings::MemorySink;

    #[test]
    fn test_collect_page_configs() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("users")).unwrap();
        fs::write(
            root.join("index.vue"),
            "<script setup>\ndefinePage({ name: 'home', path: '/' })\n</script>",
        )
        .unwrap();
        fs::write(
            root.join("users/profile.tsx"),
            "definePage({ name: 'profile' })\nexport default () => <div />\n",
        )
        .unwrap();
        fs::write(root.join("about.vue"), "<template>about</template>").unwrap();
        fs::write(
            root.join("broken.vue"),
            "<script setup>\ndefinePage({ name: 'x',, })\n</script>",
        )
        .unwrap();

        let sink = MemorySink::new();
        let config = Config {
            extensions: vec![".vue".to_string(), ".tsx".to_string()],
            ..Config::default()
        };
        let index = collect_page_configs(root, &config, &sink);

        assert_eq!(
            index.pages,
            vec![
                PageEntry {
                    file: "index.vue".to_string(),
                    config: PageConfig {
                        name: Some("home".to_string()),
                        path: Some("/".to_string()),
                    },
                },
                PageEntry {
                    file: "users/profile.tsx".to_string(),
                    config: PageConfig {
                        name: Some("profile".to_string()),
                        path: None,
                    },
                },
            ]
        );
        assert_eq!(index.scanned_files, 4);
        assert_eq!(index.skipped_files, 0);
        assert_eq!(sink.len(), 1);
        assert!(sink.has_warned("Failed to extract definePage info:"));
    }
}
