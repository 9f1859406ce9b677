use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::core::warnings::WarningSink;

/// Result of scanning the routes folder.
pub struct ScanResult {
    /// Page files, sorted.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Collect every file under `root` whose extension is in `extensions`.
///
/// `ignores` are glob patterns matched against the path relative to `root`.
/// Invalid patterns and unreadable entries are reported to `sink`.
pub fn scan_pages(
    root: &Path,
    extensions: &[String],
    ignores: &[String],
    sink: &dyn WarningSink,
) -> ScanResult {
    let mut files = Vec::new();
    let mut skipped_count = 0;

    let ignore_patterns: Vec<Pattern> = ignores
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                sink.report(&format!("Invalid ignore pattern '{}': {}", p, e));
                None
            }
        })
        .collect();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                sink.report(&format!("Cannot access path: {}", e));
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() || !has_page_extension(path, extensions) {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if ignore_patterns.iter().any(|p| p.matches_path(relative)) {
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    ScanResult {
        files,
        skipped_count,
    }
}

fn has_page_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    extensions.iter().any(|ext| name.ends_with(ext.as_str()))
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;
    use crate::core::warnings::MemorySink;

    fn extensions() -> Vec<String> {
        vec![".vue".to_string(), ".tsx".to_string()]
    }

    fn names(result: &ScanResult, root: &Path) -> Vec<String> {
        result
            .files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_scan_by_extension() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("users")).unwrap();
        File::create(root.join("index.vue")).unwrap();
        File::create(root.join("users/[id].tsx")).unwrap();
        File::create(root.join("style.css")).unwrap();

        let sink = MemorySink::new();
        let result = scan_pages(root, &extensions(), &[], &sink);

        assert_eq!(names(&result, root), vec!["index.vue", "users/[id].tsx"]);
        assert_eq!(result.skipped_count, 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_scan_ignores() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("components")).unwrap();
        File::create(root.join("index.vue")).unwrap();
        File::create(root.join("components/Card.vue")).unwrap();

        let sink = MemorySink::new();
        let ignores = ["components/**".to_string(), "[".to_string()];
        let result = scan_pages(root, &extensions(), &ignores, &sink);

        assert_eq!(names(&result, root), vec!["index.vue"]);
        assert_eq!(sink.len(), 1);
        assert!(sink.has_warned("Invalid ignore pattern '['"));
    }

    #[test]
    fn test_scan_missing_root() {
        let dir = tempdir().unwrap();
        let sink = MemorySink::new();
        let result = scan_pages(&dir.path().join("missing"), &extensions(), &[], &sink);
        assert!(result.files.is_empty());
        assert_eq!(result.skipped_count, 1);
        assert!(sink.has_warned("Cannot access path"));
    }
}
