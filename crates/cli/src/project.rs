use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

/// Directories never worth descending into when collecting sources
const IGNORED_DIRS: &[&str] = &["build", "target", "out", "run", "node_modules"];

fn is_ignored(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    entry.file_type().is_dir() && (name.starts_with('.') || IGNORED_DIRS.contains(&name.as_ref()))
}

/// Collect the Java sources under a module root, in stable order
pub fn collect_java_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        // Never filter the root itself, whatever it is named
        .filter_entry(|e| e.depth() == 0 || !is_ignored(e))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("java"))
        .collect();
    files.sort();
    tracing::debug!("Collected {} Java files under {:?}", files.len(), root);
    files
}
