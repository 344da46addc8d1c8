//! Shared fixtures for unit tests

use std::path::PathBuf;
use tempfile::TempDir;

pub fn create_test_documents_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Write `content` to `relative_path` under `dir`, creating parent folders
pub fn create_test_file(dir: &TempDir, relative_path: &str, content: &str) -> PathBuf {
    let path = dir.path().join(relative_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}
