use super::{DocumentId, DocumentStore, StoreError};
use glob::{MatchOptions, Pattern};
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

/// Include globs used when none are configured
pub const DEFAULT_INCLUDE: [&str; 4] = ["**/*.html", "**/*.htm", "**/*.md", "**/*.txt"];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Documents stored as text files under a root directory.
///
/// Hidden files and directories are never listed, and symlinks are never
/// followed.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
    include: Vec<Pattern>,
}

impl FsDocumentStore {
    /// Open a store rooted at `root`, using [`DEFAULT_INCLUDE`]
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        validate_documents_dir(&root)?;
        Self {
            root,
            include: Vec::new(),
        }
        .with_include(DEFAULT_INCLUDE)
    }

    /// Replace the include globs, matched against `/`-separated relative paths
    pub fn with_include<I, S>(mut self, patterns: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.include = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Pattern::new(pattern).map_err(|source| StoreError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_included(&self, relative_path: &RelativePath) -> bool {
        self.include
            .iter()
            .any(|pattern| pattern.matches_with(relative_path.as_str(), MATCH_OPTIONS))
    }

    fn path_for(&self, id: &DocumentId) -> PathBuf {
        RelativePath::new(id.as_str()).to_path(&self.root)
    }

    fn scan_directory_recursive(
        &self,
        dir: &Path,
        ids: &mut Vec<DocumentId>,
    ) -> Result<(), StoreError> {
        let entries = fs::read_dir(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();

            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }

            // Does not follow links, unlike Path::is_dir
            let file_type = entry.file_type().map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;

            if file_type.is_symlink() {
                log::debug!("Skipping symlink {}", path.display());
                continue;
            }

            if file_type.is_dir() {
                self.scan_directory_recursive(&path, ids)?;
                continue;
            }

            let Some(relative_path) = path
                .strip_prefix(&self.root)
                .ok()
                .and_then(|relative| RelativePathBuf::from_path(relative).ok())
            else {
                log::warn!("Skipping unrepresentable path {}", path.display());
                continue;
            };

            if self.is_included(&relative_path) {
                ids.push(DocumentId::new(relative_path.as_str()));
            }
        }

        Ok(())
    }
}

impl DocumentStore for FsDocumentStore {
    fn list_document_ids(&self) -> Result<Vec<DocumentId>, StoreError> {
        validate_documents_dir(&self.root)?;

        let mut ids = Vec::new();
        self.scan_directory_recursive(&self.root, &mut ids)?;
        ids.sort();
        Ok(ids)
    }

    fn get_body(&self, id: &DocumentId) -> Result<String, StoreError> {
        let path = self.path_for(id);
        if !path.is_file() {
            return Err(StoreError::NotFound(id.clone()));
        }
        fs::read_to_string(&path).map_err(|source| StoreError::Io { path, source })
    }

    fn set_body(&mut self, id: &DocumentId, body: &str) -> Result<(), StoreError> {
        let path = self.path_for(id);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&path, body).map_err(|source| StoreError::Io { path, source })
    }
}

fn validate_documents_dir(path: &Path) -> Result<(), StoreError> {
    if !path.is_dir() {
        return Err(StoreError::InvalidRoot(format!(
            "{} is not a directory",
            path.display()
        )));
    }

    Ok(())
}
