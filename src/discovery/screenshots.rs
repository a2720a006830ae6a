//! Screenshots stored in the project's screenshot directory

use crate::error::LintError;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Stored screenshots keyed by id (file name without extension).
/// Several files may share an id when only their extensions differ.
#[derive(Debug, Clone, Default)]
pub struct ScreenshotStore {
    directory: PathBuf,
    files: BTreeMap<String, Vec<PathBuf>>,
}

impl ScreenshotStore {
    /// Read the screenshot directory. A missing directory is an empty store.
    pub fn load(directory: &Path) -> Result<Self, LintError> {
        let mut files = BTreeMap::new();

        if directory.is_dir() {
            let walker = WalkDir::new(directory)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name();

            for entry in walker {
                let entry = entry.map_err(|e| {
                    let path = e.path().unwrap_or(directory).to_path_buf();
                    LintError::io(path, e.into())
                })?;
                if !entry.file_type().is_file() {
                    continue;
                }
                if let Some(stem) = entry.path().file_stem() {
                    files
                        .entry(stem.to_string_lossy().into_owned())
                        .or_insert_with(Vec::new)
                        .push(entry.into_path());
                }
            }
        } else {
            debug!("No screenshot directory at {}", directory.display());
        }

        Ok(Self {
            directory: directory.to_path_buf(),
            files,
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn ids(&self) -> BTreeSet<String> {
        self.files.keys().cloned().collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.files.contains_key(id)
    }

    /// Every stored file with the given id
    pub fn paths_of(&self, id: &str) -> &[PathBuf] {
        self.files.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Stored screenshots not referenced by any workflow
    pub fn orphans(&self, in_use: &BTreeSet<String>) -> Vec<PathBuf> {
        self.files
            .iter()
            .filter(|(id, _)| !in_use.contains(*id))
            .flat_map(|(_, paths)| paths.iter().cloned())
            .collect()
    }
}
