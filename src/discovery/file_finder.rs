use crate::config::Config;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Whether a path names a workflow (`*.xaml`, any case)
pub fn is_workflow_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("xaml"))
}

/// Finds workflow files under a project root
pub struct WorkflowFinder<'a> {
    config: &'a Config,
}

impl<'a> WorkflowFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// All workflow files below `root`, sorted by path.
    ///
    /// Hidden directories (`.screenshots`, `.local`, `.git`, ...) are
    /// skipped; ignore files are not consulted so that every workflow the
    /// project ships is checked.
    pub fn find_workflows(&self, root: &Path) -> Vec<PathBuf> {
        debug!("Scanning for workflows in: {}", root.display());

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .hidden(true)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let mut files: Vec<PathBuf> = walker
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map_or(false, |t| t.is_file()))
            .map(|entry| entry.into_path())
            .filter(|path| is_workflow_file(path))
            .filter(|path| {
                let relative = path.strip_prefix(root).unwrap_or(path);
                let excluded = self.config.should_exclude(relative);
                if excluded {
                    trace!("Excluding: {}", path.display());
                }
                !excluded
            })
            .collect();

        files.sort();
        debug!("Found {} workflows", files.len());
        files
    }
}
