mod file_finder;
mod screenshots;

pub use file_finder::{is_workflow_file, WorkflowFinder};
pub use screenshots::ScreenshotStore;
