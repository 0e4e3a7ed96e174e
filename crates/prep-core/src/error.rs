use crate::invocation::ToolStatus;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrepError {
    #[error("Step {index} ({name}): failed to write atom index list to '{path}': {source}", path = path.display())]
    IndexWrite {
        index: usize,
        name: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Step {index} ({name}): failed to launch '{program}': {source}")]
    Launch {
        index: usize,
        name: &'static str,
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Step {index} ({name}): '{program}' terminated with {status}")]
    ToolFailed {
        index: usize,
        name: &'static str,
        program: String,
        status: ToolStatus,
    },

    #[error("Step {index} ({name}): required output file was not produced: '{path}'", path = path.display())]
    MissingOutput {
        index: usize,
        name: &'static str,
        path: PathBuf,
    },
}

impl PrepError {
    /// The 1-based index of the workflow step that failed.
    pub fn step_index(&self) -> usize {
        match self {
            PrepError::IndexWrite { index, .. }
            | PrepError::Launch { index, .. }
            | PrepError::ToolFailed { index, .. }
            | PrepError::MissingOutput { index, .. } => *index,
        }
    }
}
