use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("cannot open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("terminal failure: {0}")]
    Terminal(#[from] anyhow::Error),
}

impl EditorError {
    /// The underlying I/O error for file failures.
    pub fn io_source(&self) -> Option<&io::Error> {
        match self {
            EditorError::Open { source, .. } | EditorError::Write { source, .. } => Some(source),
            EditorError::Terminal(_) => None,
        }
    }
}
