//! File load/save.
//!
//! Synchronous and whole-file: load reads every byte then splits into lines,
//! save serializes the buffer and writes it in one call (creating or
//! truncating the target).

use crate::EditorError;
use core_state::EditorState;
use core_text::Buffer;
use std::path::Path;
use tracing::{error, info};

/// Read `path` into a clean buffer. Syntax is not selected here.
pub fn open_file(path: &Path, tab_stop: usize) -> Result<Buffer, EditorError> {
    let content = std::fs::read(path).map_err(|source| {
        error!(target: "io", path = %path.display(), ?source, "file_open_error");
        EditorError::Open {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let buffer = Buffer::from_bytes(&content, tab_stop);
    info!(
        target: "io",
        path = %path.display(),
        bytes = content.len(),
        lines = buffer.line_count(),
        "file_opened"
    );
    Ok(buffer)
}

/// Load `path` into `state`: replaces the buffer, attaches the file name
/// (selecting syntax) and homes the cursor.
pub fn open_into(state: &mut EditorState, path: &Path) -> Result<(), EditorError> {
    state.buffer = open_file(path, state.buffer.tab_stop())?;
    state.set_file_name(path);
    state.cursor = Default::default();
    state.view.row_off = 0;
    state.view.col_off = 0;
    Ok(())
}

/// Write the serialized buffer to `path`. Returns the byte count.
pub fn write_buffer(path: &Path, buffer: &Buffer) -> Result<usize, EditorError> {
    let bytes = buffer.serialize();
    std::fs::write(path, &bytes).map_err(|source| {
        error!(target: "io", path = %path.display(), ?source, "file_write_error");
        EditorError::Write {
            path: path.to_path_buf(),
            source,
        }
    })?;
    info!(target: "io", path = %path.display(), bytes = bytes.len(), "file_written");
    Ok(bytes.len())
}
