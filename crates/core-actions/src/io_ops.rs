//! File load and save.
//!
//! Synchronous and byte-oriented: files are read whole, split into rows by
//! `core_state::split_lines`, and written back with the remembered terminator.
//! A missing file is not an error on open; the editor starts empty and bound
//! to the path so the first save creates it.

use core_state::{EditorState, LineEnding, SplitLines, TextBuffer, join_lines, split_lines};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Can't open '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Can't open file '{}' for write", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("Can't save! I/O error: {source} [{written} bytes saved]")]
    Write {
        path: PathBuf,
        written: usize,
        source: io::Error,
    },
}

/// Read `path` and split it into rows with the terminators stripped.
pub fn load_lines(path: &Path) -> Result<SplitLines, PersistError> {
    let bytes = std::fs::read(path).map_err(|source| PersistError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(target: "io", path = %path.display(), size_bytes = bytes.len(), "file_read_ok");
    Ok(split_lines(&bytes))
}

/// Load `path` into a fresh editor state.
pub fn open_file(path: &Path, tab_stop: usize) -> Result<EditorState, PersistError> {
    match load_lines(path) {
        Ok(split) => Ok(EditorState::from_split_lines(path, split, tab_stop)),
        Err(PersistError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            tracing::info!(target: "io", path = %path.display(), "new_file");
            let mut state = EditorState::new(TextBuffer::new(tab_stop));
            state.set_file_name(path.to_path_buf());
            Ok(state)
        }
        Err(e) => {
            tracing::error!(target: "io", path = %path.display(), error = %e, "file_read_error");
            Err(e)
        }
    }
}

/// Write `lines` to `path` joined by `ending`, replacing any previous content.
/// Returns the number of bytes written.
pub fn save_lines<'a, I>(
    path: &Path,
    lines: I,
    ending: LineEnding,
    trailing_newline: bool,
) -> Result<usize, PersistError>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let data = join_lines(lines, ending, trailing_newline);
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|source| {
            tracing::error!(target: "io", path = %path.display(), error = %source, "file_open_error");
            PersistError::Open {
                path: path.to_path_buf(),
                source,
            }
        })?;
    let mut written = 0;
    while written < data.len() {
        match file.write(&data[written..]) {
            Ok(0) => {
                return Err(write_failed(
                    path,
                    written,
                    io::Error::from(io::ErrorKind::WriteZero),
                ));
            }
            Ok(n) => written += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(write_failed(path, written, e)),
        }
    }
    file.flush().map_err(|e| write_failed(path, written, e))?;
    tracing::info!(target: "io", path = %path.display(), bytes = written, "file_written");
    Ok(written)
}

fn write_failed(path: &Path, written: usize, source: io::Error) -> PersistError {
    tracing::error!(target: "io", path = %path.display(), written, error = %source, "file_write_error");
    PersistError::Write {
        path: path.to_path_buf(),
        written,
        source,
    }
}
