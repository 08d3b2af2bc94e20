//! Editor state: the text buffer plus everything around it that a frame needs.
//!
//! - `buffer`: ordered rows, cursor, scroll offsets, dirty count, active syntax.
//! - `line_ending`: terminator detection so saves reproduce the loaded file.
//! - `EditorState`: file binding, status message, text-area size.

pub mod buffer;
pub mod line_ending;

pub use buffer::TextBuffer;
pub use line_ending::{LineEnding, SplitLines, join_lines, split_lines};

use core_text::select_syntax;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

/// Seconds a status message stays visible unless configured otherwise.
pub const DEFAULT_MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Status bar message stamped with the time it was set. A sticky message
/// (an open prompt) ignores the timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub set_at: Instant,
    pub sticky: bool,
}

#[derive(Debug)]
pub struct EditorState {
    pub buffer: TextBuffer,
    pub file_name: Option<PathBuf>,
    pub status: Option<StatusMessage>,
    pub original_line_ending: LineEnding,
    pub had_trailing_newline: bool,
    /// Rows available for text (terminal rows minus status and message bars).
    pub text_rows: usize,
    pub text_cols: usize,
}

impl EditorState {
    pub fn new(buffer: TextBuffer) -> Self {
        Self {
            buffer,
            file_name: None,
            status: None,
            original_line_ending: LineEnding::Lf,
            had_trailing_newline: true,
            text_rows: 0,
            text_cols: 0,
        }
    }

    /// Build state from a loaded file's bytes, binding it to `path`.
    pub fn from_file_bytes(path: &Path, bytes: &[u8], tab_stop: usize) -> Self {
        Self::from_split_lines(path, split_lines(bytes), tab_stop)
    }

    /// Build state from rows already split off a file's bytes.
    pub fn from_split_lines(path: &Path, split: SplitLines, tab_stop: usize) -> Self {
        let syntax = select_syntax(path);
        // An empty file saves back with a trailing newline once text is added.
        let empty = split.lines.is_empty();
        let buffer = TextBuffer::from_lines(split.lines, tab_stop, syntax);
        info!(
            target: "state.buffer",
            path = %path.display(),
            rows = buffer.num_rows(),
            line_ending = ?split.original,
            mixed = split.mixed,
            "file_loaded"
        );
        Self {
            buffer,
            file_name: Some(path.to_path_buf()),
            status: None,
            original_line_ending: split.original,
            had_trailing_newline: split.had_trailing_newline || empty,
            text_rows: 0,
            text_cols: 0,
        }
    }

    /// Bind to `path` and reselect the syntax rule from its name.
    pub fn set_file_name(&mut self, path: PathBuf) {
        self.buffer.set_syntax(select_syntax(&path));
        self.file_name = Some(path);
    }

    /// Name shown in the status bar.
    pub fn display_name(&self) -> String {
        self.file_name
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "[No Name]".to_string())
    }

    pub fn set_status<S: Into<String>>(&mut self, text: S) {
        self.status = Some(StatusMessage {
            text: text.into(),
            set_at: Instant::now(),
            sticky: false,
        });
    }

    /// Message that stays up until replaced or cleared.
    pub fn set_sticky_status<S: Into<String>>(&mut self, text: S) {
        self.status = Some(StatusMessage {
            text: text.into(),
            set_at: Instant::now(),
            sticky: true,
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Message text if it is sticky or was set less than `timeout` before `now`.
    pub fn visible_status(&self, now: Instant, timeout: Duration) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|m| m.sticky || now.saturating_duration_since(m.set_at) < timeout)
            .map(|m| m.text.as_str())
    }

    /// Record the terminal size; two rows are reserved for the status and
    /// message bars.
    pub fn set_terminal_size(&mut self, rows: usize, cols: usize) {
        self.text_rows = rows.saturating_sub(2);
        self.text_cols = cols;
    }

    /// Rows joined with the loaded line ending.
    pub fn serialize(&self) -> Vec<u8> {
        join_lines(
            self.buffer.lines(),
            self.original_line_ending,
            self.had_trailing_newline,
        )
    }
}
