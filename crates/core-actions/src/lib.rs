//! Key handling on top of the editor state.
//!
//! - `key_translator`: key event to `Action`.
//! - `dispatcher`: applies an `Action` (edits, motions, save, quit guard).
//! - `prompt`: the modal one-line prompt shown in the message bar.
//! - `search`: incremental search driven by prompt keystrokes.
//! - `session`: owns the state and routes keys to the prompt or the dispatcher.
//! - `io_ops`: loading and saving files.

pub mod dispatcher;
pub mod io_ops;
pub mod key_translator;
pub mod prompt;
pub mod search;
pub mod session;

pub use dispatcher::{DispatchResult, QuitGuard, dispatch};
pub use io_ops::{PersistError, load_lines, open_file, save_lines};
pub use key_translator::translate_key;
pub use prompt::{Prompt, PromptKind, PromptOutcome};
pub use search::SearchController;
pub use session::Session;

/// Status shown at startup.
pub const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Motion(MotionKind),
    Edit(EditKind),
    Command(CommandKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// Insert the character's UTF-8 bytes at the cursor.
    InsertChar(char),
    InsertNewline,
    Backspace,
    /// Delete the byte under the cursor.
    DeleteForward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Save,
    Find,
    Quit,
    /// Nothing to do beyond drawing the next frame.
    Redraw,
}
