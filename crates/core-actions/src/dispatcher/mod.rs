//! Dispatcher applying `Action` to mutable editor state.
//!
//! * `motion`  - cursor movement
//! * `edit`    - text mutation (insert/backspace/delete/newline)
//! * `command` - save, quit guard, prompt requests
//!
//! Prompt-driven flows (save-as, search) need keys routed to the prompt, which
//! the dispatcher does not own; it only reports the request through
//! `DispatchResult::prompt` and the session opens it.

use crate::prompt::PromptKind;
use crate::{Action, CommandKind};
use core_state::EditorState;
use tracing::trace;

mod command;
mod edit;
mod motion;

pub use command::{QuitGuard, SaveOutcome, save};

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub dirty: bool,
    pub quit: bool,
    /// The session should open this prompt.
    pub prompt: Option<PromptKind>,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
            prompt: None,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
            prompt: None,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
            prompt: None,
        }
    }
    pub fn prompt(kind: PromptKind) -> Self {
        Self {
            dirty: true,
            quit: false,
            prompt: Some(kind),
        }
    }
}

/// Apply an action to editor state. Any action other than quit re-arms the
/// quit guard.
pub fn dispatch(action: Action, state: &mut EditorState, guard: &mut QuitGuard) -> DispatchResult {
    trace!(target: "actions.dispatch", ?action, "dispatch");
    if !matches!(action, Action::Command(CommandKind::Quit)) {
        guard.reset();
    }
    match action {
        Action::Motion(kind) => motion::handle_motion(kind, state),
        Action::Edit(kind) => edit::handle_edit(kind, state),
        Action::Command(kind) => command::handle_command(kind, state, guard),
    }
}
