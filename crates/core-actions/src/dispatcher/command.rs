//! Command handling: save, quit guard, prompt requests.

use super::DispatchResult;
use crate::CommandKind;
use crate::io_ops::save_lines;
use crate::prompt::PromptKind;
use core_state::EditorState;

/// Counts down the extra quit presses required while the buffer is dirty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuitGuard {
    times: u32,
    remaining: u32,
}

impl QuitGuard {
    pub fn new(times: u32) -> Self {
        Self {
            times,
            remaining: times,
        }
    }

    /// Re-arm after any non-quit action.
    pub fn reset(&mut self) {
        self.remaining = self.times;
    }

    /// Register a quit press. Returns the count to show in the warning, or
    /// `None` when the editor should exit.
    pub fn press(&mut self, dirty: bool) -> Option<u32> {
        if !dirty || self.remaining == 0 {
            return None;
        }
        let shown = self.remaining;
        self.remaining -= 1;
        Some(shown)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(usize),
    /// No file name yet; the caller should ask for one.
    NeedsName,
    Failed,
}

/// Write the buffer to its file and report the result on the status bar.
pub fn save(state: &mut EditorState) -> SaveOutcome {
    let Some(path) = state.file_name.clone() else {
        return SaveOutcome::NeedsName;
    };
    let result = save_lines(
        &path,
        state.buffer.lines(),
        state.original_line_ending,
        state.had_trailing_newline,
    );
    match result {
        Ok(n) => {
            state.buffer.mark_clean();
            state.set_status(format!("{n} bytes written to disk"));
            SaveOutcome::Saved(n)
        }
        Err(e) => {
            state.set_status(e.to_string());
            SaveOutcome::Failed
        }
    }
}

pub(crate) fn handle_command(
    kind: CommandKind,
    state: &mut EditorState,
    guard: &mut QuitGuard,
) -> DispatchResult {
    match kind {
        CommandKind::Quit => match guard.press(state.buffer.is_dirty()) {
            Some(n) => {
                tracing::debug!(target: "actions.dispatch", remaining = n, "quit_blocked");
                state.set_status(format!(
                    "WARNING!!! File has unsaved changes. Press Ctrl-Q {n} more times to quit."
                ));
                DispatchResult::dirty()
            }
            None => DispatchResult::quit(),
        },
        CommandKind::Save => match save(state) {
            SaveOutcome::NeedsName => DispatchResult::prompt(PromptKind::SaveAs),
            SaveOutcome::Saved(_) | SaveOutcome::Failed => DispatchResult::dirty(),
        },
        CommandKind::Find => DispatchResult::prompt(PromptKind::Search),
        CommandKind::Redraw => DispatchResult::clean(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Action;
    use crate::dispatcher::dispatch;
    use core_state::TextBuffer;

    fn dirty_state() -> EditorState {
        let mut st = EditorState::new(TextBuffer::default());
        st.buffer.insert_char(b'x');
        st
    }

    #[test]
    fn guard_counts_down_then_releases() {
        let mut guard = QuitGuard::new(3);
        assert_eq!(guard.press(true), Some(3));
        assert_eq!(guard.press(true), Some(2));
        assert_eq!(guard.press(true), Some(1));
        assert_eq!(guard.press(true), None);
    }

    #[test]
    fn clean_buffer_quits_immediately() {
        let mut st = EditorState::new(TextBuffer::default());
        let mut guard = QuitGuard::new(3);
        let r = dispatch(Action::Command(CommandKind::Quit), &mut st, &mut guard);
        assert!(r.quit);
    }

    #[test]
    fn dirty_quit_warns_and_other_keys_rearm() {
        let mut st = dirty_state();
        let mut guard = QuitGuard::new(3);
        let quit = Action::Command(CommandKind::Quit);
        assert!(!dispatch(quit.clone(), &mut st, &mut guard).quit);
        assert_eq!(
            st.status.as_ref().map(|m| m.text.as_str()),
            Some("WARNING!!! File has unsaved changes. Press Ctrl-Q 3 more times to quit.")
        );
        assert!(!dispatch(quit.clone(), &mut st, &mut guard).quit);
        dispatch(Action::Command(CommandKind::Redraw), &mut st, &mut guard);
        assert!(!dispatch(quit.clone(), &mut st, &mut guard).quit);
        assert!(
            st.status
                .as_ref()
                .is_some_and(|m| m.text.contains("Press Ctrl-Q 3 more times"))
        );
    }

    #[test]
    fn save_without_name_requests_prompt() {
        let mut st = dirty_state();
        let mut guard = QuitGuard::new(3);
        let r = dispatch(Action::Command(CommandKind::Save), &mut st, &mut guard);
        assert_eq!(r.prompt, Some(PromptKind::SaveAs));
        assert!(st.buffer.is_dirty());
    }

    #[test]
    fn save_writes_and_marks_clean() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut st = dirty_state();
        st.file_name = Some(path.clone());
        assert_eq!(save(&mut st), SaveOutcome::Saved(2));
        assert!(!st.buffer.is_dirty());
        assert_eq!(
            st.status.as_ref().map(|m| m.text.as_str()),
            Some("2 bytes written to disk")
        );
        assert_eq!(std::fs::read(&path).unwrap(), b"x\n");
    }
}
