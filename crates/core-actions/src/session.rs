//! Editor session: state plus whatever modal prompt is open.
//!
//! While a prompt is open every key goes to it; otherwise keys are translated
//! and dispatched. Search runs its callback on every prompt key, including the
//! one that closes the prompt, and Esc puts the view back where it was.

use crate::dispatcher::{DispatchResult, QuitGuard, SaveOutcome, dispatch, save};
use crate::key_translator::translate_key;
use crate::prompt::{Prompt, PromptKind, PromptOutcome};
use crate::search::SearchController;
use core_events::{InputEvent, KeyEvent};
use core_state::EditorState;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug)]
struct ActivePrompt {
    prompt: Prompt,
    search: Option<SearchController>,
}

#[derive(Debug)]
pub struct Session {
    pub state: EditorState,
    guard: QuitGuard,
    prompt: Option<ActivePrompt>,
}

impl Session {
    pub fn new(state: EditorState, quit_times: u32) -> Self {
        Self {
            state,
            guard: QuitGuard::new(quit_times),
            prompt: None,
        }
    }

    pub fn prompt_active(&self) -> Option<PromptKind> {
        self.prompt.as_ref().map(|p| p.prompt.kind())
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> DispatchResult {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Resize(cols, rows) => {
                debug!(target: "actions.session", cols, rows, "resize");
                self.state
                    .set_terminal_size(usize::from(*rows), usize::from(*cols));
                DispatchResult::dirty()
            }
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> DispatchResult {
        if self.prompt.is_some() {
            return self.route_prompt_key(key);
        }
        let Some(action) = translate_key(key) else {
            return DispatchResult::clean();
        };
        let result = dispatch(action, &mut self.state, &mut self.guard);
        if let Some(kind) = result.prompt {
            self.open_prompt(kind);
        }
        result
    }

    fn open_prompt(&mut self, kind: PromptKind) {
        debug!(target: "actions.session", ?kind, "prompt_opened");
        let prompt = Prompt::new(kind);
        self.state.set_sticky_status(prompt.status_text());
        let search = (kind == PromptKind::Search).then(|| SearchController::begin(&self.state.buffer));
        self.prompt = Some(ActivePrompt { prompt, search });
    }

    fn route_prompt_key(&mut self, key: &KeyEvent) -> DispatchResult {
        let Some(active) = self.prompt.as_mut() else {
            return DispatchResult::clean();
        };
        let outcome = active.prompt.handle_key(key);
        if let Some(search) = active.search.as_mut() {
            search.on_key(&mut self.state.buffer, active.prompt.input(), key);
        }
        match outcome {
            PromptOutcome::Edited | PromptOutcome::Unchanged => {
                let text = active.prompt.status_text();
                self.state.set_sticky_status(text);
            }
            PromptOutcome::Cancelled => {
                let kind = active.prompt.kind();
                if let Some(mut search) = active.search.take() {
                    search.cancel(&mut self.state.buffer);
                }
                self.prompt = None;
                debug!(target: "actions.session", ?kind, "prompt_cancelled");
                match kind {
                    PromptKind::SaveAs => self.state.set_status("Save aborted"),
                    PromptKind::Search => self.state.clear_status(),
                }
            }
            PromptOutcome::Committed(text) => {
                let kind = active.prompt.kind();
                self.prompt = None;
                debug!(target: "actions.session", ?kind, "prompt_committed");
                self.state.clear_status();
                if kind == PromptKind::SaveAs {
                    self.state.set_file_name(PathBuf::from(text));
                    if save(&mut self.state) == SaveOutcome::NeedsName {
                        self.state.set_status("Save aborted");
                    }
                }
            }
        }
        DispatchResult::dirty()
    }
}
