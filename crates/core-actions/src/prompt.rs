//! One-line modal prompt shown in the message bar.
//!
//! The prompt only edits its own input; what a keystroke means for the rest of
//! the editor (incremental search, save-as) is decided by the session.

use core_events::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    SaveAs,
    Search,
}

impl PromptKind {
    fn template(self) -> (&'static str, &'static str) {
        match self {
            PromptKind::SaveAs => ("Save as: ", " (ESC to cancel)"),
            PromptKind::Search => ("Search: ", " (Use ESC/Arrows/Enter)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Input changed.
    Edited,
    /// Key ignored by the prompt (arrows, empty Enter, other control keys).
    Unchanged,
    Cancelled,
    Committed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    kind: PromptKind,
    buf: String,
}

impl Prompt {
    pub fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            buf: String::new(),
        }
    }

    pub fn kind(&self) -> PromptKind {
        self.kind
    }

    pub fn input(&self) -> &str {
        &self.buf
    }

    /// Message bar text for the current input.
    pub fn status_text(&self) -> String {
        let (before, after) = self.kind.template();
        format!("{before}{}{after}", self.buf)
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> PromptOutcome {
        match key.code {
            KeyCode::Esc => PromptOutcome::Cancelled,
            KeyCode::Enter if self.buf.is_empty() => PromptOutcome::Unchanged,
            KeyCode::Enter => PromptOutcome::Committed(self.buf.clone()),
            KeyCode::Backspace | KeyCode::Delete => self.pop(),
            KeyCode::Char(_) if key.is_ctrl('h') => self.pop(),
            KeyCode::Char(c) if !key.mods.contains(KeyModifiers::CTRL) && is_printable_ascii(c) => {
                self.buf.push(c);
                PromptOutcome::Edited
            }
            _ => PromptOutcome::Unchanged,
        }
    }

    fn pop(&mut self) -> PromptOutcome {
        match self.buf.pop() {
            Some(_) => PromptOutcome::Edited,
            None => PromptOutcome::Unchanged,
        }
    }
}

fn is_printable_ascii(c: char) -> bool {
    c.is_ascii() && !c.is_ascii_control()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(p: &mut Prompt, s: &str) {
        for c in s.chars() {
            p.handle_key(&KeyEvent::plain(KeyCode::Char(c)));
        }
    }

    #[test]
    fn status_text_uses_kind_template() {
        let mut p = Prompt::new(PromptKind::SaveAs);
        type_str(&mut p, "a.c");
        assert_eq!(p.status_text(), "Save as: a.c (ESC to cancel)");
        let s = Prompt::new(PromptKind::Search);
        assert_eq!(s.status_text(), "Search:  (Use ESC/Arrows/Enter)");
    }

    #[test]
    fn enter_commits_only_non_empty_input() {
        let mut p = Prompt::new(PromptKind::SaveAs);
        let enter = KeyEvent::plain(KeyCode::Enter);
        assert_eq!(p.handle_key(&enter), PromptOutcome::Unchanged);
        type_str(&mut p, "x");
        assert_eq!(p.handle_key(&enter), PromptOutcome::Committed("x".into()));
    }

    #[test]
    fn backspace_variants_edit_input() {
        let mut p = Prompt::new(PromptKind::Search);
        type_str(&mut p, "abc");
        p.handle_key(&KeyEvent::plain(KeyCode::Backspace));
        p.handle_key(&KeyEvent::ctrl('h'));
        assert_eq!(p.input(), "a");
        p.handle_key(&KeyEvent::plain(KeyCode::Delete));
        assert_eq!(
            p.handle_key(&KeyEvent::plain(KeyCode::Backspace)),
            PromptOutcome::Unchanged
        );
    }

    #[test]
    fn control_keys_are_ignored() {
        let mut p = Prompt::new(PromptKind::Search);
        assert_eq!(p.handle_key(&KeyEvent::ctrl('a')), PromptOutcome::Unchanged);
        assert_eq!(
            p.handle_key(&KeyEvent::plain(KeyCode::Char('é'))),
            PromptOutcome::Unchanged
        );
        assert_eq!(
            p.handle_key(&KeyEvent::plain(KeyCode::Up)),
            PromptOutcome::Unchanged
        );
        assert_eq!(
            p.handle_key(&KeyEvent::plain(KeyCode::Esc)),
            PromptOutcome::Cancelled
        );
        assert_eq!(p.input(), "");
    }
}
