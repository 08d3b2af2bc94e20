//! Key to action translation.
//!
//! Bindings are fixed. `Ctrl` combinations without a binding insert the
//! corresponding control byte, which the renderer shows in inverse video.

use crate::{Action, CommandKind, EditKind, MotionKind};
use core_events::{KeyCode, KeyEvent, KeyModifiers};

pub fn translate_key(key: &KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Enter => Action::Edit(EditKind::InsertNewline),
        KeyCode::Backspace => Action::Edit(EditKind::Backspace),
        KeyCode::Delete => Action::Edit(EditKind::DeleteForward),
        KeyCode::Tab => Action::Edit(EditKind::InsertChar('\t')),
        KeyCode::Esc => Action::Command(CommandKind::Redraw),
        KeyCode::Up => Action::Motion(MotionKind::Up),
        KeyCode::Down => Action::Motion(MotionKind::Down),
        KeyCode::Left => Action::Motion(MotionKind::Left),
        KeyCode::Right => Action::Motion(MotionKind::Right),
        KeyCode::Home => Action::Motion(MotionKind::LineStart),
        KeyCode::End => Action::Motion(MotionKind::LineEnd),
        KeyCode::PageUp => Action::Motion(MotionKind::PageUp),
        KeyCode::PageDown => Action::Motion(MotionKind::PageDown),
        KeyCode::Char(c) if key.mods.contains(KeyModifiers::CTRL) => translate_ctrl(c)?,
        KeyCode::Char(c) => Action::Edit(EditKind::InsertChar(c)),
    };
    Some(action)
}

fn translate_ctrl(c: char) -> Option<Action> {
    let action = match c.to_ascii_lowercase() {
        'q' => Action::Command(CommandKind::Quit),
        's' => Action::Command(CommandKind::Save),
        'f' => Action::Command(CommandKind::Find),
        'l' => Action::Command(CommandKind::Redraw),
        'h' => Action::Edit(EditKind::Backspace),
        c @ ('a'..='z' | '@' | '[' | '\\' | ']' | '^' | '_') => {
            Action::Edit(EditKind::InsertChar(char::from(c as u8 & 0x1f)))
        }
        _ => return None,
    };
    Some(action)
}
