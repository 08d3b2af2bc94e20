use core_events::{InputEvent, KeyCode, KeyEvent, KeyModifiers};
use crossterm::event::{
    Event as CEvent, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKeyEventKind,
    KeyModifiers as CKeyModifiers,
};

/// Map any crossterm event into an editor input event.
///
/// Returns `None` for events the editor ignores (mouse, focus, paste, key
/// releases, unsupported keys).
pub(crate) fn map_event(event: &CEvent) -> Option<InputEvent> {
    match event {
        CEvent::Key(key) => map_key_event(key).map(InputEvent::Key),
        CEvent::Resize(cols, rows) => Some(InputEvent::Resize(*cols, *rows)),
        _ => None,
    }
}

/// Map a crossterm key event. Releases are dropped so a key acts once.
pub(crate) fn map_key_event(event: &CKeyEvent) -> Option<KeyEvent> {
    if matches!(event.kind, CKeyEventKind::Release) {
        return None;
    }
    let code = map_key_code(&event.code)?;
    Some(KeyEvent::new(code, map_mods(event.modifiers)))
}

pub(crate) fn map_key_code(code: &CKeyCode) -> Option<KeyCode> {
    let code = match code {
        CKeyCode::Char(c) => KeyCode::Char(*c),
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Delete => KeyCode::Delete,
        CKeyCode::Tab | CKeyCode::BackTab => KeyCode::Tab,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Home => KeyCode::Home,
        CKeyCode::End => KeyCode::End,
        CKeyCode::PageUp => KeyCode::PageUp,
        CKeyCode::PageDown => KeyCode::PageDown,
        _ => return None,
    };
    Some(code)
}

pub(crate) fn map_mods(mods: CKeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if mods.contains(CKeyModifiers::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if mods.contains(CKeyModifiers::ALT) {
        out |= KeyModifiers::ALT;
    }
    if mods.contains(CKeyModifiers::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState as CKeyEventState;

    fn key_event(code: CKeyCode, modifiers: CKeyModifiers, kind: CKeyEventKind) -> CKeyEvent {
        CKeyEvent {
            code,
            modifiers,
            kind,
            state: CKeyEventState::empty(),
        }
    }

    #[test]
    fn maps_basic_char() {
        let ev = key_event(
            CKeyCode::Char('a'),
            CKeyModifiers::NONE,
            CKeyEventKind::Press,
        );
        let key = map_key_event(&ev).expect("char should map");
        assert_eq!(key, KeyEvent::plain(KeyCode::Char('a')));
    }

    #[test]
    fn maps_ctrl_char() {
        let ev = key_event(
            CKeyCode::Char('q'),
            CKeyModifiers::CONTROL,
            CKeyEventKind::Press,
        );
        let key = map_key_event(&ev).expect("ctrl char should map");
        assert!(key.is_ctrl('q'));
    }

    #[test]
    fn maps_named_keys() {
        for (c, k) in [
            (CKeyCode::Delete, KeyCode::Delete),
            (CKeyCode::PageDown, KeyCode::PageDown),
            (CKeyCode::Home, KeyCode::Home),
            (CKeyCode::BackTab, KeyCode::Tab),
        ] {
            assert_eq!(map_key_code(&c), Some(k));
        }
    }

    #[test]
    fn release_and_unsupported_are_dropped() {
        let release = key_event(
            CKeyCode::Char('a'),
            CKeyModifiers::NONE,
            CKeyEventKind::Release,
        );
        assert!(map_key_event(&release).is_none());
        assert!(map_key_code(&CKeyCode::F(5)).is_none());
        assert!(map_key_code(&CKeyCode::Insert).is_none());
    }

    #[test]
    fn resize_passes_through() {
        assert_eq!(
            map_event(&CEvent::Resize(80, 24)),
            Some(InputEvent::Resize(80, 24))
        );
        assert_eq!(map_event(&CEvent::FocusGained), None);
    }
}
