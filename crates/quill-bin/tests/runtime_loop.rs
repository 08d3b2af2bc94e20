//! Drive the main loop with a recording terminal and scripted keys.

use anyhow::{Result, anyhow};
use core_actions::{HELP_MESSAGE, Session};
use core_events::{InputEvent, KeyCode, KeyEvent};
use core_input::EventSource;
use core_render::RenderEngine;
use core_terminal::TerminalIo;
use pretty_assertions::assert_eq;
use quill::{EditorRuntime, initial_state};
use std::collections::VecDeque;
use std::time::Duration;

struct FakeTerminal {
    rows: usize,
    cols: usize,
    frames: Vec<Vec<u8>>,
}

impl FakeTerminal {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            frames: Vec::new(),
        }
    }

    fn frame_text(&self, i: usize) -> String {
        String::from_utf8_lossy(&self.frames[i]).into_owned()
    }
}

impl TerminalIo for FakeTerminal {
    fn dimensions(&mut self) -> Result<(usize, usize)> {
        Ok((self.rows, self.cols))
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.frames.push(frame.to_vec());
        Ok(())
    }
}

/// Replays events; `None` entries simulate a poll timeout. Running dry is an
/// error so a test that never quits fails instead of spinning.
struct ScriptedInput {
    events: VecDeque<Option<InputEvent>>,
}

impl ScriptedInput {
    fn keys(keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self {
            events: keys.into_iter().map(|k| Some(InputEvent::Key(k))).collect(),
        }
    }
}

impl EventSource for ScriptedInput {
    fn next_event(&mut self, _timeout: Duration) -> Result<Option<InputEvent>> {
        self.events
            .pop_front()
            .ok_or_else(|| anyhow!("input script exhausted"))
    }
}

fn chars(s: &str) -> impl Iterator<Item = KeyEvent> + '_ {
    s.chars().map(|c| KeyEvent::plain(KeyCode::Char(c)))
}

fn runtime<'a>(
    term: &'a mut FakeTerminal,
    input: ScriptedInput,
    session: Session,
) -> EditorRuntime<'a, FakeTerminal, ScriptedInput> {
    EditorRuntime::new(
        term,
        input,
        session,
        RenderEngine::default(),
        Duration::from_millis(1),
    )
}

#[test]
fn type_and_quit_without_file() -> Result<()> {
    let mut term = FakeTerminal::new(6, 80);
    let mut keys: Vec<KeyEvent> = chars("hi").collect();
    keys.extend([KeyEvent::ctrl('q'); 4]);
    let session = Session::new(initial_state(None, 4), 3);
    let mut rt = runtime(&mut term, ScriptedInput::keys(keys), session);
    rt.run()?;
    assert!(rt.session().state.buffer.is_dirty());
    drop(rt);

    // One frame per key plus the initial one, then the exit clear.
    assert_eq!(term.frames.len(), 7);
    let first = term.frame_text(0);
    assert!(first.contains("quill -- version"));
    assert!(first.contains(HELP_MESSAGE));
    let typed = term.frame_text(2);
    assert!(typed.starts_with("\x1b[?25l\x1b[1;1Hhi"));
    assert!(typed.contains("[No Name] - 1 lines (modified)"));
    let warned = term.frame_text(3);
    assert!(warned.contains("Press Ctrl-Q 3 more times"));
    assert_eq!(term.frame_text(6), "\x1b[2J\x1b[1;1H");
    Ok(())
}

#[test]
fn idle_poll_redraws_and_resize_is_picked_up() -> Result<()> {
    let mut term = FakeTerminal::new(5, 20);
    let input = ScriptedInput {
        events: VecDeque::from([
            None,
            Some(InputEvent::Resize(30, 8)),
            Some(InputEvent::Key(KeyEvent::ctrl('q'))),
        ]),
    };
    let session = Session::new(initial_state(None, 4), 3);
    let mut rt = runtime(&mut term, input, session);
    rt.run()?;
    drop(rt);
    assert_eq!(term.frames.len(), 4);
    // Dimensions come from the terminal each frame.
    assert_eq!(term.frame_text(2).matches("\r\n").count(), 4);
    Ok(())
}

#[test]
fn search_then_save_to_opened_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "first\nsecond\n")?;

    let mut term = FakeTerminal::new(8, 60);
    let mut keys = vec![KeyEvent::ctrl('f')];
    keys.extend(chars("cond"));
    keys.push(KeyEvent::plain(KeyCode::Enter));
    keys.extend(chars("!"));
    keys.push(KeyEvent::ctrl('s'));
    keys.push(KeyEvent::ctrl('q'));

    let session = Session::new(initial_state(Some(&path), 4), 3);
    let mut rt = runtime(&mut term, ScriptedInput::keys(keys), session);
    rt.run()?;
    let state = &rt.session().state;
    assert_eq!((state.buffer.cy, state.buffer.cx), (1, 3));
    assert!(!state.buffer.is_dirty());
    drop(rt);

    assert_eq!(std::fs::read(&path)?, b"first\nse!cond\n");
    let saved = term
        .frames
        .iter()
        .rev()
        .nth(1)
        .map(|f| String::from_utf8_lossy(f).into_owned())
        .unwrap_or_default();
    assert!(saved.contains("14 bytes written to disk"));
    Ok(())
}

#[test]
fn search_prompt_stays_on_message_bar_while_idle() -> Result<()> {
    let mut session = Session::new(initial_state(None, 4), 3);
    session.state.set_terminal_size(6, 80);
    session.handle_key(&KeyEvent::ctrl('f'));
    session.handle_key(&KeyEvent::plain(KeyCode::Char('x')));
    let set_at = session
        .state
        .status
        .as_ref()
        .map(|m| m.set_at)
        .ok_or_else(|| anyhow!("prompt has no status"))?;

    let engine = RenderEngine::default();
    let idle = engine.render(&mut session.state, set_at + Duration::from_secs(6))?;
    assert!(String::from_utf8_lossy(&idle).contains("Search: x (Use ESC/Arrows/Enter)"));
    Ok(())
}

#[test]
fn unreadable_path_starts_empty_with_message() {
    let dir = tempfile::tempdir().unwrap();
    let state = initial_state(Some(dir.path()), 4);
    assert!(state.buffer.is_empty());
    assert!(state.file_name.is_none());
    let text = state.status.as_ref().map(|m| m.text.clone()).unwrap_or_default();
    assert!(text.starts_with("Can't open '"));
}
