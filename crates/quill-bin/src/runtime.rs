//! Main loop.
//!
//! One iteration: query the terminal size, render a frame, write it, then wait
//! up to the poll interval for an input event and hand it to the session. The
//! poll timeout keeps frames coming while idle so the status message expires.

use anyhow::Result;
use core_actions::{HELP_MESSAGE, Session, open_file};
use core_input::EventSource;
use core_render::RenderEngine;
use core_state::{EditorState, TextBuffer};
use core_terminal::TerminalIo;
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub struct EditorRuntime<'a, T: TerminalIo, I: EventSource> {
    terminal: &'a mut T,
    input: I,
    session: Session,
    engine: RenderEngine,
    poll_interval: Duration,
    frames: u64,
}

impl<'a, T: TerminalIo, I: EventSource> EditorRuntime<'a, T, I> {
    pub fn new(
        terminal: &'a mut T,
        input: I,
        session: Session,
        engine: RenderEngine,
        poll_interval: Duration,
    ) -> Self {
        Self {
            terminal,
            input,
            session,
            engine,
            poll_interval,
            frames: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run until the session asks to quit. The screen is cleared on the way out.
    pub fn run(&mut self) -> Result<()> {
        let span = tracing::debug_span!(target: "runtime", "event_loop");
        let _enter = span.enter();
        loop {
            self.refresh_screen()?;
            let Some(event) = self.input.next_event(self.poll_interval)? else {
                continue;
            };
            if self.session.handle_event(&event).quit {
                break;
            }
        }
        self.clear_screen()?;
        info!(target: "runtime", frames = self.frames, "shutdown");
        Ok(())
    }

    /// Compose and write one frame at the terminal's current size.
    pub fn refresh_screen(&mut self) -> Result<()> {
        let (rows, cols) = self.terminal.dimensions()?;
        let state = &mut self.session.state;
        if (rows.saturating_sub(2), cols) != (state.text_rows, state.text_cols) {
            debug!(target: "runtime", rows, cols, "terminal_size");
        }
        state.set_terminal_size(rows, cols);
        let frame = self.engine.render(state, Instant::now())?;
        self.terminal.write_frame(&frame)?;
        self.frames += 1;
        Ok(())
    }

    fn clear_screen(&mut self) -> Result<()> {
        let mut out = Vec::new();
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.terminal.write_frame(&out)
    }
}

/// Editor state for startup: the file at `path` when given, otherwise an empty
/// unnamed buffer. Open failures are reported on the status bar instead of
/// aborting.
pub fn initial_state(path: Option<&Path>, tab_stop: usize) -> EditorState {
    let fresh = || EditorState::new(TextBuffer::new(tab_stop));
    let Some(path) = path else {
        let mut state = fresh();
        state.set_status(HELP_MESSAGE);
        return state;
    };
    match open_file(path, tab_stop) {
        Ok(mut state) => {
            state.set_status(HELP_MESSAGE);
            state
        }
        Err(e) => {
            warn!(target: "runtime", path = %path.display(), error = %e, "open_failed");
            let mut state = fresh();
            state.set_status(e.to_string());
            state
        }
    }
}
