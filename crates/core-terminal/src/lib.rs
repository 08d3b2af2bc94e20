//! Terminal backend abstraction and crossterm implementation.
//!
//! `TerminalBackend` owns mode switching (raw mode, alternate screen) and
//! `TerminalIo` is all the editor core needs per frame: the current size and a
//! single write of the composed frame. Tests substitute a fake `TerminalIo`.

use anyhow::Result;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
        size,
    },
};
use std::io::{Write, stdout};
use std::ops::{Deref, DerefMut};
use tracing::debug;

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
}

/// Per-frame terminal access.
pub trait TerminalIo {
    /// Current size as `(rows, cols)`.
    fn dimensions(&mut self) -> Result<(usize, usize)>;
    /// Write a whole frame and flush it.
    fn write_frame(&mut self, frame: &[u8]) -> Result<()>;
}

pub struct CrosstermBackend {
    entered: bool,
}

/// RAII guard ensuring terminal state restoration even if caller early-returns or panics.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
    active: bool,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self { entered: false }
    }

    /// Enter and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard {
            backend: self,
            active: true,
        })
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen)?;
            self.entered = true;
            debug!(target: "runtime", "terminal_entered");
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            execute!(stdout(), LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            self.entered = false;
            debug!(target: "runtime", "terminal_left");
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }
}

impl TerminalIo for CrosstermBackend {
    fn dimensions(&mut self) -> Result<(usize, usize)> {
        let (cols, rows) = size()?;
        Ok((usize::from(rows), usize::from(cols)))
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        let mut out = stdout().lock();
        out.write_all(frame)?;
        out.flush()?;
        Ok(())
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl Deref for TerminalGuard<'_> {
    type Target = CrosstermBackend;

    fn deref(&self) -> &Self::Target {
        self.backend
    }
}

impl DerefMut for TerminalGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.backend
    }
}

impl Drop for TerminalGuard<'_> {
    fn drop(&mut self) {
        if self.active {
            let _ = self.backend.leave();
        }
    }
}
