//! Key decoder backed by crossterm.
//!
//! Reads block for at most the configured poll interval so the caller can
//! redraw (and expire the status message) even when no key arrives.

mod key_token;

use anyhow::Result;
use core_events::InputEvent;
use std::time::Duration;
use tracing::trace;

/// Source of decoded input events.
pub trait EventSource {
    /// Wait up to `timeout` for the next event. `Ok(None)` means the wait timed
    /// out or the terminal produced something the editor ignores.
    fn next_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>>;
}

/// Reads from the process terminal through crossterm.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermInput;

impl EventSource for CrosstermInput {
    fn next_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>> {
        if !crossterm::event::poll(timeout)? {
            return Ok(None);
        }
        let raw = crossterm::event::read()?;
        let mapped = key_token::map_event(&raw);
        trace!(target: "input", mapped = ?mapped, "event_read");
        Ok(mapped)
    }
}
