//! Frame assembly.
//!
//! A frame is one byte buffer written to the terminal in a single call:
//! hide cursor, home, every text row (clipped to the horizontal window and
//! colored), the status bar, the message bar, then the real cursor placed and
//! shown again. Every text row ends with clear-to-end-of-line so stale cells
//! from the previous frame never survive.

use crate::status::{StatusContext, compose_status, format_message, format_status};
use crate::style::{ColorRun, REVERSE_VIDEO, RESET_ATTRIBUTES};
use crate::viewport::scroll_into_view;
use anyhow::Result;
use core_state::{DEFAULT_MESSAGE_TIMEOUT, EditorState};
use core_text::Row;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    terminal::{Clear, ClearType},
};
use std::time::{Duration, Instant};
use tracing::trace;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone)]
pub struct RenderEngine {
    message_timeout: Duration,
}

impl Default for RenderEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGE_TIMEOUT)
    }
}

impl RenderEngine {
    pub fn new(message_timeout: Duration) -> Self {
        Self { message_timeout }
    }

    /// Scroll the cursor into view, then compose the frame for `state`.
    pub fn render(&self, state: &mut EditorState, now: Instant) -> Result<Vec<u8>> {
        let (rows, cols) = (state.text_rows, state.text_cols);
        scroll_into_view(&mut state.buffer, rows, cols);
        self.compose_frame(state, now)
    }

    /// Serialize `state` as it stands; offsets and `rx` are taken as given.
    pub fn compose_frame(&self, state: &EditorState, now: Instant) -> Result<Vec<u8>> {
        let started = Instant::now();
        let mut out = Vec::with_capacity(state.text_rows * (state.text_cols + 8) + 64);
        queue!(out, Hide, MoveTo(0, 0))?;

        self.draw_rows(state, &mut out)?;
        self.draw_status_bar(state, &mut out);
        self.draw_message_bar(state, now, &mut out)?;

        let buf = &state.buffer;
        let y = buf.cy.saturating_sub(buf.row_offset);
        let x = buf.rx.saturating_sub(buf.col_offset);
        queue!(out, MoveTo(to_u16(x), to_u16(y)), Show)?;

        trace!(
            target: "render",
            bytes = out.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "frame_composed"
        );
        Ok(out)
    }

    fn draw_rows(&self, state: &EditorState, out: &mut Vec<u8>) -> Result<()> {
        let buf = &state.buffer;
        let cols = state.text_cols;
        for y in 0..state.text_rows {
            let file_row = y + buf.row_offset;
            match buf.row(file_row) {
                Some(row) => draw_row(row, buf.col_offset, cols, out),
                None if buf.is_empty() && y == state.text_rows / 2 => draw_banner(cols, out),
                None => out.push(b'~'),
            }
            queue!(out, Clear(ClearType::UntilNewLine))?;
            out.extend_from_slice(b"\r\n");
        }
        Ok(())
    }

    fn draw_status_bar(&self, state: &EditorState, out: &mut Vec<u8>) {
        let name = state.display_name();
        let ctx = StatusContext {
            file_name: &name,
            num_rows: state.buffer.num_rows(),
            modified: state.buffer.is_dirty(),
            file_type: state.buffer.syntax().map(|s| s.name),
            cursor_row: state.buffer.cy,
        };
        let line = format_status(&compose_status(&ctx), state.text_cols);
        out.extend_from_slice(REVERSE_VIDEO);
        out.extend_from_slice(line.as_bytes());
        out.extend_from_slice(RESET_ATTRIBUTES);
        out.extend_from_slice(b"\r\n");
    }

    fn draw_message_bar(&self, state: &EditorState, now: Instant, out: &mut Vec<u8>) -> Result<()> {
        queue!(out, Clear(ClearType::UntilNewLine))?;
        if let Some(text) = state.visible_status(now, self.message_timeout) {
            out.extend_from_slice(format_message(text, state.text_cols).as_bytes());
        }
        Ok(())
    }
}

/// Visible slice `[col_offset, col_offset + cols)` of one row, colored.
fn draw_row(row: &Row, col_offset: usize, cols: usize, out: &mut Vec<u8>) {
    let rendered = row.rendered();
    let start = col_offset.min(rendered.len());
    let end = start + (rendered.len() - start).min(cols);
    let mut color = ColorRun::default();
    for (&byte, &hl) in rendered[start..end].iter().zip(&row.highlight()[start..end]) {
        color.push(out, byte, hl);
    }
    color.finish(out);
}

/// Centered version line shown on an empty buffer.
fn draw_banner(cols: usize, out: &mut Vec<u8>) {
    let banner = format!("quill -- version {VERSION}");
    let banner = format_message(&banner, cols);
    let mut padding = (cols - banner.len()) / 2;
    if padding > 0 {
        out.push(b'~');
        padding -= 1;
    }
    out.extend(std::iter::repeat_n(b' ', padding));
    out.extend_from_slice(banner.as_bytes());
}

fn to_u16(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::TextBuffer;
    use core_text::select_syntax;
    use pretty_assertions::assert_eq;
    use std::path::{Path, PathBuf};

    fn state(lines: &[&str], rows: usize, cols: usize) -> EditorState {
        let buffer = TextBuffer::from_lines(
            lines.iter().map(|l| l.as_bytes()),
            4,
            select_syntax(Path::new("t.c")),
        );
        let mut st = EditorState::new(buffer);
        st.file_name = Some(PathBuf::from("t.c"));
        st.set_terminal_size(rows + 2, cols);
        st
    }

    fn text_rows(frame: &[u8]) -> Vec<String> {
        let s = String::from_utf8_lossy(frame);
        let body = s.strip_prefix("\x1b[?25l\x1b[1;1H").unwrap_or(&s);
        body.split("\r\n").map(str::to_string).collect()
    }

    #[test]
    fn frame_layout() {
        let mut st = state(&["int x;"], 3, 30);
        let frame = RenderEngine::default().render(&mut st, Instant::now()).unwrap();
        let rows = text_rows(&frame);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], "\x1b[32mint\x1b[39m x;\x1b[39m\x1b[K");
        assert_eq!(rows[1], "~\x1b[K");
        assert_eq!(rows[2], "~\x1b[K");
        assert!(rows[3].starts_with("\x1b[7mt.c - 1 lines "));
        assert!(rows[3].ends_with("c | 1/1\x1b[m"));
        assert_eq!(rows[4], "\x1b[K\x1b[1;1H\x1b[?25h");
    }

    #[test]
    fn empty_buffer_shows_banner_on_middle_row() {
        let mut st = EditorState::new(TextBuffer::default());
        st.set_terminal_size(6, 40);
        let frame = RenderEngine::default().render(&mut st, Instant::now()).unwrap();
        let rows = text_rows(&frame);
        assert_eq!(rows[0], "~\x1b[K");
        assert!(rows[2].starts_with("~ "));
        assert!(rows[2].contains("quill -- version"));
        assert_eq!(rows[3], "~\x1b[K");
    }

    #[test]
    fn horizontal_window_clips_rows() {
        let mut st = state(&["abcdefgh"], 1, 4);
        st.buffer.cx = 6;
        let frame = RenderEngine::default().render(&mut st, Instant::now()).unwrap();
        assert_eq!(st.buffer.col_offset, 3);
        assert_eq!(text_rows(&frame)[0], "defg\x1b[39m\x1b[K");
        assert!(String::from_utf8_lossy(&frame).ends_with("\x1b[1;4H\x1b[?25h"));
    }

    #[test]
    fn control_bytes_render_inverse() {
        let mut st = state(&["a\x01b"], 1, 10);
        let frame = RenderEngine::default().render(&mut st, Instant::now()).unwrap();
        assert_eq!(text_rows(&frame)[0], "a\x1b[7mA\x1b[mb\x1b[39m\x1b[K");
    }

    #[test]
    fn message_bar_respects_timeout() {
        let mut st = state(&["x"], 1, 20);
        st.set_status("saved");
        let set_at = st.status.as_ref().unwrap().set_at;
        let engine = RenderEngine::new(Duration::from_secs(5));
        let fresh = engine.compose_frame(&st, set_at).unwrap();
        assert!(String::from_utf8_lossy(&fresh).contains("\x1b[Ksaved"));
        let stale = engine
            .compose_frame(&st, set_at + Duration::from_secs(6))
            .unwrap();
        assert!(!String::from_utf8_lossy(&stale).contains("saved"));
    }

    #[test]
    fn cursor_placed_relative_to_offsets() {
        let lines: Vec<String> = (0..20).map(|i| format!("line {i}")).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut st = state(&refs, 5, 40);
        st.buffer.cy = 12;
        st.buffer.cx = 2;
        let frame = RenderEngine::default().render(&mut st, Instant::now()).unwrap();
        assert_eq!(st.buffer.row_offset, 8);
        let s = String::from_utf8_lossy(&frame);
        assert!(s.starts_with("\x1b[?25l\x1b[1;1Hline \x1b[31m8\x1b[39m"));
        assert!(s.ends_with("\x1b[5;3H\x1b[?25h"));
    }
}
