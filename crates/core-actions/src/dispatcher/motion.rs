//! Motion sub-dispatch (cursor movement).
//!
//! Left and right wrap across rows. After any motion the column is clamped to
//! the length of the row the cursor landed on (zero on the virtual append row).

use super::DispatchResult;
use crate::MotionKind;
use core_state::{EditorState, TextBuffer};

pub(crate) fn handle_motion(kind: MotionKind, state: &mut EditorState) -> DispatchResult {
    let screen_rows = state.text_rows;
    let buf = &mut state.buffer;
    let before = (buf.cy, buf.cx);
    match kind {
        MotionKind::Left | MotionKind::Right | MotionKind::Up | MotionKind::Down => {
            move_cursor(buf, kind)
        }
        MotionKind::LineStart => buf.cx = 0,
        MotionKind::LineEnd => {
            if let Some(row) = buf.row(buf.cy) {
                buf.cx = row.len();
            }
        }
        MotionKind::PageUp | MotionKind::PageDown => page(buf, kind, screen_rows),
    }
    tracing::trace!(
        target: "actions.dispatch",
        ?kind,
        from_row = before.0,
        from_col = before.1,
        to_row = buf.cy,
        to_col = buf.cx,
        "motion"
    );
    DispatchResult::dirty()
}

pub(crate) fn move_cursor(buf: &mut TextBuffer, kind: MotionKind) {
    let row_len = buf.row(buf.cy).map(|r| r.len());
    match kind {
        MotionKind::Left => {
            if buf.cx > 0 {
                buf.cx -= 1;
            } else if buf.cy > 0 {
                buf.cy -= 1;
                buf.cx = buf.row(buf.cy).map_or(0, |r| r.len());
            }
        }
        MotionKind::Right => match row_len {
            Some(len) if buf.cx < len => buf.cx += 1,
            Some(_) => {
                buf.cy += 1;
                buf.cx = 0;
            }
            None => {}
        },
        MotionKind::Up => buf.cy = buf.cy.saturating_sub(1),
        MotionKind::Down => {
            if buf.cy < buf.num_rows() {
                buf.cy += 1;
            }
        }
        _ => {}
    }
    let len = buf.row(buf.cy).map_or(0, |r| r.len());
    buf.cx = buf.cx.min(len);
}

/// Jump to the top (or bottom) screen row, then move a full screen further.
fn page(buf: &mut TextBuffer, kind: MotionKind, screen_rows: usize) {
    let step = if kind == MotionKind::PageUp {
        buf.cy = buf.row_offset;
        MotionKind::Up
    } else {
        buf.cy = (buf.row_offset + screen_rows)
            .saturating_sub(1)
            .min(buf.num_rows());
        MotionKind::Down
    };
    for _ in 0..screen_rows {
        move_cursor(buf, step);
    }
}
