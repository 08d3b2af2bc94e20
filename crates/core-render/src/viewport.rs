//! Scroll offsets that keep the cursor on screen.
//!
//! Minimal motion: an offset only moves when the cursor falls outside
//! `[offset, offset + extent)`, and then only as far as needed to bring it back
//! to the nearest edge.

use core_state::TextBuffer;
use tracing::trace;

/// New offset for one axis, or `None` when the cursor is already visible.
/// A zero extent never scrolls.
pub fn compute_scroll_offset(offset: usize, cursor: usize, extent: usize) -> Option<usize> {
    if extent == 0 {
        return None;
    }
    if cursor < offset {
        Some(cursor)
    } else if cursor >= offset + extent {
        Some(cursor + 1 - extent)
    } else {
        None
    }
}

/// Refresh the render column from the cursor and clamp both offsets so the
/// cursor stays within a `rows` x `cols` text area. Returns true when either
/// offset moved.
pub fn scroll_into_view(buf: &mut TextBuffer, rows: usize, cols: usize) -> bool {
    let tab_stop = buf.tab_stop();
    buf.rx = buf.row(buf.cy).map_or(0, |row| row.cx_to_rx(buf.cx, tab_stop));

    let mut moved = false;
    if let Some(first) = compute_scroll_offset(buf.row_offset, buf.cy, rows) {
        buf.row_offset = first;
        moved = true;
    }
    if let Some(first) = compute_scroll_offset(buf.col_offset, buf.rx, cols) {
        buf.col_offset = first;
        moved = true;
    }
    if moved {
        trace!(
            target: "render",
            row_offset = buf.row_offset,
            col_offset = buf.col_offset,
            "viewport_scrolled"
        );
    }
    moved
}
