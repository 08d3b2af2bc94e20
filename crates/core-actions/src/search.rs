//! Incremental search.
//!
//! Driven by the search prompt: every keystroke (including the final Enter or
//! Esc) is fed to [`SearchController::on_key`] together with the current query.
//! Arrow keys step to the next or previous match, any other key restarts the
//! search from the top. The matched span is painted with `SearchMatch` and the
//! row's previous highlight is put back on the next keystroke.

use core_events::{KeyCode, KeyEvent};
use core_state::TextBuffer;
use core_text::Highlight;

/// Cursor and scroll position captured when the search started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SavedView {
    cx: usize,
    cy: usize,
    row_offset: usize,
    col_offset: usize,
}

#[derive(Debug, Clone)]
pub struct SearchController {
    last_match: Option<usize>,
    forward: bool,
    saved_hl: Option<(usize, Vec<Highlight>)>,
    saved_view: SavedView,
}

impl SearchController {
    pub fn begin(buf: &TextBuffer) -> Self {
        Self {
            last_match: None,
            forward: true,
            saved_hl: None,
            saved_view: SavedView {
                cx: buf.cx,
                cy: buf.cy,
                row_offset: buf.row_offset,
                col_offset: buf.col_offset,
            },
        }
    }

    pub fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    /// React to one prompt keystroke with the query as it now reads.
    pub fn on_key(&mut self, buf: &mut TextBuffer, query: &str, key: &KeyEvent) {
        self.restore_highlight(buf);

        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                self.last_match = None;
                self.forward = true;
                return;
            }
            code if code.is_arrow() => {
                self.forward = matches!(code, KeyCode::Right | KeyCode::Down);
            }
            _ => {
                self.last_match = None;
                self.forward = true;
            }
        }
        if self.last_match.is_none() {
            self.forward = true;
        }
        if query.is_empty() {
            return;
        }
        self.step(buf, query.as_bytes());
    }

    /// Put the cursor and scroll offsets back where they were at `begin`.
    pub fn cancel(&mut self, buf: &mut TextBuffer) {
        self.restore_highlight(buf);
        let v = self.saved_view;
        buf.cx = v.cx;
        buf.cy = v.cy;
        buf.row_offset = v.row_offset;
        buf.col_offset = v.col_offset;
    }

    fn restore_highlight(&mut self, buf: &mut TextBuffer) {
        if let Some((row, saved)) = self.saved_hl.take()
            && let Some(r) = buf.row_mut(row)
        {
            r.restore_highlight(saved);
        }
    }

    /// Scan every row once, wrapping, starting after the last match.
    fn step(&mut self, buf: &mut TextBuffer, needle: &[u8]) {
        let n = buf.num_rows();
        if n == 0 {
            return;
        }
        let tab_stop = buf.tab_stop();
        let mut current = self.last_match;
        for _ in 0..n {
            let next = match (current, self.forward) {
                (None, _) => 0,
                (Some(i), true) => (i + 1) % n,
                (Some(0), false) => n - 1,
                (Some(i), false) => i - 1,
            };
            current = Some(next);
            let Some(row) = buf.row_mut(next) else {
                continue;
            };
            let Some(at) = find_bytes(row.rendered(), needle) else {
                continue;
            };
            let cx = row.rx_to_cx(at, tab_stop);
            self.saved_hl = Some((next, row.highlight().to_vec()));
            row.overlay(at, needle.len(), Highlight::SearchMatch);
            self.last_match = Some(next);
            buf.cx = cx;
            buf.cy = next;
            // Past the end so the next scroll puts the match at the top.
            buf.row_offset = n;
            tracing::trace!(target: "actions.search", row = next, col = buf.cx, "search_hit");
            return;
        }
    }
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
