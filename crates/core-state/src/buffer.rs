//! Ordered rows plus cursor, scroll and dirty bookkeeping.
//!
//! Every mutation leaves the rows it touched fully derived: `rendered`,
//! `highlight` and `open_comment` are consistent before the call returns,
//! including any forward comment cascade. Out of range arguments clamp or do
//! nothing; nothing here fails.
//!
//! `cy` ranges over `0..=num_rows()`; `cy == num_rows()` is the virtual append
//! row below the last line.

use core_text::{DEFAULT_TAB_STOP, Row, SyntaxRule, highlight_line};
use tracing::{debug, trace};

#[derive(Debug, Clone)]
pub struct TextBuffer {
    rows: Vec<Row>,
    /// Cursor character column.
    pub cx: usize,
    /// Cursor row.
    pub cy: usize,
    /// Cursor render column, derived from `cx` by the viewport before each frame.
    pub rx: usize,
    pub row_offset: usize,
    pub col_offset: usize,
    dirty: usize,
    syntax: Option<&'static SyntaxRule>,
    tab_stop: usize,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_STOP)
    }
}

impl TextBuffer {
    pub fn new(tab_stop: usize) -> Self {
        Self {
            rows: Vec::new(),
            cx: 0,
            cy: 0,
            rx: 0,
            row_offset: 0,
            col_offset: 0,
            dirty: 0,
            syntax: None,
            tab_stop: tab_stop.max(1),
        }
    }

    /// Build a clean buffer from already split lines.
    pub fn from_lines<I, L>(lines: I, tab_stop: usize, syntax: Option<&'static SyntaxRule>) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        let mut buf = Self::new(tab_stop);
        buf.syntax = syntax;
        for line in lines {
            let at = buf.rows.len();
            buf.insert_row(at, line);
        }
        buf.dirty = 0;
        buf
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[inline]
    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    /// Mutable row access for highlight overlays. Text edits made through the
    /// row re-derive its rendered form but skip the buffer's highlight pass and
    /// dirty count; use the buffer's edit operations for those.
    #[inline]
    pub fn row_mut(&mut self, at: usize) -> Option<&mut Row> {
        self.rows.get_mut(at)
    }

    /// Raw bytes of every row, in order.
    pub fn lines(&self) -> impl Iterator<Item = &[u8]> {
        self.rows.iter().map(Row::chars)
    }

    #[inline]
    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    #[inline]
    pub fn dirty(&self) -> usize {
        self.dirty
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    pub fn mark_clean(&mut self) {
        self.dirty = 0;
    }

    #[inline]
    pub fn syntax(&self) -> Option<&'static SyntaxRule> {
        self.syntax
    }

    /// Switch the active rule and rehighlight the whole buffer.
    pub fn set_syntax(&mut self, syntax: Option<&'static SyntaxRule>) {
        self.syntax = syntax;
        let mut open = false;
        for row in &mut self.rows {
            let hl = highlight_line(row.rendered(), syntax, open);
            open = hl.open_comment;
            row.apply_highlight(hl.classes, hl.open_comment);
        }
        debug!(
            target: "state.buffer",
            syntax = syntax.map(|s| s.name),
            rows = self.rows.len(),
            "syntax_changed"
        );
    }

    /// Highlight row `at`, then keep walking forward while a row's trailing
    /// comment state changed. Returns the number of rows scanned.
    pub fn rehighlight_from(&mut self, at: usize) -> usize {
        let mut scanned = 0;
        let mut i = at;
        while i < self.rows.len() {
            let open_at_start = i > 0 && self.rows[i - 1].open_comment();
            let hl = highlight_line(self.rows[i].rendered(), self.syntax, open_at_start);
            scanned += 1;
            if !self.rows[i].apply_highlight(hl.classes, hl.open_comment) {
                break;
            }
            i += 1;
        }
        if scanned > 1 {
            debug!(target: "text.highlight", from = at, rows = scanned, "comment_cascade");
        }
        scanned
    }

    /// Rehighlight row `at` after its bytes changed.
    fn update_row(&mut self, at: usize) {
        if at < self.rows.len() {
            self.rehighlight_from(at);
        }
    }

    fn renumber_from(&mut self, at: usize) {
        for (i, row) in self.rows.iter_mut().enumerate().skip(at) {
            row.set_index(i);
        }
    }

    /// Insert a row holding `text` at position `at` (`0..=num_rows()`).
    pub fn insert_row(&mut self, at: usize, text: impl Into<Vec<u8>>) {
        if at > self.rows.len() {
            return;
        }
        let mut row = Row::new(at, text, self.tab_stop);
        // The row that used to follow the predecessor was highlighted against the
        // predecessor's state; seed with it so the cascade sees a real change.
        let predecessor_open = at > 0 && self.rows[at - 1].open_comment();
        row.set_open_comment(predecessor_open);
        self.rows.insert(at, row);
        self.renumber_from(at + 1);
        self.rehighlight_from(at);
        self.dirty += 1;
        trace!(target: "state.buffer", at, rows = self.rows.len(), "insert_row");
    }

    /// Remove row `at`.
    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        let removed = self.rows.remove(at);
        self.renumber_from(at);
        self.dirty += 1;
        let predecessor_open = at > 0 && self.rows[at - 1].open_comment();
        if removed.open_comment() != predecessor_open {
            self.rehighlight_from(at);
        }
        trace!(target: "state.buffer", at, rows = self.rows.len(), "delete_row");
    }

    /// Insert one byte into row `row` at `col` (clamped to the row length).
    pub fn row_insert_char(&mut self, row: usize, col: usize, byte: u8) {
        let tab_stop = self.tab_stop;
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        r.insert_byte(col, byte, tab_stop);
        self.update_row(row);
        self.dirty += 1;
    }

    /// Remove the byte at `col` of row `row`.
    pub fn row_delete_char(&mut self, row: usize, col: usize) {
        let tab_stop = self.tab_stop;
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        if r.remove_byte(col, tab_stop) {
            self.update_row(row);
            self.dirty += 1;
        }
    }

    /// Concatenate `suffix` onto row `row`.
    pub fn append_string(&mut self, row: usize, suffix: &[u8]) {
        let tab_stop = self.tab_stop;
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        r.append(suffix, tab_stop);
        self.update_row(row);
        self.dirty += 1;
    }

    /// Insert `byte` at the cursor and advance it. On the virtual append row an
    /// empty row is created first.
    pub fn insert_char(&mut self, byte: u8) {
        if self.cy == self.rows.len() {
            self.insert_row(self.rows.len(), Vec::new());
        }
        self.cx = self.cx.min(self.rows[self.cy].len());
        self.row_insert_char(self.cy, self.cx, byte);
        self.cx += 1;
    }

    /// Backspace at the cursor. At column 0 the row is merged onto the previous
    /// one and the cursor lands at the previous row's former end.
    pub fn delete_char(&mut self) {
        if self.cy >= self.rows.len() || (self.cx == 0 && self.cy == 0) {
            return;
        }
        if self.cx > 0 {
            let col = self.cx.min(self.rows[self.cy].len());
            if col > 0 {
                self.row_delete_char(self.cy, col - 1);
            }
            self.cx = col.saturating_sub(1);
            return;
        }
        let prev = self.cy - 1;
        let tail = self.rows[self.cy].chars().to_vec();
        self.cx = self.rows[prev].len();
        self.append_string(prev, &tail);
        self.delete_row(self.cy);
        self.cy = prev;
        trace!(target: "state.buffer", row = prev, col = self.cx, "merge_rows");
    }

    /// Break the cursor row at the cursor column and move to the start of the
    /// new row. At column 0 an empty row is inserted above instead.
    pub fn split_line(&mut self) {
        if self.cy >= self.rows.len() || self.cx == 0 {
            self.insert_row(self.cy.min(self.rows.len()), Vec::new());
        } else {
            let col = self.cx.min(self.rows[self.cy].len());
            let suffix = self.rows[self.cy].chars()[col..].to_vec();
            // Insert the suffix first so it is seeded from the row's old state.
            self.insert_row(self.cy + 1, suffix);
            self.rows[self.cy].split_off(col, self.tab_stop);
            self.update_row(self.cy);
            self.dirty += 1;
        }
        self.cy += 1;
        self.cx = 0;
    }
}
