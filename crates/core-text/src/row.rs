//! A single buffer line in its two representations.
//!
//! `chars` is the source of truth (what gets saved). `rendered` is derived from
//! it by expanding tabs to the next tab stop, and `highlight` carries exactly one
//! classification per rendered byte.
//!
//! Invariants (hold whenever a row is observed outside a mutation helper):
//! * `highlight.len() == rendered.len()`.
//! * `rendered` reflects the current `chars` (derivation is eager, never lazy).
//! * `open_comment` records whether a block comment is still open after this row.
//!
//! Column spaces:
//! * character column (`cx`): byte offset into `chars`.
//! * render column (`rx`): byte offset into `rendered` (tabs expanded).

use crate::highlight::Highlight;

/// Tab stop used when no configuration overrides it.
pub const DEFAULT_TAB_STOP: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    index: usize,
    chars: Vec<u8>,
    rendered: Vec<u8>,
    highlight: Vec<Highlight>,
    open_comment: bool,
}

impl Row {
    /// Build a row and derive its rendered form. Highlight is all `Normal`
    /// until the owning buffer runs a highlight pass.
    pub fn new(index: usize, chars: impl Into<Vec<u8>>, tab_stop: usize) -> Self {
        let mut row = Self {
            index,
            chars: chars.into(),
            ..Self::default()
        };
        row.derive_render(tab_stop);
        row
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    #[inline]
    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    #[inline]
    pub fn rendered(&self) -> &[u8] {
        &self.rendered
    }

    #[inline]
    pub fn highlight(&self) -> &[Highlight] {
        &self.highlight
    }

    /// Number of raw bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[inline]
    pub fn rendered_len(&self) -> usize {
        self.rendered.len()
    }

    #[inline]
    pub fn open_comment(&self) -> bool {
        self.open_comment
    }

    /// Seed the open-comment flag without running a highlight pass. Used when a
    /// row is inserted so the cascade compares against the state its successor
    /// was last highlighted with.
    pub fn set_open_comment(&mut self, open: bool) {
        self.open_comment = open;
    }

    // Text mutators re-derive `rendered` before returning; the highlight is
    // reset to `Normal` until the owning buffer runs its pass.

    /// Insert one byte at `at`, clamped to the row length.
    pub fn insert_byte(&mut self, at: usize, byte: u8, tab_stop: usize) {
        let at = at.min(self.chars.len());
        self.chars.insert(at, byte);
        self.derive_render(tab_stop);
    }

    /// Remove the byte at `at`. Returns false when `at` is out of range.
    pub fn remove_byte(&mut self, at: usize, tab_stop: usize) -> bool {
        if at >= self.chars.len() {
            return false;
        }
        self.chars.remove(at);
        self.derive_render(tab_stop);
        true
    }

    pub fn append(&mut self, suffix: &[u8], tab_stop: usize) {
        self.chars.extend_from_slice(suffix);
        self.derive_render(tab_stop);
    }

    /// Split the raw bytes at `at` (clamped), keeping the prefix and returning the suffix.
    pub fn split_off(&mut self, at: usize, tab_stop: usize) -> Vec<u8> {
        let at = at.min(self.chars.len());
        let suffix = self.chars.split_off(at);
        self.derive_render(tab_stop);
        suffix
    }

    /// Rebuild `rendered` from `chars`. Highlight is reset to `Normal` with the
    /// matching length so the length invariant holds even before the next pass.
    fn derive_render(&mut self, tab_stop: usize) {
        let tab_stop = tab_stop.max(1);
        self.rendered.clear();
        for &b in &self.chars {
            if b == b'\t' {
                self.rendered.push(b' ');
                while self.rendered.len() % tab_stop != 0 {
                    self.rendered.push(b' ');
                }
            } else {
                self.rendered.push(b);
            }
        }
        self.highlight.clear();
        self.highlight.resize(self.rendered.len(), Highlight::Normal);
    }

    /// Install a freshly computed highlight. Returns true when the
    /// open-comment state after this row changed.
    pub fn apply_highlight(&mut self, highlight: Vec<Highlight>, open_comment: bool) -> bool {
        debug_assert_eq!(highlight.len(), self.rendered.len(), "one class per rendered byte");
        self.highlight = highlight;
        let changed = self.open_comment != open_comment;
        self.open_comment = open_comment;
        changed
    }

    /// Paint `class` over `[start, start + len)` of the rendered text (clamped).
    pub fn overlay(&mut self, start: usize, len: usize, class: Highlight) {
        let start = start.min(self.highlight.len());
        let end = start.saturating_add(len).min(self.highlight.len());
        self.highlight[start..end].fill(class);
    }

    /// Put back a highlight captured before an overlay. Ignored when the row was
    /// re-derived in between and the lengths no longer agree.
    pub fn restore_highlight(&mut self, saved: Vec<Highlight>) {
        if saved.len() == self.highlight.len() {
            self.highlight = saved;
        }
    }

    /// Map a character column to a render column.
    pub fn cx_to_rx(&self, cx: usize, tab_stop: usize) -> usize {
        let tab_stop = tab_stop.max(1);
        let mut rx = 0;
        for &b in self.chars.iter().take(cx) {
            if b == b'\t' {
                rx += (tab_stop - 1) - (rx % tab_stop);
            }
            rx += 1;
        }
        rx
    }

    /// Map a render column back to the character column that covers it. A render
    /// column past the end maps to the row length.
    pub fn rx_to_cx(&self, rx: usize, tab_stop: usize) -> usize {
        let tab_stop = tab_stop.max(1);
        let mut cur_rx = 0;
        for (cx, &b) in self.chars.iter().enumerate() {
            if b == b'\t' {
                cur_rx += (tab_stop - 1) - (cur_rx % tab_stop);
            }
            cur_rx += 1;
            if cur_rx > rx {
                return cx;
            }
        }
        self.chars.len()
    }
}
