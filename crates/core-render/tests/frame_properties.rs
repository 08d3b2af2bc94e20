//! Frame shape holds for arbitrary buffers, cursors and terminal sizes.

use core_render::RenderEngine;
use core_state::{EditorState, TextBuffer};
use core_text::select_syntax;
use proptest::prelude::*;
use std::path::Path;
use std::time::Instant;

fn visible_width(row: &str) -> usize {
    // Strip CSI sequences; what remains is one terminal cell per byte.
    let mut n = 0;
    let mut chars = row.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            n += 1;
        }
    }
    n
}

proptest! {
    #[test]
    fn frame_has_one_line_per_screen_row(
        lines in prop::collection::vec("[ -~\t]{0,50}", 0..40),
        cy in 0usize..45,
        cx in 0usize..60,
        rows in 3usize..30,
        cols in 1usize..60,
    ) {
        let buffer = TextBuffer::from_lines(lines.iter().map(|l| l.as_bytes()), 4, select_syntax(Path::new("p.c")));
        let mut st = EditorState::new(buffer);
        st.set_terminal_size(rows, cols);
        st.buffer.cy = cy.min(st.buffer.num_rows());
        st.buffer.cx = st.buffer.row(st.buffer.cy).map_or(0, |r| cx.min(r.len()));

        let frame = RenderEngine::default().render(&mut st, Instant::now()).unwrap();
        let text = String::from_utf8(frame).unwrap();
        let screen: Vec<&str> = text.split("\r\n").collect();
        prop_assert_eq!(screen.len(), rows);

        let buf = &st.buffer;
        prop_assert!(buf.cy >= buf.row_offset && buf.cy < buf.row_offset + st.text_rows);
        prop_assert!(buf.rx >= buf.col_offset && buf.rx < buf.col_offset + cols);
        for line in &screen[..st.text_rows] {
            prop_assert!(visible_width(line) <= cols);
        }
    }
}
