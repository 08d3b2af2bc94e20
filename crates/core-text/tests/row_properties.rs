//! Property tests for tab mapping and highlight length.

use core_text::{Row, highlight_line, select_syntax};
use proptest::prelude::*;
use std::path::Path;

fn line_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop_oneof![
            Just(b'\t'),
            Just(b' '),
            Just(b'/'),
            Just(b'*'),
            Just(b'"'),
            Just(b'\\'),
            Just(b'.'),
            b'0'..=b'9',
            b'a'..=b'z',
        ],
        0..64,
    )
}

proptest! {
    #[test]
    fn rx_to_cx_inverts_cx_to_rx(chars in line_bytes(), tab_stop in 1usize..9) {
        let row = Row::new(0, chars, tab_stop);
        for cx in 0..=row.len() {
            let rx = row.cx_to_rx(cx, tab_stop);
            prop_assert_eq!(row.rx_to_cx(rx, tab_stop), cx);
        }
    }

    #[test]
    fn end_of_row_maps_to_rendered_len(chars in line_bytes(), tab_stop in 1usize..9) {
        let row = Row::new(0, chars, tab_stop);
        prop_assert_eq!(row.cx_to_rx(row.len(), tab_stop), row.rendered_len());
    }

    #[test]
    fn highlight_covers_every_rendered_byte(chars in line_bytes(), open in any::<bool>()) {
        let row = Row::new(0, chars, 4);
        let rule = select_syntax(Path::new("x.c"));
        let hl = highlight_line(row.rendered(), rule, open);
        prop_assert_eq!(hl.classes.len(), row.rendered_len());
    }
}
