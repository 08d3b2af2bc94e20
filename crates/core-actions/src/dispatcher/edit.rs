//! Text edit action handling (insert/backspace/delete/newline).
//!
//! Rows hold raw bytes, so a typed character is inserted one encoded byte at a
//! time and the cursor ends up after its last byte.

use super::DispatchResult;
use super::motion::move_cursor;
use crate::{EditKind, MotionKind};
use core_state::EditorState;

pub(crate) fn handle_edit(kind: EditKind, state: &mut EditorState) -> DispatchResult {
    let buf = &mut state.buffer;
    let before = (buf.cy, buf.cx);
    match kind {
        EditKind::InsertChar(c) => {
            let mut encoded = [0u8; 4];
            for &byte in c.encode_utf8(&mut encoded).as_bytes() {
                buf.insert_char(byte);
            }
        }
        EditKind::InsertNewline => buf.split_line(),
        EditKind::Backspace => buf.delete_char(),
        EditKind::DeleteForward => {
            let pos_before = (buf.cy, buf.cx);
            move_cursor(buf, MotionKind::Right);
            // Nothing to the right of the virtual row.
            if (buf.cy, buf.cx) != pos_before {
                buf.delete_char();
            }
        }
    }
    tracing::trace!(
        target: "actions.dispatch",
        ?kind,
        line = before.0,
        col = before.1,
        to_line = buf.cy,
        to_col = buf.cx,
        "edit"
    );
    DispatchResult::dirty()
}
