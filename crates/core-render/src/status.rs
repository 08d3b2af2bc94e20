//! Status and message bar composition.
//!
//! `compose_status` produces the two halves of the status line; `format_status`
//! fits them to the terminal width. The right half is placed only when it can
//! end exactly at the last column, otherwise the line is padded with spaces.

/// What the status line needs to know.
#[derive(Debug, Clone, Copy)]
pub struct StatusContext<'a> {
    pub file_name: &'a str,
    pub num_rows: usize,
    pub modified: bool,
    pub file_type: Option<&'a str>,
    /// 0-based cursor row.
    pub cursor_row: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSegments {
    pub left: String,
    pub right: String,
}

/// Longest file name prefix shown, in bytes.
pub const FILE_NAME_WIDTH: usize = 20;

pub fn compose_status(ctx: &StatusContext<'_>) -> StatusSegments {
    let name = truncate_str(ctx.file_name, FILE_NAME_WIDTH);
    let left = format!(
        "{} - {} lines {}",
        name,
        ctx.num_rows,
        if ctx.modified { "(modified)" } else { "" }
    );
    let right = format!(
        "{} | {}/{}",
        ctx.file_type.unwrap_or("no ft"),
        ctx.cursor_row + 1,
        ctx.num_rows
    );
    StatusSegments { left, right }
}

/// Exactly `cols` bytes: the left half (clipped), spaces, then the right half
/// when it fits.
pub fn format_status(segments: &StatusSegments, cols: usize) -> String {
    let mut s = truncate_str(&segments.left, cols).to_string();
    let right_len = segments.right.len();
    while s.len() < cols {
        if cols - s.len() == right_len {
            s.push_str(&segments.right);
            break;
        }
        s.push(' ');
    }
    s
}

/// Message bar text clipped to `cols`.
pub fn format_message(text: &str, cols: usize) -> &str {
    truncate_str(text, cols)
}

/// Longest prefix of `s` that is at most `max` bytes and ends on a char boundary.
pub fn truncate_str(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
