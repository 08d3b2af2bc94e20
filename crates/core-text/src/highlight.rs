//! Single-row highlight scan.
//!
//! `highlight_line` classifies every rendered byte of one row in a single
//! left-to-right pass. The only state that crosses rows is whether a block
//! comment is open; the caller seeds it from the previous row and compares the
//! returned value with the row's stored flag to decide whether the next row must
//! be rescanned.
//!
//! Each iteration advances by at least one byte, or by a full delimiter /
//! keyword length on a match, so the scan is `O(row length)`.

use crate::syntax::{Keyword, KeywordClass, SyntaxFlags, SyntaxRule};

/// Per-byte classification of rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Highlight {
    #[default]
    Normal,
    LineComment,
    BlockComment,
    KeywordPrimary,
    KeywordSecondary,
    String,
    Number,
    SearchMatch,
}

impl From<KeywordClass> for Highlight {
    fn from(class: KeywordClass) -> Self {
        match class {
            KeywordClass::Primary => Highlight::KeywordPrimary,
            KeywordClass::Secondary => Highlight::KeywordSecondary,
        }
    }
}

/// Result of scanning one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineHighlight {
    pub classes: Vec<Highlight>,
    /// Block comment still open after the last byte.
    pub open_comment: bool,
}

/// Whitespace, NUL, or one of `,.()+-/*=~%<>[];`.
#[inline]
pub fn is_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r' | 0) || b",.()+-/*=~%<>[];".contains(&b)
}

/// First keyword (in table order) that starts `rest` and is followed by a
/// separator or the end of the row.
fn match_keyword<'k>(rest: &[u8], keywords: &'k [Keyword]) -> Option<&'k Keyword> {
    keywords.iter().find(|kw| {
        let text = kw.text.as_bytes();
        !text.is_empty()
            && rest.starts_with(text)
            && rest.get(text.len()).is_none_or(|&b| is_separator(b))
    })
}

/// Classify `text` (a row's rendered bytes). `open_at_start` is the previous
/// row's open-comment state. Without a syntax rule everything is `Normal` and
/// no comment is ever open.
pub fn highlight_line(
    text: &[u8],
    syntax: Option<&SyntaxRule>,
    open_at_start: bool,
) -> LineHighlight {
    let mut classes = vec![Highlight::Normal; text.len()];
    let Some(syntax) = syntax else {
        return LineHighlight {
            classes,
            open_comment: false,
        };
    };

    let line_comment = syntax.line_comment.as_bytes();
    let block_start = syntax.block_comment_start.as_bytes();
    let block_end = syntax.block_comment_end.as_bytes();
    let block_enabled = syntax.has_block_comments();
    let numbers = syntax.flags.contains(SyntaxFlags::HIGHLIGHT_NUMBERS);
    let strings = syntax.flags.contains(SyntaxFlags::HIGHLIGHT_STRINGS);

    let mut prev_sep = true;
    let mut in_string: Option<u8> = None;
    let mut in_comment = open_at_start && block_enabled;

    let mut i = 0;
    while i < text.len() {
        let c = text[i];
        let rest = &text[i..];
        let prev_class = if i > 0 { classes[i - 1] } else { Highlight::Normal };

        if !line_comment.is_empty()
            && in_string.is_none()
            && !in_comment
            && rest.starts_with(line_comment)
        {
            classes[i..].fill(Highlight::LineComment);
            break;
        }

        if block_enabled && in_string.is_none() {
            if in_comment {
                classes[i] = Highlight::BlockComment;
                if rest.starts_with(block_end) {
                    classes[i..i + block_end.len()].fill(Highlight::BlockComment);
                    i += block_end.len();
                    in_comment = false;
                    prev_sep = true;
                } else {
                    i += 1;
                }
                continue;
            }
            if rest.starts_with(block_start) {
                classes[i..i + block_start.len()].fill(Highlight::BlockComment);
                i += block_start.len();
                in_comment = true;
                continue;
            }
        }

        if strings {
            if let Some(quote) = in_string {
                classes[i] = Highlight::String;
                if c == b'\\' && i + 1 < text.len() {
                    classes[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            }
            if c == b'"' || c == b'\'' {
                in_string = Some(c);
                classes[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if numbers
            && ((c.is_ascii_digit() && (prev_sep || prev_class == Highlight::Number))
                || (c == b'.' && prev_class == Highlight::Number))
        {
            classes[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep && let Some(kw) = match_keyword(rest, syntax.keywords) {
            let len = kw.text.len();
            classes[i..i + len].fill(kw.class.into());
            i += len;
            prev_sep = false;
            continue;
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    LineHighlight {
        classes,
        open_comment: in_comment,
    }
}
