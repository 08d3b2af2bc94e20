//! Line terminator detection for loaded files.
//!
//! Rows never hold terminators. Loading strips them and records the dominant
//! style plus whether the file ended with one, so saving can put them back.

/// Line ending style detected from source bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    Cr,
    Crlf,
}

impl LineEnding {
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            LineEnding::Lf => b"\n",
            LineEnding::Cr => b"\r",
            LineEnding::Crlf => b"\r\n",
        }
    }
}

/// Result of splitting raw file bytes into rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitLines {
    pub lines: Vec<Vec<u8>>,
    /// Majority style.
    pub original: LineEnding,
    pub had_trailing_newline: bool,
    /// More than one style was seen.
    pub mixed: bool,
}

/// Split `input` on CRLF, LF and lone CR. The majority style wins, ties resolved
/// by precedence CRLF > LF > CR.
pub fn split_lines(input: &[u8]) -> SplitLines {
    let mut lines = Vec::new();
    let (mut crlf, mut lf, mut cr) = (0usize, 0usize, 0usize);
    let mut start = 0usize;
    let mut i = 0usize;
    while i < input.len() {
        let terminator_len = match input[i] {
            b'\r' if input.get(i + 1) == Some(&b'\n') => {
                crlf += 1;
                2
            }
            b'\r' => {
                cr += 1;
                1
            }
            b'\n' => {
                lf += 1;
                1
            }
            _ => {
                i += 1;
                continue;
            }
        };
        lines.push(input[start..i].to_vec());
        i += terminator_len;
        start = i;
    }
    let had_trailing_newline = start == input.len() && !input.is_empty();
    if start < input.len() {
        lines.push(input[start..].to_vec());
    }

    let mut original = LineEnding::Lf;
    let mut max = 0usize;
    for (style, count) in [
        (LineEnding::Crlf, crlf),
        (LineEnding::Lf, lf),
        (LineEnding::Cr, cr),
    ] {
        if count > max {
            max = count;
            original = style;
        }
    }
    let mixed = [crlf, lf, cr].iter().filter(|c| **c > 0).count() > 1;
    SplitLines {
        lines,
        original,
        had_trailing_newline,
        mixed,
    }
}

/// Inverse of [`split_lines`] for uniformly terminated input.
pub fn join_lines<'a, I>(lines: I, ending: LineEnding, trailing_newline: bool) -> Vec<u8>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut out = Vec::new();
    let mut first = true;
    for line in lines {
        if !first {
            out.extend_from_slice(ending.as_bytes());
        }
        out.extend_from_slice(line);
        first = false;
    }
    if trailing_newline && !first {
        out.extend_from_slice(ending.as_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines_of(s: &SplitLines) -> Vec<&str> {
        s.lines
            .iter()
            .map(|l| std::str::from_utf8(l).unwrap())
            .collect()
    }

    #[test]
    fn split_crlf() {
        let s = split_lines(b"a\r\nb\r\n");
        assert_eq!(lines_of(&s), vec!["a", "b"]);
        assert_eq!(s.original, LineEnding::Crlf);
        assert!(s.had_trailing_newline);
        assert!(!s.mixed);
    }

    #[test]
    fn split_cr() {
        let s = split_lines(b"a\rb\r");
        assert_eq!(lines_of(&s), vec!["a", "b"]);
        assert_eq!(s.original, LineEnding::Cr);
    }

    #[test]
    fn split_mixed_majority() {
        let s = split_lines(b"a\r\nb\nc\r\n");
        assert_eq!(lines_of(&s), vec!["a", "b", "c"]);
        assert_eq!(s.original, LineEnding::Crlf);
        assert!(s.mixed);
    }

    #[test]
    fn trailing_newline_absent() {
        let s = split_lines(b"a\nb");
        assert_eq!(lines_of(&s), vec!["a", "b"]);
        assert!(!s.had_trailing_newline);
    }

    #[test]
    fn blank_lines_survive() {
        let s = split_lines(b"\n\nx\n");
        assert_eq!(lines_of(&s), vec!["", "", "x"]);
    }

    #[test]
    fn empty_input_has_no_rows() {
        let s = split_lines(b"");
        assert!(s.lines.is_empty());
        assert!(!s.had_trailing_newline);
        assert!(join_lines(Vec::<&[u8]>::new(), LineEnding::Lf, true).is_empty());
    }

    #[test]
    fn round_trip_uniform_endings() {
        let samples: [&[u8]; 5] = [
            b"simple\nline",
            b"line\r\nline2\r\n",
            b"a\rb\r",
            b"\tint x;\n\n}\n",
            b"\xff\xfe raw\n",
        ];
        for src in samples {
            let s = split_lines(src);
            let rebuilt = join_lines(
                s.lines.iter().map(Vec::as_slice),
                s.original,
                s.had_trailing_newline,
            );
            assert_eq!(rebuilt, src);
        }
    }
}
