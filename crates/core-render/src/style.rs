//! Highlight class to terminal color mapping and minimal-escape emission.
//!
//! Colors are plain SGR foreground codes. `ColorRun` remembers the color last
//! emitted within a row so an escape is written only when it changes.

use core_text::Highlight;

pub const REVERSE_VIDEO: &[u8] = b"\x1b[7m";
pub const RESET_ATTRIBUTES: &[u8] = b"\x1b[m";
pub const DEFAULT_FOREGROUND: &[u8] = b"\x1b[39m";

/// SGR foreground code for a highlight class. `None` means the terminal default.
pub fn color_code(hl: Highlight) -> Option<u8> {
    match hl {
        Highlight::Normal => None,
        Highlight::LineComment | Highlight::BlockComment => Some(36),
        Highlight::KeywordPrimary => Some(33),
        Highlight::KeywordSecondary => Some(32),
        Highlight::String => Some(35),
        Highlight::Number => Some(31),
        Highlight::SearchMatch => Some(34),
    }
}

pub fn push_foreground(out: &mut Vec<u8>, code: u8) {
    out.extend_from_slice(format!("\x1b[{code}m").as_bytes());
}

/// Running foreground color for one row.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ColorRun {
    current: Option<u8>,
}

impl ColorRun {
    /// Emit `byte` in the color of `hl`, switching color only on change.
    pub fn push(&mut self, out: &mut Vec<u8>, byte: u8, hl: Highlight) {
        if is_control(byte) {
            self.push_control(out, byte);
            return;
        }
        let code = color_code(hl);
        if code != self.current {
            match code {
                Some(c) => push_foreground(out, c),
                None => out.extend_from_slice(DEFAULT_FOREGROUND),
            }
            self.current = code;
        }
        out.push(byte);
    }

    /// Control bytes show as an inverse letter (`^A` as `A`, anything past 26 as
    /// `?`), then the running color is restored.
    fn push_control(&mut self, out: &mut Vec<u8>, byte: u8) {
        let symbol = if byte <= 26 { b'@' + byte } else { b'?' };
        out.extend_from_slice(REVERSE_VIDEO);
        out.push(symbol);
        out.extend_from_slice(RESET_ATTRIBUTES);
        if let Some(c) = self.current {
            push_foreground(out, c);
        }
    }

    /// Close the row with the default foreground.
    pub fn finish(self, out: &mut Vec<u8>) {
        out.extend_from_slice(DEFAULT_FOREGROUND);
    }
}

#[inline]
pub fn is_control(byte: u8) -> bool {
    byte < 0x20 || byte == 0x7f
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(bytes: &[u8], hls: &[Highlight]) -> String {
        let mut out = Vec::new();
        let mut color = ColorRun::default();
        for (b, h) in bytes.iter().zip(hls) {
            color.push(&mut out, *b, *h);
        }
        color.finish(&mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn escapes_only_on_color_change() {
        use Highlight::*;
        let s = run(b"12 ab", &[Number, Number, Normal, Normal, Normal]);
        assert_eq!(s, "\x1b[31m12\x1b[39m ab\x1b[39m");
    }

    #[test]
    fn normal_run_emits_no_color() {
        let s = run(b"ab", &[Highlight::Normal; 2]);
        assert_eq!(s, "ab\x1b[39m");
    }

    #[test]
    fn control_bytes_restore_color() {
        let s = run(b"1\x01\x7f", &[Highlight::Number; 3]);
        assert_eq!(s, "\x1b[31m1\x1b[7mA\x1b[m\x1b[31m\x1b[7m?\x1b[m\x1b[31m\x1b[39m");
    }

    #[test]
    fn foreground_escape_is_appended() {
        let mut out = b"x".to_vec();
        push_foreground(&mut out, 36);
        assert_eq!(out, b"x\x1b[36m");
    }

    #[test]
    fn every_class_has_a_distinct_role() {
        assert_eq!(color_code(Highlight::Normal), None);
        assert_eq!(color_code(Highlight::LineComment), color_code(Highlight::BlockComment));
        assert_eq!(color_code(Highlight::SearchMatch), Some(34));
    }
}
