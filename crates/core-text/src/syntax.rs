//! Static syntax rule table.
//!
//! Rules are built once as `static` data and never mutated; the active rule is
//! shared by reference (`&'static SyntaxRule`). Keywords are stored as tagged
//! `{ text, class }` pairs so the highlighter never has to parse marker suffixes.

use bitflags::bitflags;
use std::path::Path;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SyntaxFlags: u8 {
        const HIGHLIGHT_NUMBERS = 0b0000_0001;
        const HIGHLIGHT_STRINGS = 0b0000_0010;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordClass {
    /// Control flow and declarations.
    Primary,
    /// Type names.
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyword {
    pub text: &'static str,
    pub class: KeywordClass,
}

impl Keyword {
    pub const fn primary(text: &'static str) -> Self {
        Self {
            text,
            class: KeywordClass::Primary,
        }
    }

    pub const fn secondary(text: &'static str) -> Self {
        Self {
            text,
            class: KeywordClass::Secondary,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct SyntaxRule {
    /// File type label shown in the status bar.
    pub name: &'static str,
    /// Entries starting with `.` match the file extension; others match the base name exactly.
    pub file_match: &'static [&'static str],
    /// Checked in order; the first keyword that matches at a position wins.
    pub keywords: &'static [Keyword],
    /// Empty disables line comments.
    pub line_comment: &'static str,
    /// Block comments are enabled only when both delimiters are non-empty.
    pub block_comment_start: &'static str,
    pub block_comment_end: &'static str,
    pub flags: SyntaxFlags,
}

impl SyntaxRule {
    pub fn has_block_comments(&self) -> bool {
        !self.block_comment_start.is_empty() && !self.block_comment_end.is_empty()
    }

    /// True when `path` matches one of this rule's patterns.
    pub fn matches(&self, path: &Path) -> bool {
        let Some(base) = path.file_name().and_then(|s| s.to_str()) else {
            return false;
        };
        let ext = base.rfind('.').map(|pos| &base[pos..]);
        self.file_match.iter().any(|pattern| {
            if pattern.starts_with('.') {
                ext == Some(*pattern)
            } else {
                base == *pattern
            }
        })
    }
}

const ALL_FLAGS: SyntaxFlags = SyntaxFlags::HIGHLIGHT_NUMBERS.union(SyntaxFlags::HIGHLIGHT_STRINGS);

const C_KEYWORDS: &[Keyword] = &[
    Keyword::primary("switch"),
    Keyword::primary("if"),
    Keyword::primary("while"),
    Keyword::primary("for"),
    Keyword::primary("break"),
    Keyword::primary("continue"),
    Keyword::primary("return"),
    Keyword::primary("else"),
    Keyword::primary("struct"),
    Keyword::primary("union"),
    Keyword::primary("typedef"),
    Keyword::primary("static"),
    Keyword::primary("enum"),
    Keyword::primary("class"),
    Keyword::primary("case"),
    Keyword::secondary("int"),
    Keyword::secondary("long"),
    Keyword::secondary("double"),
    Keyword::secondary("float"),
    Keyword::secondary("char"),
    Keyword::secondary("unsigned"),
    Keyword::secondary("signed"),
    Keyword::secondary("void"),
];

const RUST_KEYWORDS: &[Keyword] = &[
    Keyword::primary("fn"),
    Keyword::primary("let"),
    Keyword::primary("mut"),
    Keyword::primary("if"),
    Keyword::primary("else"),
    Keyword::primary("match"),
    Keyword::primary("while"),
    Keyword::primary("loop"),
    Keyword::primary("for"),
    Keyword::primary("in"),
    Keyword::primary("break"),
    Keyword::primary("continue"),
    Keyword::primary("return"),
    Keyword::primary("struct"),
    Keyword::primary("enum"),
    Keyword::primary("impl"),
    Keyword::primary("trait"),
    Keyword::primary("pub"),
    Keyword::primary("use"),
    Keyword::primary("mod"),
    Keyword::primary("const"),
    Keyword::primary("static"),
    Keyword::primary("self"),
    Keyword::primary("Self"),
    Keyword::secondary("u8"),
    Keyword::secondary("u16"),
    Keyword::secondary("u32"),
    Keyword::secondary("u64"),
    Keyword::secondary("usize"),
    Keyword::secondary("i8"),
    Keyword::secondary("i16"),
    Keyword::secondary("i32"),
    Keyword::secondary("i64"),
    Keyword::secondary("isize"),
    Keyword::secondary("bool"),
    Keyword::secondary("char"),
    Keyword::secondary("str"),
    Keyword::secondary("String"),
    Keyword::secondary("Vec"),
    Keyword::secondary("Option"),
    Keyword::secondary("Result"),
];

const PYTHON_KEYWORDS: &[Keyword] = &[
    Keyword::primary("def"),
    Keyword::primary("class"),
    Keyword::primary("if"),
    Keyword::primary("elif"),
    Keyword::primary("else"),
    Keyword::primary("for"),
    Keyword::primary("while"),
    Keyword::primary("in"),
    Keyword::primary("return"),
    Keyword::primary("import"),
    Keyword::primary("from"),
    Keyword::primary("as"),
    Keyword::primary("with"),
    Keyword::primary("try"),
    Keyword::primary("except"),
    Keyword::primary("finally"),
    Keyword::primary("pass"),
    Keyword::primary("lambda"),
    Keyword::secondary("int"),
    Keyword::secondary("float"),
    Keyword::secondary("str"),
    Keyword::secondary("bool"),
    Keyword::secondary("list"),
    Keyword::secondary("dict"),
    Keyword::secondary("None"),
    Keyword::secondary("True"),
    Keyword::secondary("False"),
];

/// Every known language, searched in order.
pub static SYNTAX_TABLE: &[SyntaxRule] = &[
    SyntaxRule {
        name: "c",
        file_match: &[".c", ".h", ".cpp", ".cc"],
        keywords: C_KEYWORDS,
        line_comment: "//",
        block_comment_start: "/*",
        block_comment_end: "*/",
        flags: ALL_FLAGS,
    },
    SyntaxRule {
        name: "rust",
        file_match: &[".rs"],
        keywords: RUST_KEYWORDS,
        line_comment: "//",
        block_comment_start: "/*",
        block_comment_end: "*/",
        flags: ALL_FLAGS,
    },
    SyntaxRule {
        name: "python",
        file_match: &[".py"],
        keywords: PYTHON_KEYWORDS,
        line_comment: "#",
        block_comment_start: "",
        block_comment_end: "",
        flags: ALL_FLAGS,
    },
];

/// Pick the first rule matching `path`, if any.
pub fn select_syntax(path: &Path) -> Option<&'static SyntaxRule> {
    SYNTAX_TABLE.iter().find(|rule| rule.matches(path))
}
