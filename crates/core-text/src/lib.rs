//! Line model and syntax classification.
//!
//! * `row`: one line as raw bytes plus its tab-expanded, classified form, and
//!   the mapping between character and render columns.
//! * `syntax`: the static per-language rule table.
//! * `highlight`: the single-row scan producing one `Highlight` per rendered byte.
//!
//! Everything here is byte oriented: a column is a byte offset, and tabs are the
//! only bytes whose rendered width differs from one.

pub mod highlight;
pub mod row;
pub mod syntax;

pub use highlight::{Highlight, LineHighlight, highlight_line, is_separator};
pub use row::{DEFAULT_TAB_STOP, Row};
pub use syntax::{Keyword, KeywordClass, SYNTAX_TABLE, SyntaxFlags, SyntaxRule, select_syntax};
