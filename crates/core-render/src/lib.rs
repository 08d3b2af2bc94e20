//! Turning editor state into terminal bytes.
//!
//! - `viewport`: cursor render column and minimal-motion scroll offsets.
//! - `style`: highlight class to SGR color mapping with escape suppression.
//! - `status`: status line and message bar text.
//! - `render_engine`: assembles the whole frame into one buffer.
//!
//! Nothing here touches the terminal; the caller writes the returned frame.

pub mod render_engine;
pub mod status;
pub mod style;
pub mod viewport;

pub use render_engine::{RenderEngine, VERSION};
pub use viewport::{compute_scroll_offset, scroll_into_view};
