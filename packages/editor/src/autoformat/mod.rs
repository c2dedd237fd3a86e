//! # Markdown-style Autoformatting
//!
//! Watches the character about to be typed and the text before the caret,
//! and turns shorthand markers into styled text in place:
//!
//! | typed            | style           | restyled range      |
//! |------------------|-----------------|---------------------|
//! | `#` then space   | `HEADING`       | the `#`             |
//! | `*` then space   | `STRONG`        | the `*`             |
//! | `**` then space  | `ACCENT`        | both `*`            |
//! | `***` then space | `EMPHASIS_LINE` | all three `*`       |
//!
//! The space that completes a pattern is swallowed. Marker characters are
//! kept in the text and carry the style; text typed after them inherits it.

mod applicator;
mod recognizer;

pub use applicator::apply;
pub use recognizer::{recognize, recognize_at, EMPHASIS_MARKER, HEADING_MARKER, MAX_EMPHASIS_RUN, TRIGGER_CHAR};

use std::ops::Range;

use crate::style::StyleName;

/// A completed shorthand pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    /// Shorthand chars to restyle; always ends at the caret
    pub range: Range<usize>,

    /// Style the range receives
    pub style: StyleName,

    /// Char that completed the pattern (discarded, never inserted)
    pub trigger_char: char,
}
