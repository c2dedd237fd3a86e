use tracing::trace;

use super::Trigger;
use crate::document::Selection;
use crate::style::StyleName;

pub const HEADING_MARKER: char = '#';
pub const EMPHASIS_MARKER: char = '*';
pub const TRIGGER_CHAR: char = ' ';

/// Longest `*` run that maps to a style
pub const MAX_EMPHASIS_RUN: usize = 3;

/// Decide whether typing `incoming` completes a shorthand pattern
///
/// Only a collapsed selection inside the text can trigger; anything else
/// returns `None`.
pub fn recognize(block_text: &str, selection: &Selection, incoming: char) -> Option<Trigger> {
    let caret = selection.caret_offset()?;
    recognize_at(block_text, caret, incoming)
}

/// Same as [`recognize`], from a caret offset
pub fn recognize_at(block_text: &str, caret: usize, incoming: char) -> Option<Trigger> {
    if incoming != TRIGGER_CHAR {
        return None;
    }

    let before: Vec<char> = block_text.chars().take(caret).collect();
    if before.len() < caret {
        // caret past the end of the text
        return None;
    }

    // Heading first
    if before.last() == Some(&HEADING_MARKER) {
        return Some(Trigger {
            range: caret - 1..caret,
            style: StyleName::Heading,
            trigger_char: incoming,
        });
    }

    // Counting stops one past the cap: longer runs only need to be told apart
    let run = before
        .iter()
        .rev()
        .take(MAX_EMPHASIS_RUN + 1)
        .take_while(|c| **c == EMPHASIS_MARKER)
        .count();

    let style = match run {
        1 => StyleName::Strong,
        2 => StyleName::Accent,
        3 => StyleName::EmphasisLine,
        0 => return None,
        _ => {
            trace!("Marker run longer than {} at {}, passing through", MAX_EMPHASIS_RUN, caret);
            return None;
        }
    };

    Some(Trigger {
        range: caret - run..caret,
        style,
        trigger_char: incoming,
    })
}
