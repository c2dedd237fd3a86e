//! # Input Interceptor
//!
//! Entry point for every character about to be inserted. Asks the
//! recognizer whether the character completes a shorthand pattern and, if
//! so, restyles the preceding range and swallows the character. Everything
//! else passes through for ordinary insertion.
//!
//! Key commands and tab/shift-tab are routed from here to the default
//! command table and the list helper.

use crate::autoformat;
use crate::commands::{self, CommandAction, KeyCommand};
use crate::document::Document;
use crate::lists::{self, TabOutcome};
use crate::mutations::MutationError;

/// Result of offering input to the interceptor
#[derive(Debug, Clone, PartialEq)]
pub struct Interception {
    /// The input was handled and must not be inserted as text
    pub consumed: bool,

    /// Next snapshot (the input snapshot when not consumed)
    pub snapshot: Document,
}

/// Offer `chars` before it is inserted at the caret
///
/// Only a single character typed at a collapsed caret can trigger.
pub fn before_insert(chars: &str, snapshot: &Document) -> Result<Interception, MutationError> {
    let pass_through = || Interception {
        consumed: false,
        snapshot: snapshot.clone(),
    };

    let mut iter = chars.chars();
    let (Some(incoming), None) = (iter.next(), iter.next()) else {
        return Ok(pass_through());
    };

    let block = snapshot.current_block();
    match autoformat::recognize(&block.text, snapshot.selection(), incoming) {
        Some(trigger) => Ok(Interception {
            consumed: true,
            snapshot: autoformat::apply(&trigger, snapshot)?,
        }),
        None => Ok(pass_through()),
    }
}

/// Key chords the interceptor does not handle itself go to the default table
pub fn handle_key_command(command: &KeyCommand, snapshot: &Document) -> CommandAction {
    commands::resolve(command, snapshot)
}

/// Tab and shift-tab go to the list indentation helper
pub fn on_tab(snapshot: &Document, shift: bool, max_depth: u8) -> TabOutcome {
    lists::adjust_depth(snapshot, shift, max_depth)
}
