//! # Default Key Command Table
//!
//! Named commands emitted by a host's key binding layer and what each one
//! does to the current snapshot. Commands the table does not know are
//! reported as not handled so the host can fall back to its own behavior.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::document::{BlockKind, Document};
use crate::mutations::Mutation;
use crate::style::StyleName;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    Bold,
    Underline,
    Backspace,
    Delete,
    SplitBlock,
    Undo,
    Redo,
    ToggleUnorderedList,
    ToggleOrderedList,
    /// Placeholder for an explicit save; persistence already happens on
    /// every change
    Save,
    Unknown(String),
}

impl KeyCommand {
    pub fn name(&self) -> &str {
        match self {
            KeyCommand::Bold => "bold",
            KeyCommand::Underline => "underline",
            KeyCommand::Backspace => "backspace",
            KeyCommand::Delete => "delete",
            KeyCommand::SplitBlock => "split-block",
            KeyCommand::Undo => "undo",
            KeyCommand::Redo => "redo",
            KeyCommand::ToggleUnorderedList => "toggle-unordered-list",
            KeyCommand::ToggleOrderedList => "toggle-ordered-list",
            KeyCommand::Save => "save",
            KeyCommand::Unknown(name) => name,
        }
    }
}

impl FromStr for KeyCommand {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "bold" => KeyCommand::Bold,
            "underline" => KeyCommand::Underline,
            "backspace" => KeyCommand::Backspace,
            "delete" => KeyCommand::Delete,
            "split-block" => KeyCommand::SplitBlock,
            "undo" => KeyCommand::Undo,
            "redo" => KeyCommand::Redo,
            "toggle-unordered-list" => KeyCommand::ToggleUnorderedList,
            "toggle-ordered-list" => KeyCommand::ToggleOrderedList,
            "save" => KeyCommand::Save,
            other => KeyCommand::Unknown(other.to_string()),
        })
    }
}

impl From<&str> for KeyCommand {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(command) => command,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for KeyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the session should do for a command
#[derive(Debug, Clone, PartialEq)]
pub enum CommandAction {
    /// Apply these mutations in order as one history step
    Mutate(Vec<Mutation>),
    Undo,
    Redo,
    NotHandled,
}

/// Look a command up in the default table
pub fn resolve(command: &KeyCommand, doc: &Document) -> CommandAction {
    match command {
        KeyCommand::Bold => toggle_inline_style(doc, StyleName::Strong),
        KeyCommand::Underline => toggle_inline_style(doc, StyleName::EmphasisLine),
        KeyCommand::Backspace => backspace(doc),
        KeyCommand::Delete => delete_forward(doc),
        KeyCommand::SplitBlock => split_block(doc),
        KeyCommand::Undo => CommandAction::Undo,
        KeyCommand::Redo => CommandAction::Redo,
        KeyCommand::ToggleUnorderedList => toggle_block_kind(doc, BlockKind::UnorderedListItem),
        KeyCommand::ToggleOrderedList => toggle_block_kind(doc, BlockKind::OrderedListItem),
        KeyCommand::Save => {
            tracing::debug!("Save requested; content is already persisted on change");
            CommandAction::NotHandled
        }
        KeyCommand::Unknown(name) => {
            tracing::trace!("Unknown key command: {}", name);
            CommandAction::NotHandled
        }
    }
}

fn toggle_inline_style(doc: &Document, style: StyleName) -> CommandAction {
    let selection = doc.selection();
    if selection.is_collapsed() {
        return CommandAction::NotHandled;
    }

    let block_key = selection.block_key.clone();
    let (start, end) = (selection.start(), selection.end());
    let mutation = if doc.current_block().has_style_over(start..end, style) {
        Mutation::RemoveInlineStyle {
            block_key,
            start,
            end,
            style,
        }
    } else {
        Mutation::ApplyInlineStyle {
            block_key,
            start,
            end,
            style,
        }
    };
    CommandAction::Mutate(vec![mutation])
}

fn backspace(doc: &Document) -> CommandAction {
    let selection = doc.selection();
    let block = doc.current_block();
    let block_key = block.key.clone();

    if !selection.is_collapsed() {
        return CommandAction::Mutate(vec![Mutation::DeleteRange {
            block_key,
            start: selection.start(),
            end: selection.end(),
        }]);
    }

    let offset = selection.focus;
    if offset > 0 {
        return CommandAction::Mutate(vec![Mutation::DeleteRange {
            block_key,
            start: offset - 1,
            end: offset,
        }]);
    }

    // At the start of a block: leave the list first, then join upwards
    if block.kind.is_list() {
        return CommandAction::Mutate(vec![Mutation::SetBlockKind {
            block_key,
            kind: BlockKind::Unstyled,
        }]);
    }
    match doc.block_index(&block_key) {
        Some(index) if index > 0 => {
            CommandAction::Mutate(vec![Mutation::MergeWithPrevious { block_key }])
        }
        _ => CommandAction::NotHandled,
    }
}

fn delete_forward(doc: &Document) -> CommandAction {
    let selection = doc.selection();
    let block = doc.current_block();
    let block_key = block.key.clone();

    if !selection.is_collapsed() {
        return CommandAction::Mutate(vec![Mutation::DeleteRange {
            block_key,
            start: selection.start(),
            end: selection.end(),
        }]);
    }

    let offset = selection.focus;
    if offset < block.len() {
        return CommandAction::Mutate(vec![Mutation::DeleteRange {
            block_key,
            start: offset,
            end: offset + 1,
        }]);
    }

    let next = doc
        .block_index(&block_key)
        .and_then(|index| doc.block_at(index + 1));
    match next {
        Some(next) => CommandAction::Mutate(vec![Mutation::MergeWithPrevious {
            block_key: next.key.clone(),
        }]),
        None => CommandAction::NotHandled,
    }
}

fn split_block(doc: &Document) -> CommandAction {
    let selection = doc.selection();
    let block_key = selection.block_key.clone();
    let mut mutations = Vec::new();

    if !selection.is_collapsed() {
        mutations.push(Mutation::DeleteRange {
            block_key: block_key.clone(),
            start: selection.start(),
            end: selection.end(),
        });
    }
    mutations.push(Mutation::SplitBlock {
        block_key,
        offset: selection.start(),
    });
    CommandAction::Mutate(mutations)
}

fn toggle_block_kind(doc: &Document, kind: BlockKind) -> CommandAction {
    let block = doc.current_block();
    let next = if block.kind == kind {
        BlockKind::Unstyled
    } else {
        kind
    };

    CommandAction::Mutate(vec![Mutation::SetBlockKind {
        block_key: block.key.clone(),
        kind: next,
    }])
}
