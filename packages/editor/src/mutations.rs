//! # Document Mutations
//!
//! Every edit to a [`Document`] is a [`Mutation`] value. Applying one
//! validates it against the snapshot and returns the next snapshot; the
//! input snapshot is never touched.
//!
//! ## Mutation Semantics
//!
//! ### InsertText
//! - Replaces `[start, end)` of a block with `text` (a plain insertion when
//!   `start == end`)
//! - The new chars inherit the inline styles at the insertion point
//! - Caret ends up after the inserted text
//!
//! ### ApplyInlineStyle
//! - Adds one style run over the range, text unchanged
//! - Existing runs are kept; the same style applied twice yields two runs
//! - Selection unchanged
//!
//! ### SplitBlock / MergeWithPrevious
//! - Split keeps kind and depth on the new block
//! - Merge appends the block to its predecessor and removes it

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::{BlockKey, BlockKind, Document, Selection};
use crate::style::StyleName;

/// Document edits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Replace a char range with text
    InsertText {
        block_key: BlockKey,
        start: usize,
        end: usize,
        text: String,
    },

    /// Delete a char range
    DeleteRange {
        block_key: BlockKey,
        start: usize,
        end: usize,
    },

    /// Split a block in two at an offset
    SplitBlock { block_key: BlockKey, offset: usize },

    /// Append a block to the one before it
    MergeWithPrevious { block_key: BlockKey },

    /// Add a style run
    ApplyInlineStyle {
        block_key: BlockKey,
        start: usize,
        end: usize,
        style: StyleName,
    },

    /// Remove a style from every char of a range
    RemoveInlineStyle {
        block_key: BlockKey,
        start: usize,
        end: usize,
        style: StyleName,
    },

    /// Change the block type (leaving a list resets depth)
    SetBlockKind { block_key: BlockKey, kind: BlockKind },

    /// Set list nesting depth
    SetDepth { block_key: BlockKey, depth: u8 },
}

/// Kind of state transition, used for history grouping and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeType {
    InsertCharacters,
    RemoveRange,
    SplitBlock,
    ApplyInlineStyle,
    ChangeInlineStyle,
    ChangeBlockType,
    AdjustDepth,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("Duplicate block key: {0}")]
    DuplicateKey(String),

    #[error("Offset {offset} out of range for block of length {len}")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("Invalid range {start}..{end} for block of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("Block has no predecessor: {0}")]
    NoPreviousBlock(String),

    #[error("Block is not a list item: {0}")]
    NotAListItem(String),
}

impl Mutation {
    pub fn block_key(&self) -> &BlockKey {
        match self {
            Mutation::InsertText { block_key, .. }
            | Mutation::DeleteRange { block_key, .. }
            | Mutation::SplitBlock { block_key, .. }
            | Mutation::MergeWithPrevious { block_key }
            | Mutation::ApplyInlineStyle { block_key, .. }
            | Mutation::RemoveInlineStyle { block_key, .. }
            | Mutation::SetBlockKind { block_key, .. }
            | Mutation::SetDepth { block_key, .. } => block_key,
        }
    }

    pub fn change_type(&self) -> ChangeType {
        match self {
            Mutation::InsertText { .. } => ChangeType::InsertCharacters,
            Mutation::DeleteRange { .. } | Mutation::MergeWithPrevious { .. } => {
                ChangeType::RemoveRange
            }
            Mutation::SplitBlock { .. } => ChangeType::SplitBlock,
            Mutation::ApplyInlineStyle { .. } => ChangeType::ApplyInlineStyle,
            Mutation::RemoveInlineStyle { .. } => ChangeType::ChangeInlineStyle,
            Mutation::SetBlockKind { .. } => ChangeType::ChangeBlockType,
            Mutation::SetDepth { .. } => ChangeType::AdjustDepth,
        }
    }

    /// Apply mutation to a snapshot with validation
    pub fn apply(&self, doc: &Document) -> Result<Document, MutationError> {
        // Validate first
        self.validate(doc)?;

        let index = Self::index_of(doc, self.block_key())?;
        let block = doc.block_at(index).ok_or_else(|| {
            MutationError::BlockNotFound(self.block_key().to_string())
        })?;

        match self {
            Mutation::InsertText {
                block_key,
                start,
                end,
                text,
            } => {
                let inherited = inherited_styles(doc, index, *start, *end);
                let next = block
                    .with_range_removed(*start, *end)
                    .with_text_inserted(*start, text, &inherited);
                let caret = start + text.chars().count();
                Ok(doc.replace_block(index, next, Selection::caret(block_key.clone(), caret)))
            }

            Mutation::DeleteRange {
                block_key,
                start,
                end,
            } => {
                let next = block.with_range_removed(*start, *end);
                Ok(doc.replace_block(index, next, Selection::caret(block_key.clone(), *start)))
            }

            Mutation::SplitBlock { offset, .. } => {
                let tail_key = doc.fresh_key();
                let (head, tail) = block.split_at(*offset, tail_key.clone());
                Ok(doc.splice_blocks(
                    index..index + 1,
                    vec![head, tail],
                    Selection::caret(tail_key, 0),
                ))
            }

            Mutation::MergeWithPrevious { block_key } => {
                let previous = index
                    .checked_sub(1)
                    .and_then(|i| doc.block_at(i))
                    .ok_or_else(|| MutationError::NoPreviousBlock(block_key.to_string()))?;
                let caret = Selection::caret(previous.key.clone(), previous.len());
                let joined = previous.joined_with(block);
                Ok(doc.splice_blocks(index - 1..index + 1, vec![joined], caret))
            }

            Mutation::ApplyInlineStyle {
                start, end, style, ..
            } => {
                let next = block.with_style_added(*start, *end, *style);
                Ok(doc.replace_block(index, next, doc.selection().clone()))
            }

            Mutation::RemoveInlineStyle {
                start, end, style, ..
            } => {
                let next = block.with_style_removed(*start, *end, *style);
                Ok(doc.replace_block(index, next, doc.selection().clone()))
            }

            Mutation::SetBlockKind { kind, .. } => {
                let mut next = block.clone();
                next.kind = *kind;
                if !kind.is_list() {
                    next.depth = 0;
                }
                Ok(doc.replace_block(index, next, doc.selection().clone()))
            }

            Mutation::SetDepth { depth, .. } => {
                let mut next = block.clone();
                next.depth = *depth;
                Ok(doc.replace_block(index, next, doc.selection().clone()))
            }
        }
    }

    /// Validate without applying
    pub fn validate(&self, doc: &Document) -> Result<(), MutationError> {
        let index = Self::index_of(doc, self.block_key())?;
        let block = doc
            .block_at(index)
            .ok_or_else(|| MutationError::BlockNotFound(self.block_key().to_string()))?;
        let len = block.len();

        match self {
            Mutation::InsertText { start, end, .. } | Mutation::DeleteRange { start, end, .. } => {
                if start > end || *end > len {
                    return Err(MutationError::InvalidRange {
                        start: *start,
                        end: *end,
                        len,
                    });
                }
                Ok(())
            }

            Mutation::ApplyInlineStyle { start, end, .. }
            | Mutation::RemoveInlineStyle { start, end, .. } => {
                // Style runs are never empty
                if start >= end || *end > len {
                    return Err(MutationError::InvalidRange {
                        start: *start,
                        end: *end,
                        len,
                    });
                }
                Ok(())
            }

            Mutation::SplitBlock { offset, .. } => {
                if *offset > len {
                    return Err(MutationError::OffsetOutOfRange {
                        offset: *offset,
                        len,
                    });
                }
                Ok(())
            }

            Mutation::MergeWithPrevious { block_key } => {
                if index == 0 {
                    return Err(MutationError::NoPreviousBlock(block_key.to_string()));
                }
                Ok(())
            }

            Mutation::SetBlockKind { .. } => Ok(()),

            Mutation::SetDepth { block_key, depth } => {
                if *depth > 0 && !block.kind.is_list() {
                    return Err(MutationError::NotAListItem(block_key.to_string()));
                }
                Ok(())
            }
        }
    }

    fn index_of(doc: &Document, key: &BlockKey) -> Result<usize, MutationError> {
        doc.block_index(key)
            .ok_or_else(|| MutationError::BlockNotFound(key.to_string()))
    }
}

/// Styles new text picks up when inserted over `[start, end)` of block `index`
///
/// Replacing a range takes the style of its first char. A caret takes the
/// style of the char before it, or the first char at offset 0, or the last
/// char of the nearest non-empty block above when its own block is empty.
pub(crate) fn inherited_styles(doc: &Document, index: usize, start: usize, end: usize) -> Vec<StyleName> {
    let Some(block) = doc.block_at(index) else {
        return Vec::new();
    };

    if start < end {
        return block.styles_at(start);
    }
    if start > 0 {
        return block.styles_at(start - 1);
    }
    if !block.is_empty() {
        return block.styles_at(0);
    }

    (0..index)
        .rev()
        .filter_map(|i| doc.block_at(i))
        .find(|b| !b.is_empty())
        .map(|b| b.styles_at(b.len() - 1))
        .unwrap_or_default()
}
