//! # Document Snapshots
//!
//! Immutable rich-text document model.
//!
//! A [`Document`] is an ordered list of [`Block`]s plus a [`Selection`].
//! Snapshots are never mutated in place: [`Document::apply`] returns the
//! next snapshot and unchanged blocks are shared between the two behind
//! `Arc`.
//!
//! ## Offsets
//!
//! All offsets are zero-based and counted in `char`s relative to the start
//! of a block, never in bytes.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::mutations::{Mutation, MutationError};
use crate::style::StyleName;

/// Stable identifier of a block within one document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockKey(pub String);

impl BlockKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

/// Paragraph-level block type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    #[default]
    Unstyled,
    UnorderedListItem,
    OrderedListItem,
}

impl BlockKind {
    pub fn is_list(&self) -> bool {
        matches!(self, BlockKind::UnorderedListItem | BlockKind::OrderedListItem)
    }
}

/// A named style over a `[start, end)` char range of one block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StyleRun {
    pub start: usize,
    pub end: usize,
    pub style: StyleName,
}

impl StyleRun {
    pub fn new(range: Range<usize>, style: StyleName) -> Self {
        Self {
            start: range.start,
            end: range.end,
            style,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn covers(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// One paragraph: text, style runs and opaque metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub key: BlockKey,
    pub kind: BlockKind,
    pub depth: u8,
    pub text: String,
    /// Overlapping runs are legal and compose visually
    pub style_runs: Vec<StyleRun>,
    /// Block metadata, preserved verbatim
    pub data: serde_json::Map<String, serde_json::Value>,
    /// Entity ranges, preserved verbatim (entities are not edited here)
    pub entity_ranges: Vec<serde_json::Value>,
}

impl Block {
    pub fn new(key: impl Into<BlockKey>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: BlockKind::Unstyled,
            depth: 0,
            text: text.into(),
            style_runs: Vec::new(),
            data: serde_json::Map::new(),
            entity_ranges: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: BlockKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_run(mut self, range: Range<usize>, style: StyleName) -> Self {
        self.style_runs.push(StyleRun::new(range, style));
        self
    }

    /// Length in chars
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Distinct styles applied to the char at `offset`
    pub fn styles_at(&self, offset: usize) -> Vec<StyleName> {
        self.style_runs
            .iter()
            .filter(|run| run.covers(offset))
            .map(|run| run.style)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Whether every char of a non-empty `range` carries `style`
    pub fn has_style_over(&self, range: Range<usize>, style: StyleName) -> bool {
        !range.is_empty()
            && range.clone().all(|offset| {
                self.style_runs
                    .iter()
                    .any(|run| run.style == style && run.covers(offset))
            })
    }

    /// Text of a char range
    pub fn slice(&self, range: Range<usize>) -> &str {
        let start = byte_index(&self.text, range.start);
        let end = byte_index(&self.text, range.end);
        &self.text[start..end]
    }

    pub(crate) fn with_range_removed(&self, start: usize, end: usize) -> Block {
        let removed = end - start;
        let shift = |p: usize| {
            if p <= start {
                p
            } else if p >= end {
                p - removed
            } else {
                start
            }
        };

        let mut text = self.text.clone();
        text.replace_range(byte_index(&self.text, start)..byte_index(&self.text, end), "");

        let style_runs = self
            .style_runs
            .iter()
            .map(|run| StyleRun {
                start: shift(run.start),
                end: shift(run.end),
                style: run.style,
            })
            .filter(|run| !run.is_empty())
            .collect();

        Block {
            text,
            style_runs,
            ..self.clone()
        }
    }

    /// Insert `inserted` at `caret`; the new chars carry `inherited` styles
    pub(crate) fn with_text_inserted(
        &self,
        caret: usize,
        inserted: &str,
        inherited: &[StyleName],
    ) -> Block {
        let n = inserted.chars().count();
        if n == 0 {
            return self.clone();
        }

        let mut text = self.text.clone();
        text.insert_str(byte_index(&self.text, caret), inserted);

        let mut covered: Vec<StyleName> = Vec::new();
        let mut style_runs = Vec::with_capacity(self.style_runs.len() + inherited.len());
        for run in &self.style_runs {
            let mut run = *run;
            let wants = inherited.contains(&run.style) && !covered.contains(&run.style);

            if run.end < caret {
                // entirely before the insertion point
            } else if run.start > caret {
                run.start += n;
                run.end += n;
            } else if run.start < caret && run.end > caret {
                run.end += n;
                covered.push(run.style);
            } else if run.end == caret {
                if wants {
                    run.end += n;
                    covered.push(run.style);
                }
            } else if wants {
                // starts at the caret and the inserted chars take its style
                run.end += n;
                covered.push(run.style);
            } else {
                run.start += n;
                run.end += n;
            }
            style_runs.push(run);
        }

        for style in inherited {
            if !covered.contains(style) {
                style_runs.push(StyleRun::new(caret..caret + n, *style));
            }
        }

        Block {
            text,
            style_runs,
            ..self.clone()
        }
    }

    /// Split at `offset`; the tail keeps kind and depth under `tail_key`
    pub(crate) fn split_at(&self, offset: usize, tail_key: BlockKey) -> (Block, Block) {
        let at = byte_index(&self.text, offset);
        let len = self.len();

        let head_runs = self
            .style_runs
            .iter()
            .map(|run| StyleRun {
                start: run.start,
                end: run.end.min(offset),
                style: run.style,
            })
            .filter(|run| !run.is_empty())
            .collect();
        let tail_runs = self
            .style_runs
            .iter()
            .map(|run| StyleRun {
                start: run.start.max(offset) - offset,
                end: run.end.min(len).saturating_sub(offset),
                style: run.style,
            })
            .filter(|run| !run.is_empty())
            .collect();

        let head = Block {
            text: self.text[..at].to_string(),
            style_runs: head_runs,
            ..self.clone()
        };
        let tail = Block {
            key: tail_key,
            kind: self.kind,
            depth: self.depth,
            text: self.text[at..].to_string(),
            style_runs: tail_runs,
            data: serde_json::Map::new(),
            entity_ranges: Vec::new(),
        };
        (head, tail)
    }

    /// Append `other`'s text and runs to this block
    pub(crate) fn joined_with(&self, other: &Block) -> Block {
        let offset = self.len();
        let mut style_runs = self.style_runs.clone();
        style_runs.extend(other.style_runs.iter().map(|run| StyleRun {
            start: run.start + offset,
            end: run.end + offset,
            style: run.style,
        }));

        Block {
            text: format!("{}{}", self.text, other.text),
            style_runs,
            ..self.clone()
        }
    }

    pub(crate) fn with_style_added(&self, start: usize, end: usize, style: StyleName) -> Block {
        let mut block = self.clone();
        block.style_runs.push(StyleRun::new(start..end, style));
        block
    }

    pub(crate) fn with_style_removed(&self, start: usize, end: usize, style: StyleName) -> Block {
        let mut style_runs = Vec::with_capacity(self.style_runs.len() + 1);
        for run in &self.style_runs {
            if run.style != style || run.end <= start || run.start >= end {
                style_runs.push(*run);
                continue;
            }
            if run.start < start {
                style_runs.push(StyleRun::new(run.start..start, style));
            }
            if run.end > end {
                style_runs.push(StyleRun::new(end..run.end, style));
            }
        }

        Block {
            style_runs,
            ..self.clone()
        }
    }
}

/// Anchor/focus pair inside one block
///
/// `anchor <= focus` is not required; a backward selection is legal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub block_key: BlockKey,
    pub anchor: usize,
    pub focus: usize,
}

impl Selection {
    /// Collapsed selection (a caret)
    pub fn caret(block_key: BlockKey, offset: usize) -> Self {
        Self {
            block_key,
            anchor: offset,
            focus: offset,
        }
    }

    pub fn range(block_key: BlockKey, anchor: usize, focus: usize) -> Self {
        Self {
            block_key,
            anchor,
            focus,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.focus)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.focus)
    }

    /// Caret offset, when collapsed
    pub fn caret_offset(&self) -> Option<usize> {
        self.is_collapsed().then_some(self.focus)
    }
}

/// Immutable document snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    blocks: Vec<Arc<Block>>,
    selection: Selection,
    version: u64,
    entity_map: serde_json::Map<String, serde_json::Value>,
}

impl Document {
    /// Single empty block with the caret at its start
    pub fn empty() -> Self {
        let key = BlockKey::new("b0");
        Self {
            blocks: vec![Arc::new(Block::new(key.clone(), ""))],
            selection: Selection::caret(key, 0),
            version: 0,
            entity_map: serde_json::Map::new(),
        }
    }

    /// Build a document from blocks, caret at the start of the first block
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self, MutationError> {
        Self::with_entity_map(blocks, serde_json::Map::new())
    }

    pub(crate) fn with_entity_map(
        blocks: Vec<Block>,
        entity_map: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, MutationError> {
        if blocks.is_empty() {
            return Ok(Self {
                entity_map,
                ..Self::empty()
            });
        }

        let mut seen = BTreeSet::new();
        for block in &blocks {
            if !seen.insert(block.key.clone()) {
                return Err(MutationError::DuplicateKey(block.key.to_string()));
            }
            let len = block.len();
            for run in &block.style_runs {
                if run.is_empty() || run.end > len {
                    return Err(MutationError::InvalidRange {
                        start: run.start,
                        end: run.end,
                        len,
                    });
                }
            }
        }

        let selection = Selection::caret(blocks[0].key.clone(), 0);
        Ok(Self {
            blocks: blocks.into_iter().map(Arc::new).collect(),
            selection,
            version: 0,
            entity_map,
        })
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.blocks.iter().map(|block| block.as_ref())
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn block(&self, key: &BlockKey) -> Option<&Block> {
        self.blocks
            .iter()
            .find(|block| &block.key == key)
            .map(|block| block.as_ref())
    }

    pub fn block_at(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index).map(|block| block.as_ref())
    }

    pub fn block_index(&self, key: &BlockKey) -> Option<usize> {
        self.blocks.iter().position(|block| &block.key == key)
    }

    /// Block containing the selection
    pub fn current_block(&self) -> &Block {
        self.block(&self.selection.block_key)
            .unwrap_or_else(|| self.blocks[0].as_ref())
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn entity_map(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.entity_map
    }

    /// Plain text, one line per block
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Same content with a different selection
    ///
    /// Selection changes are not edits: the version does not move.
    pub fn with_selection(&self, selection: Selection) -> Result<Document, MutationError> {
        let block = self
            .block(&selection.block_key)
            .ok_or_else(|| MutationError::BlockNotFound(selection.block_key.to_string()))?;
        let len = block.len();
        if selection.end() > len {
            return Err(MutationError::OffsetOutOfRange {
                offset: selection.end(),
                len,
            });
        }

        Ok(Document {
            selection,
            ..self.clone()
        })
    }

    /// Collapse the caret at the end of the last block
    pub fn with_caret_at_end(&self) -> Document {
        let last = self.blocks[self.blocks.len() - 1].as_ref();
        Document {
            selection: Selection::caret(last.key.clone(), last.len()),
            ..self.clone()
        }
    }

    /// Apply a mutation, producing the next snapshot
    pub fn apply(&self, mutation: &Mutation) -> Result<Document, MutationError> {
        let mut next = mutation.apply(self)?;
        next.version = self.version + 1;
        Ok(next)
    }

    /// Copy with block `index` replaced (other blocks stay shared)
    pub(crate) fn replace_block(&self, index: usize, block: Block, selection: Selection) -> Document {
        let mut blocks = self.blocks.clone();
        blocks[index] = Arc::new(block);
        Document {
            blocks,
            selection,
            ..self.clone()
        }
    }

    /// Copy with `blocks[range]` replaced by `replacement`
    pub(crate) fn splice_blocks(
        &self,
        range: Range<usize>,
        replacement: Vec<Block>,
        selection: Selection,
    ) -> Document {
        let mut blocks = self.blocks.clone();
        blocks.splice(range, replacement.into_iter().map(Arc::new));
        Document {
            blocks,
            selection,
            ..self.clone()
        }
    }

    /// A block key not used by any block of this document
    pub(crate) fn fresh_key(&self) -> BlockKey {
        (self.blocks.len()..)
            .map(|n| BlockKey(format!("b{}", n)))
            .find(|key| self.block(key).is_none())
            .unwrap_or_else(|| BlockKey(format!("b{}", self.version)))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

/// Byte index of the char at `offset` (or the end of `text`)
pub(crate) fn byte_index(text: &str, offset: usize) -> usize {
    text.char_indices()
        .nth(offset)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}
