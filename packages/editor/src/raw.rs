//! # Raw Interchange Format
//!
//! JSON shape used for persistence:
//!
//! ```json
//! {
//!   "blocks": [{
//!     "key": "b0",
//!     "text": "hi **",
//!     "type": "unstyled",
//!     "depth": 0,
//!     "inlineStyleRanges": [{ "offset": 3, "length": 2, "style": "ACCENT" }],
//!     "entityRanges": [],
//!     "data": {}
//!   }],
//!   "entityMap": {}
//! }
//! ```
//!
//! Offsets and lengths count chars. Each style run is written as its own
//! range, so reading back yields exactly the same run list.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::{Block, BlockKey, BlockKind, Document, StyleRun};
use crate::mutations::MutationError;
use crate::style::StyleName;

#[derive(Error, Debug)]
pub enum RawError {
    #[error("Malformed raw content: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Inconsistent raw content: {0}")]
    Invalid(#[from] MutationError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    pub blocks: Vec<RawBlock>,
    #[serde(default)]
    pub entity_map: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    pub key: String,
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: BlockKind,
    #[serde(default)]
    pub depth: u8,
    #[serde(default)]
    pub inline_style_ranges: Vec<RawStyleRange>,
    #[serde(default)]
    pub entity_ranges: Vec<serde_json::Value>,
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: StyleName,
}

impl RawDocument {
    pub fn from_document(doc: &Document) -> Self {
        let blocks = doc
            .blocks()
            .map(|block| RawBlock {
                key: block.key.to_string(),
                text: block.text.clone(),
                kind: block.kind,
                depth: block.depth,
                inline_style_ranges: block
                    .style_runs
                    .iter()
                    .map(|run| RawStyleRange {
                        offset: run.start,
                        length: run.end - run.start,
                        style: run.style,
                    })
                    .collect(),
                entity_ranges: block.entity_ranges.clone(),
                data: block.data.clone(),
            })
            .collect();

        Self {
            blocks,
            entity_map: doc.entity_map().clone(),
        }
    }

    pub fn into_document(self) -> Result<Document, RawError> {
        let blocks = self
            .blocks
            .into_iter()
            .map(|raw| -> Result<Block, MutationError> {
                let len = raw.text.chars().count();
                let style_runs = raw
                    .inline_style_ranges
                    .iter()
                    .map(|range| range.to_run(len))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(Block {
                    key: BlockKey(raw.key),
                    kind: raw.kind,
                    depth: raw.depth,
                    text: raw.text,
                    style_runs,
                    data: raw.data,
                    entity_ranges: raw.entity_ranges,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Document::with_entity_map(blocks, self.entity_map)?)
    }
}

impl RawStyleRange {
    /// Stored offsets are untrusted; an end past `usize::MAX` is invalid
    fn to_run(&self, len: usize) -> Result<StyleRun, MutationError> {
        let end = self
            .offset
            .checked_add(self.length)
            .ok_or(MutationError::InvalidRange {
                start: self.offset,
                end: usize::MAX,
                len,
            })?;
        Ok(StyleRun::new(self.offset..end, self.style))
    }
}

/// Serialize a snapshot to raw JSON text
pub fn to_raw_json(doc: &Document) -> Result<String, RawError> {
    Ok(serde_json::to_string(&RawDocument::from_document(doc))?)
}

/// Parse raw JSON text into a snapshot (caret at the start)
pub fn from_raw_json(json: &str) -> Result<Document, RawError> {
    let raw: RawDocument = serde_json::from_str(json)?;
    raw.into_document()
}
