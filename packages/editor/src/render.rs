//! # Segment Resolution
//!
//! Splits a block into non-overlapping segments at every style-run
//! boundary. Each segment lists the styles active over it and the visual
//! rule composed from them, so a renderer never sees overlapping runs.

use std::collections::BTreeSet;
use std::ops::Range;

use crate::document::Block;
use crate::style::{StyleMap, StyleName, VisualRule};

/// Uniformly styled span of a block
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Char range within the block
    pub range: Range<usize>,

    /// Active styles, sorted and deduplicated
    pub styles: Vec<StyleName>,

    pub rule: VisualRule,
}

impl Segment {
    pub fn is_plain(&self) -> bool {
        self.styles.is_empty()
    }
}

/// Resolve a block into segments covering its whole text
///
/// An empty block has no segments.
pub fn segments(block: &Block, map: &StyleMap) -> Vec<Segment> {
    let len = block.len();
    if len == 0 {
        return Vec::new();
    }

    let mut boundaries = BTreeSet::from([0, len]);
    for run in &block.style_runs {
        boundaries.insert(run.start.min(len));
        boundaries.insert(run.end.min(len));
    }

    let points: Vec<usize> = boundaries.into_iter().collect();
    let mut result: Vec<Segment> = Vec::with_capacity(points.len());
    for pair in points.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let styles: BTreeSet<StyleName> = block
            .style_runs
            .iter()
            .filter(|run| run.start <= start && end <= run.end)
            .map(|run| run.style)
            .collect();
        let styles: Vec<StyleName> = styles.into_iter().collect();

        // Neighbours with identical styles collapse into one segment
        if let Some(last) = result.last_mut() {
            if last.styles == styles {
                last.range.end = end;
                continue;
            }
        }

        result.push(Segment {
            range: start..end,
            rule: map.resolve(&styles),
            styles,
        });
    }
    result
}
