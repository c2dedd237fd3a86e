//! List indentation for tab / shift-tab.

use crate::document::Document;
use crate::mutations::Mutation;

/// Default maximum list nesting depth
pub const DEFAULT_MAX_DEPTH: u8 = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct TabOutcome {
    /// The host must not insert a tab character
    pub handled: bool,

    /// Depth change to apply, if the depth actually moves
    pub mutation: Option<Mutation>,
}

impl TabOutcome {
    fn not_handled() -> Self {
        Self {
            handled: false,
            mutation: None,
        }
    }
}

/// Indent (or outdent, with `shift`) the list item under the selection
///
/// Only list items react; depth stays within `[0, max_depth]`.
pub fn adjust_depth(doc: &Document, shift: bool, max_depth: u8) -> TabOutcome {
    let block = doc.current_block();
    if !block.kind.is_list() {
        return TabOutcome::not_handled();
    }

    // Tab never lowers a depth that is already past the cap
    let depth = if shift {
        block.depth.saturating_sub(1)
    } else {
        block.depth.max(block.depth.saturating_add(1).min(max_depth))
    };

    let mutation = (depth != block.depth).then(|| Mutation::SetDepth {
        block_key: block.key.clone(),
        depth,
    });
    TabOutcome {
        handled: true,
        mutation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Block, BlockKind, Selection};

    fn list_doc(depth: u8) -> Document {
        let mut block = Block::new("a", "item").with_kind(BlockKind::UnorderedListItem);
        block.depth = depth;
        Document::from_blocks(vec![block]).unwrap()
    }

    #[test]
    fn test_tab_indents_list_item() {
        let outcome = adjust_depth(&list_doc(0), false, DEFAULT_MAX_DEPTH);
        assert!(outcome.handled);
        assert_eq!(
            outcome.mutation,
            Some(Mutation::SetDepth {
                block_key: "a".into(),
                depth: 1
            })
        );
    }

    #[test]
    fn test_depth_is_capped() {
        let outcome = adjust_depth(&list_doc(4), false, DEFAULT_MAX_DEPTH);
        assert!(outcome.handled);
        assert_eq!(outcome.mutation, None);

        let outcome = adjust_depth(&list_doc(1), false, 1);
        assert_eq!(outcome.mutation, None);
    }

    #[test]
    fn test_tab_keeps_depth_beyond_cap() {
        let outcome = adjust_depth(&list_doc(7), false, DEFAULT_MAX_DEPTH);
        assert!(outcome.handled);
        assert_eq!(outcome.mutation, None);

        let outcome = adjust_depth(&list_doc(7), true, DEFAULT_MAX_DEPTH);
        assert_eq!(
            outcome.mutation,
            Some(Mutation::SetDepth {
                block_key: "a".into(),
                depth: 6
            })
        );
    }

    #[test]
    fn test_shift_tab_outdents_to_zero() {
        let outcome = adjust_depth(&list_doc(2), true, DEFAULT_MAX_DEPTH);
        assert_eq!(
            outcome.mutation,
            Some(Mutation::SetDepth {
                block_key: "a".into(),
                depth: 1
            })
        );

        let outcome = adjust_depth(&list_doc(0), true, DEFAULT_MAX_DEPTH);
        assert!(outcome.handled);
        assert_eq!(outcome.mutation, None);
    }

    #[test]
    fn test_non_list_block_is_not_handled() {
        let doc = Document::from_blocks(vec![Block::new("a", "text")])
            .unwrap()
            .with_selection(Selection::caret("a".into(), 2))
            .unwrap();
        assert_eq!(adjust_depth(&doc, false, DEFAULT_MAX_DEPTH), TabOutcome::not_handled());
    }
}
