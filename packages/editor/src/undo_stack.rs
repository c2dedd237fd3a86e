//! # Undo/Redo Stack
//!
//! Tracks snapshot history and enables undo/redo operations.
//!
//! ## Design
//!
//! - Snapshots are immutable, so history stores the snapshot *before* each
//!   change instead of inverse mutations
//! - Undo swaps the current snapshot with the most recent stored one
//! - Redo reverses an undo
//! - New changes clear the redo stack
//! - Consecutive character insertions coalesce into one step; every other
//!   change type (autoformat triggers included) is a step of its own
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//!
//! let next = doc.apply(&mutation)?;
//! stack.record(&doc, mutation.change_type());
//!
//! // Undo
//! let previous = stack.undo(&next);
//! ```

use crate::document::Document;
use crate::mutations::ChangeType;

/// One undo (or redo) step
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Snapshot to restore
    pub snapshot: Document,

    /// Change that moved away from `snapshot`
    pub change_type: ChangeType,
}

/// Undo/redo stack for document editing
#[derive(Debug)]
pub struct UndoStack {
    /// Snapshots before each change (most recent last)
    undo_stack: Vec<HistoryEntry>,

    /// Snapshots undone from (most recent last)
    redo_stack: Vec<HistoryEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Type of the last recorded change while it may still be extended
    open_change: Option<ChangeType>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            open_change: None,
        }
    }

    /// Record that `before` was replaced by a change of `change_type`
    pub fn record(&mut self, before: &Document, change_type: ChangeType) {
        // New action invalidates the future
        self.redo_stack.clear();

        let extends_open_step = change_type == ChangeType::InsertCharacters
            && self.open_change == Some(ChangeType::InsertCharacters)
            && !self.undo_stack.is_empty();
        self.open_change = Some(change_type);
        if extends_open_step {
            return;
        }

        self.undo_stack.push(HistoryEntry {
            snapshot: before.clone(),
            change_type,
        });

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }
    }

    /// Stop the current step from absorbing further insertions
    ///
    /// Hosts call this when the caret moves between edits.
    pub fn seal(&mut self) {
        self.open_change = None;
    }

    /// Undo the most recent step, returning the snapshot to restore
    pub fn undo(&mut self, current: &Document) -> Option<Document> {
        let entry = self.undo_stack.pop()?;
        self.open_change = None;
        self.redo_stack.push(HistoryEntry {
            snapshot: current.clone(),
            change_type: entry.change_type,
        });
        Some(entry.snapshot)
    }

    /// Redo the most recently undone step
    pub fn redo(&mut self, current: &Document) -> Option<Document> {
        let entry = self.redo_stack.pop()?;
        self.open_change = None;
        self.undo_stack.push(HistoryEntry {
            snapshot: current.clone(),
            change_type: entry.change_type,
        });
        Some(entry.snapshot)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Change type the next undo would revert
    pub fn next_undo_change(&self) -> Option<ChangeType> {
        self.undo_stack.last().map(|entry| entry.change_type)
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.open_change = None;
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Block;
    use crate::mutations::Mutation;
    use crate::style::StyleName;

    fn insert(doc: &Document, text: &str) -> Mutation {
        let caret = doc.selection().focus;
        Mutation::InsertText {
            block_key: doc.selection().block_key.clone(),
            start: caret,
            end: caret,
            text: text.to_string(),
        }
    }

    fn step(stack: &mut UndoStack, doc: &Document, mutation: &Mutation) -> Document {
        let next = doc.apply(mutation).unwrap();
        stack.record(doc, mutation.change_type());
        next
    }

    #[test]
    fn test_undo_stack_creation() {
        let stack = UndoStack::new();
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(stack.redo_levels(), 0);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_apply_undo_redo() {
        let mut stack = UndoStack::new();
        let doc = Document::empty();

        let typed = step(&mut stack, &doc, &insert(&doc, "#"));
        assert_eq!(stack.undo_levels(), 1);

        let restored = stack.undo(&typed).unwrap();
        assert_eq!(restored.plain_text(), "");
        assert_eq!(stack.redo_levels(), 1);

        let redone = stack.redo(&restored).unwrap();
        assert_eq!(redone.plain_text(), "#");
        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_insertions_coalesce_but_styles_do_not() {
        let mut stack = UndoStack::new();
        let mut doc = Document::empty();

        for c in ["h", "i", " ", "*", "*"] {
            let m = insert(&doc, c);
            doc = step(&mut stack, &doc, &m);
        }
        assert_eq!(stack.undo_levels(), 1);

        let style = Mutation::ApplyInlineStyle {
            block_key: doc.selection().block_key.clone(),
            start: 3,
            end: 5,
            style: StyleName::Accent,
        };
        let styled = step(&mut stack, &doc, &style);
        assert_eq!(stack.undo_levels(), 2);
        assert_eq!(stack.next_undo_change(), Some(ChangeType::ApplyInlineStyle));

        // One undo removes exactly the style
        let unstyled = stack.undo(&styled).unwrap();
        assert_eq!(unstyled.plain_text(), "hi **");
        assert!(unstyled.current_block().style_runs.is_empty());

        // Typing after a style change starts a new step
        let more = step(&mut stack, &styled, &insert(&styled, "x"));
        assert_eq!(stack.undo_levels(), 2);
        assert_eq!(more.plain_text(), "hi **x");
    }

    #[test]
    fn test_seal_breaks_coalescing() {
        let mut stack = UndoStack::new();
        let doc = Document::empty();

        let a = step(&mut stack, &doc, &insert(&doc, "a"));
        stack.seal();
        step(&mut stack, &a, &insert(&a, "b"));

        assert_eq!(stack.undo_levels(), 2);
    }

    #[test]
    fn test_new_change_clears_redo() {
        let mut stack = UndoStack::new();
        let doc = Document::from_blocks(vec![Block::new("a", "*")]).unwrap();
        let style = Mutation::ApplyInlineStyle {
            block_key: "a".into(),
            start: 0,
            end: 1,
            style: StyleName::Strong,
        };

        let styled = step(&mut stack, &doc, &style);
        let undone = stack.undo(&styled).unwrap();
        assert_eq!(stack.redo_levels(), 1);

        step(&mut stack, &undone, &style);
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut stack = UndoStack::with_max_levels(2);
        let mut doc = Document::from_blocks(vec![Block::new("a", "***")]).unwrap();

        for i in 0..3 {
            let style = Mutation::ApplyInlineStyle {
                block_key: "a".into(),
                start: i,
                end: i + 1,
                style: StyleName::Strong,
            };
            doc = step(&mut stack, &doc, &style);
        }

        // Should only keep 2 (max levels)
        assert_eq!(stack.undo_levels(), 2);
    }
}
