//! Editor configuration

use serde::{Deserialize, Serialize};

use crate::lists::DEFAULT_MAX_DEPTH;

/// Default storage slot for persisted content
pub const DEFAULT_STORAGE_SLOT: &str = "editorContent";

/// Default number of undo levels
pub const DEFAULT_UNDO_LEVELS: usize = 100;

/// Options for an editor session
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorOptions {
    /// Key under which raw content is persisted
    pub storage_slot: String,

    /// Maximum list nesting depth reachable with tab
    pub max_list_depth: u8,

    /// Undo levels kept (0 = unlimited)
    pub undo_levels: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            storage_slot: DEFAULT_STORAGE_SLOT.to_string(),
            max_list_depth: DEFAULT_MAX_DEPTH,
            undo_levels: DEFAULT_UNDO_LEVELS,
        }
    }
}
