//! # Markpad Editor
//!
//! Rich-text editing core with markdown-style autoformatting.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host: CLI directives / browser events       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ session: snapshot + history + post-effects  │
//! │  - Offer each character to the interceptor  │
//! │  - Insert it when not consumed              │
//! │  - Record history, persist after changes    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ interceptor → recognizer → applicator       │
//! │ commands, lists                             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ document: immutable snapshots + mutations   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Snapshots are values**: every edit produces a new [`Document`]
//! 2. **The core is stateless**: recognition and styling are pure
//!    functions of the snapshot and the incoming character
//! 3. **One trigger, one undo step**
//! 4. **Persistence never blocks editing**: failed writes are logged
//!
//! ## Usage
//!
//! ```rust,ignore
//! use markpad_common::FileStore;
//! use markpad_editor::{EditorOptions, EditorSession};
//!
//! let store = FileStore::new(".markpad");
//! let mut session = EditorSession::open(Box::new(store), EditorOptions::default());
//!
//! // "**" followed by a space turns the two markers red
//! session.type_text("hi ** ")?;
//! assert_eq!(session.document().plain_text(), "hi **");
//! ```

pub mod autoformat;
pub mod commands;
mod document;
mod errors;
pub mod interceptor;
pub mod lists;
mod mutations;
mod options;
mod post_effects;
pub mod raw;
pub mod render;
mod session;
mod style;
mod undo_stack;

pub use autoformat::Trigger;
pub use commands::{CommandAction, KeyCommand};
pub use document::{Block, BlockKey, BlockKind, Document, Selection, StyleRun};
pub use errors::{EditorError, EditorResult};
pub use interceptor::Interception;
pub use lists::TabOutcome;
pub use mutations::{ChangeType, Mutation, MutationError};
pub use options::{EditorOptions, DEFAULT_STORAGE_SLOT, DEFAULT_UNDO_LEVELS};
pub use post_effects::{ChangeCause, ChangeEvent, PersistSnapshot, PostEffect, PostEffectEngine, TraceChanges};
pub use raw::{RawDocument, RawError};
pub use render::Segment;
pub use session::EditorSession;
pub use style::{Color, FontSize, FontWeight, StyleMap, StyleName, VisualRule};
pub use undo_stack::{HistoryEntry, UndoStack};
