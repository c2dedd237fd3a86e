//! # Editor Session
//!
//! Owns the current snapshot for one editing surface together with its
//! history and post-effects.
//!
//! Every host event goes through the session:
//! - a character about to be typed is offered to the interceptor first and
//!   only inserted when not consumed
//! - key commands and tab/shift-tab are resolved against the snapshot
//! - each accepted change is recorded in history, then post-effects run
//!
//! A session opened on a store reads its slot once and persists after
//! every accepted change.

use markpad_common::KeyValueStore;

use crate::commands::{CommandAction, KeyCommand};
use crate::document::{Document, Selection};
use crate::errors::EditorResult;
use crate::interceptor;
use crate::mutations::{ChangeType, Mutation};
use crate::options::EditorOptions;
use crate::post_effects::{ChangeCause, ChangeEvent, PostEffect, PostEffectEngine};
use crate::raw;
use crate::undo_stack::UndoStack;

#[derive(Debug)]
pub struct EditorSession {
    document: Document,
    history: UndoStack,
    effects: PostEffectEngine,
    options: EditorOptions,
}

impl EditorSession {
    /// Session over an in-memory document, without persistence
    pub fn new(document: Document, options: EditorOptions) -> Self {
        Self {
            document,
            history: UndoStack::with_max_levels(options.undo_levels),
            effects: PostEffectEngine::new(),
            options,
        }
    }

    /// Open a session on the content stored in the configured slot
    ///
    /// A missing slot yields an empty document. Unreadable or malformed
    /// content is logged and also yields an empty document. The caret is
    /// placed at the end of the content.
    pub fn open(store: Box<dyn KeyValueStore>, options: EditorOptions) -> Self {
        let slot = options.storage_slot.clone();
        let document = load_document(&*store, &slot);

        Self {
            document,
            history: UndoStack::with_max_levels(options.undo_levels),
            effects: PostEffectEngine::with_persistence(store, slot),
            options,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    /// Register an extra post-effect
    pub fn add_effect(&mut self, effect: impl PostEffect + 'static) {
        self.effects.push(effect);
    }

    /// Offer input about to be inserted at the caret
    ///
    /// Returns `true` when the input was consumed by autoformatting and
    /// must not be inserted.
    pub fn handle_before_input(&mut self, chars: &str) -> EditorResult<bool> {
        let interception = interceptor::before_insert(chars, &self.document)?;
        if interception.consumed {
            self.commit(interception.snapshot, ChangeType::ApplyInlineStyle);
        }
        Ok(interception.consumed)
    }

    /// Insert text at the selection, replacing any selected range
    pub fn insert_text(&mut self, text: &str) -> EditorResult<()> {
        if text.is_empty() {
            return Ok(());
        }

        let selection = self.document.selection();
        let mutation = Mutation::InsertText {
            block_key: selection.block_key.clone(),
            start: selection.start(),
            end: selection.end(),
            text: text.to_string(),
        };
        self.apply_mutations(&[mutation])
    }

    /// Type text one character at a time, as a keyboard would
    ///
    /// A newline splits the block.
    pub fn type_text(&mut self, text: &str) -> EditorResult<()> {
        let mut buf = [0u8; 4];
        for c in text.chars() {
            if c == '\n' {
                self.handle_key_command(&KeyCommand::SplitBlock)?;
                continue;
            }

            let chars = c.encode_utf8(&mut buf);
            if !self.handle_before_input(chars)? {
                self.insert_text(chars)?;
            }
        }
        Ok(())
    }

    /// Run a named key command; returns whether it was handled
    pub fn handle_key_command(&mut self, command: &KeyCommand) -> EditorResult<bool> {
        match interceptor::handle_key_command(command, &self.document) {
            CommandAction::Mutate(mutations) => {
                self.apply_mutations(&mutations)?;
                Ok(true)
            }
            CommandAction::Undo => {
                self.undo();
                Ok(true)
            }
            CommandAction::Redo => {
                self.redo();
                Ok(true)
            }
            CommandAction::NotHandled => Ok(false),
        }
    }

    /// Tab (or shift-tab); returns whether the host must skip its default
    pub fn on_tab(&mut self, shift: bool) -> EditorResult<bool> {
        let outcome = interceptor::on_tab(&self.document, shift, self.options.max_list_depth);
        if let Some(mutation) = outcome.mutation {
            self.apply_mutations(&[mutation])?;
        }
        Ok(outcome.handled)
    }

    /// Explicit save request; content is already persisted on change
    pub fn save(&mut self) -> EditorResult<bool> {
        self.handle_key_command(&KeyCommand::Save)
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.document) {
            Some(previous) => {
                self.document = previous;
                self.run_effects(ChangeCause::Undo);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(&self.document) {
            Some(next) => {
                self.document = next;
                self.run_effects(ChangeCause::Redo);
                true
            }
            None => false,
        }
    }

    /// Move the selection; ends the current typing step
    pub fn select(&mut self, selection: Selection) -> EditorResult<()> {
        self.document = self.document.with_selection(selection)?;
        self.history.seal();
        Ok(())
    }

    /// Serialized raw content of the current snapshot
    pub fn raw_content(&self) -> EditorResult<String> {
        Ok(raw::to_raw_json(&self.document)?)
    }

    /// Apply mutations in order as a single history step
    fn apply_mutations(&mut self, mutations: &[Mutation]) -> EditorResult<()> {
        let Some(last) = mutations.last() else {
            return Ok(());
        };

        let mut next = self.document.clone();
        for mutation in mutations {
            next = next.apply(mutation)?;
        }
        self.commit(next, last.change_type());
        Ok(())
    }

    fn commit(&mut self, next: Document, change_type: ChangeType) {
        self.history.record(&self.document, change_type);
        self.document = next;
        self.run_effects(ChangeCause::Edit(change_type));
    }

    fn run_effects(&mut self, cause: ChangeCause) {
        self.effects.run(&ChangeEvent {
            snapshot: &self.document,
            cause,
        });
    }
}

fn load_document(store: &dyn KeyValueStore, slot: &str) -> Document {
    let stored = match store.get(slot) {
        Ok(stored) => stored,
        Err(e) => {
            tracing::warn!("Could not read stored content from {:?}: {}", slot, e);
            None
        }
    };

    let Some(json) = stored else {
        return Document::empty();
    };

    match raw::from_raw_json(&json) {
        Ok(doc) => {
            tracing::debug!("Loaded {} blocks from {:?}", doc.block_count(), slot);
            doc.with_caret_at_end()
        }
        Err(e) => {
            tracing::warn!("Ignoring malformed stored content in {:?}: {}", slot, e);
            Document::empty()
        }
    }
}
