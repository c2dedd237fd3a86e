//! # Post-Effect System
//!
//! Hooks that run after every accepted state change.
//!
//! ## Design
//!
//! Post-effects observe the snapshot a change produced; they never alter
//! it. A failing effect is logged and does not roll the change back:
//! - **PersistSnapshot**: writes the raw content into a storage slot
//! - **TraceChanges**: logs each transition

use markpad_common::KeyValueStore;

use crate::document::Document;
use crate::mutations::ChangeType;
use crate::raw;

/// Why the current snapshot changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    Edit(ChangeType),
    Undo,
    Redo,
}

/// A state transition that has already been accepted
#[derive(Debug, Clone, Copy)]
pub struct ChangeEvent<'a> {
    pub snapshot: &'a Document,
    pub cause: ChangeCause,
}

/// Effect run after each accepted change
pub trait PostEffect: std::fmt::Debug {
    fn after_change(&mut self, event: &ChangeEvent<'_>);
}

/// Write the serialized snapshot to a storage slot
pub struct PersistSnapshot {
    store: Box<dyn KeyValueStore>,
    slot: String,
    failures: usize,
}

impl PersistSnapshot {
    pub fn new(store: Box<dyn KeyValueStore>, slot: impl Into<String>) -> Self {
        Self {
            store,
            slot: slot.into(),
            failures: 0,
        }
    }

    /// Number of writes that failed so far
    pub fn failures(&self) -> usize {
        self.failures
    }
}

impl std::fmt::Debug for PersistSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistSnapshot")
            .field("slot", &self.slot)
            .field("failures", &self.failures)
            .finish_non_exhaustive()
    }
}

impl PostEffect for PersistSnapshot {
    fn after_change(&mut self, event: &ChangeEvent<'_>) {
        let result = raw::to_raw_json(event.snapshot)
            .map_err(|e| e.to_string())
            .and_then(|json| self.store.set(&self.slot, &json).map_err(|e| e.to_string()));

        if let Err(e) = result {
            self.failures += 1;
            tracing::error!("Failed to persist editor content to {:?}: {}", self.slot, e);
        }
    }
}

/// Log each transition
#[derive(Debug)]
pub struct TraceChanges;

impl PostEffect for TraceChanges {
    fn after_change(&mut self, event: &ChangeEvent<'_>) {
        tracing::debug!(
            "Change {:?} -> version {} ({} blocks)",
            event.cause,
            event.snapshot.version(),
            event.snapshot.block_count()
        );
    }
}

/// Runs every registered effect, in registration order
#[derive(Debug)]
pub struct PostEffectEngine {
    effects: Vec<Box<dyn PostEffect>>,
}

impl PostEffectEngine {
    /// Create engine with the tracing effect only
    pub fn new() -> Self {
        Self {
            effects: vec![Box::new(TraceChanges)],
        }
    }

    /// Create engine that also persists to `slot` of `store`
    pub fn with_persistence(store: Box<dyn KeyValueStore>, slot: impl Into<String>) -> Self {
        let mut engine = Self::new();
        engine.push(PersistSnapshot::new(store, slot));
        engine
    }

    pub fn push(&mut self, effect: impl PostEffect + 'static) {
        self.effects.push(Box::new(effect));
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Run all effects for an accepted change
    pub fn run(&mut self, event: &ChangeEvent<'_>) {
        for effect in &mut self.effects {
            effect.after_change(event);
        }
    }
}

impl Default for PostEffectEngine {
    fn default() -> Self {
        Self::new()
    }
}
