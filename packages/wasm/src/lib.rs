use markpad_common::{KeyValueStore, MemoryStore};
use markpad_editor::render::segments;
use markpad_editor::{
    BlockKey, EditorOptions, EditorSession, KeyCommand, Selection, StyleMap, StyleName,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(context: &str, e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, e))
}

/// Editor session driven by browser events
///
/// The page owns real storage: it passes the stored raw content in and
/// reads `storedContent()` back after each event to write it out.
#[wasm_bindgen]
pub struct EditorHandle {
    session: EditorSession,
    store: MemoryStore,
    slot: String,
}

#[derive(Serialize)]
struct RenderedSegment<'a> {
    text: &'a str,
    styles: &'a [StyleName],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderedBlock<'a> {
    key: &'a str,
    #[serde(rename = "type")]
    kind: markpad_editor::BlockKind,
    depth: u8,
    segments: Vec<RenderedSegment<'a>>,
}

#[wasm_bindgen]
impl EditorHandle {
    /// Open a session over previously stored raw content
    ///
    /// `options` is an optional JSON object of editor options.
    #[wasm_bindgen(constructor)]
    pub fn new(stored: Option<String>, options: Option<String>) -> Result<EditorHandle, JsValue> {
        let options: EditorOptions = match options {
            Some(json) => serde_json::from_str(&json).map_err(|e| js_error("Invalid options", e))?,
            None => EditorOptions::default(),
        };

        let slot = options.storage_slot.clone();
        let store = match stored {
            Some(content) => MemoryStore::with_slot(&slot, &content),
            None => MemoryStore::new(),
        };

        Ok(Self {
            session: EditorSession::open(Box::new(store.clone()), options),
            store,
            slot,
        })
    }

    /// Returns `true` when the input was consumed and must not be inserted
    #[wasm_bindgen(js_name = handleBeforeInput)]
    pub fn handle_before_input(&mut self, chars: &str) -> Result<bool, JsValue> {
        self.session
            .handle_before_input(chars)
            .map_err(|e| js_error("Input error", e))
    }

    #[wasm_bindgen(js_name = insertText)]
    pub fn insert_text(&mut self, text: &str) -> Result<(), JsValue> {
        self.session
            .insert_text(text)
            .map_err(|e| js_error("Insert error", e))
    }

    /// Returns `"handled"` or `"not-handled"`
    #[wasm_bindgen(js_name = handleKeyCommand)]
    pub fn handle_key_command(&mut self, command: &str) -> Result<String, JsValue> {
        let handled = self
            .session
            .handle_key_command(&KeyCommand::from(command))
            .map_err(|e| js_error("Command error", e))?;
        Ok(handled_str(handled).to_string())
    }

    #[wasm_bindgen(js_name = onTab)]
    pub fn on_tab(&mut self, shift: bool) -> Result<bool, JsValue> {
        self.session.on_tab(shift).map_err(|e| js_error("Tab error", e))
    }

    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.session.redo()
    }

    pub fn save(&mut self) -> Result<String, JsValue> {
        let handled = self.session.save().map_err(|e| js_error("Save error", e))?;
        Ok(handled_str(handled).to_string())
    }

    /// Place the selection inside one block
    pub fn select(&mut self, block_key: &str, anchor: usize, focus: usize) -> Result<(), JsValue> {
        self.session
            .select(Selection::range(BlockKey::new(block_key), anchor, focus))
            .map_err(|e| js_error("Selection error", e))
    }

    /// Raw content of the current snapshot
    #[wasm_bindgen(js_name = rawContent)]
    pub fn raw_content(&self) -> Result<String, JsValue> {
        self.session
            .raw_content()
            .map_err(|e| js_error("Serialization error", e))
    }

    /// Content last written by the persistence hook
    #[wasm_bindgen(js_name = storedContent)]
    pub fn stored_content(&self) -> Option<String> {
        self.store.get(&self.slot).ok().flatten()
    }

    /// Text of the block holding the caret
    #[wasm_bindgen(js_name = blockText)]
    pub fn block_text(&self) -> String {
        self.session.document().current_block().text.clone()
    }

    #[wasm_bindgen(js_name = plainText)]
    pub fn plain_text(&self) -> String {
        self.session.document().plain_text()
    }

    /// Style name → visual rule, as JSON
    #[wasm_bindgen(js_name = styleMap)]
    pub fn style_map(&self) -> String {
        StyleMap::new().to_json().to_string()
    }

    /// Blocks split into uniformly styled segments, as JSON
    #[wasm_bindgen(js_name = renderBlocks)]
    pub fn render_blocks(&self) -> Result<String, JsValue> {
        let map = StyleMap::new();
        let doc = self.session.document();

        let blocks: Vec<_> = doc.blocks().map(|block| (block, segments(block, &map))).collect();
        let rendered: Vec<RenderedBlock<'_>> = blocks
            .iter()
            .map(|(block, segs)| RenderedBlock {
                key: block.key.as_str(),
                kind: block.kind,
                depth: block.depth,
                segments: segs
                    .iter()
                    .map(|segment| RenderedSegment {
                        text: block.slice(segment.range.clone()),
                        styles: &segment.styles,
                    })
                    .collect(),
            })
            .collect();

        serde_json::to_string(&rendered).map_err(|e| js_error("Serialization error", e))
    }
}

fn handled_str(handled: bool) -> &'static str {
    if handled {
        "handled"
    } else {
        "not-handled"
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_invalid_options_are_rejected() {
        assert!(EditorHandle::new(None, Some("{".to_string())).is_err());
    }
}
