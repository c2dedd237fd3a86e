//! Persistence through the session's save-after-change hook

use markpad_common::{CommonError, CommonResult, FileStore, KeyValueStore, MemoryStore};
use markpad_editor::{raw, EditorOptions, EditorSession, StyleName};

#[derive(Debug)]
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> CommonResult<Option<String>> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> CommonResult<()> {
        Err(CommonError::Storage("read-only".to_string()))
    }

    fn remove(&mut self, _key: &str) -> CommonResult<()> {
        Err(CommonError::Storage("read-only".to_string()))
    }
}

#[test]
fn test_invalid_stored_data_starts_empty() {
    for stored in ["", "null", "{", "[1,2]", r#"{"blocks":[{"key":"a"}]}"#] {
        let store = MemoryStore::with_slot("editorContent", stored);
        let session = EditorSession::open(Box::new(store), EditorOptions::default());
        assert_eq!(session.document().plain_text(), "", "{stored:?}");
        assert_eq!(session.document().block_count(), 1);
    }
}

#[test]
fn test_overflowing_style_offset_starts_empty() {
    let stored = r#"{"blocks":[{"key":"a","text":"x","type":"unstyled","depth":0,
        "inlineStyleRanges":[{"offset":18446744073709551615,"length":1,"style":"STRONG"}],
        "entityRanges":[],"data":{}}],"entityMap":{}}"#;
    let store = MemoryStore::with_slot("editorContent", stored);

    let session = EditorSession::open(Box::new(store), EditorOptions::default());
    assert_eq!(session.document().plain_text(), "");
    assert_eq!(session.document().block_count(), 1);
}

#[test]
fn test_every_change_is_persisted() {
    let store = MemoryStore::new();
    let mut session = EditorSession::open(Box::new(store.clone()), EditorOptions::default());

    session.type_text("a").unwrap();
    let first = store.get("editorContent").unwrap().unwrap();
    assert_eq!(raw::from_raw_json(&first).unwrap().plain_text(), "a");

    session.type_text("b").unwrap();
    session.undo();
    let after_undo = store.get("editorContent").unwrap().unwrap();
    assert_eq!(raw::from_raw_json(&after_undo).unwrap().plain_text(), "");
}

#[test]
fn test_custom_slot_is_used() {
    let store = MemoryStore::new();
    let options = EditorOptions {
        storage_slot: "draft".to_string(),
        ..EditorOptions::default()
    };
    let mut session = EditorSession::open(Box::new(store.clone()), options);
    session.type_text("x").unwrap();

    assert!(store.get("draft").unwrap().is_some());
    assert!(store.get("editorContent").unwrap().is_none());
}

#[test]
fn test_failed_write_keeps_the_edit() {
    let mut session = EditorSession::open(Box::new(ReadOnlyStore), EditorOptions::default());
    session.type_text("# ").unwrap();

    let block = session.document().current_block();
    assert_eq!(block.text, "#");
    assert_eq!(block.styles_at(0), vec![StyleName::Heading]);
}

#[test]
fn test_file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = FileStore::new(dir.path());
        let mut session = EditorSession::open(Box::new(store), EditorOptions::default());
        session.type_text("hi **").unwrap();
        session.type_text(" ").unwrap();
    }

    let store = FileStore::new(dir.path());
    let session = EditorSession::open(Box::new(store), EditorOptions::default());
    let block = session.document().current_block();
    assert_eq!(block.text, "hi **");
    assert_eq!(block.styles_at(3), vec![StyleName::Accent]);
    assert_eq!(block.styles_at(2), Vec::<StyleName>::new());
}
