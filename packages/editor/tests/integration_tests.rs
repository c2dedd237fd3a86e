//! Integration tests for the editor crate

use markpad_editor::autoformat::{recognize_at, Trigger};
use markpad_editor::interceptor::before_insert;
use markpad_editor::{
    Block, BlockKind, ChangeType, Document, EditorOptions, EditorSession, KeyCommand, StyleName,
    StyleRun,
};

fn session() -> EditorSession {
    EditorSession::new(Document::empty(), EditorOptions::default())
}

fn at_end(text: &str) -> Document {
    Document::from_blocks(vec![Block::new("a", text)])
        .unwrap()
        .with_caret_at_end()
}

#[test]
fn test_heading_scenario_from_empty_document() {
    let mut session = session();

    assert!(!session.handle_before_input("#").unwrap());
    session.insert_text("#").unwrap();
    assert!(session.handle_before_input(" ").unwrap());

    let block = session.document().current_block();
    assert_eq!(block.text, "#");
    assert_eq!(block.style_runs, vec![StyleRun::new(0..1, StyleName::Heading)]);
    assert_eq!(session.document().selection().focus, 1);
}

#[test]
fn test_accent_scenario_in_sentence() {
    let mut session = EditorSession::new(at_end("hi **"), EditorOptions::default());

    assert!(session.handle_before_input(" ").unwrap());

    let block = session.document().current_block();
    assert_eq!(block.text, "hi **");
    assert_eq!(block.style_runs, vec![StyleRun::new(3..5, StyleName::Accent)]);
}

#[test]
fn test_every_trailing_hash_is_a_heading() {
    for text in ["#", "title #", "##", "*#", "日本 #"] {
        let caret = text.chars().count();
        let trigger = recognize_at(text, caret, ' ').unwrap();
        assert_eq!(
            trigger,
            Trigger {
                range: caret - 1..caret,
                style: StyleName::Heading,
                trigger_char: ' ',
            },
            "{text:?}"
        );
    }
}

#[test]
fn test_marker_runs_map_to_styles() {
    let cases = [
        ("*", StyleName::Strong, 1),
        ("**", StyleName::Accent, 2),
        ("***", StyleName::EmphasisLine, 3),
        ("a *", StyleName::Strong, 1),
        ("x**", StyleName::Accent, 2),
        ("é ***", StyleName::EmphasisLine, 3),
    ];

    for (text, style, n) in cases {
        let caret = text.chars().count();
        let trigger = recognize_at(text, caret, ' ').unwrap();
        assert_eq!(trigger.style, style, "{text:?}");
        assert_eq!(trigger.range, caret - n..caret, "{text:?}");
    }
}

#[test]
fn test_marker_overrun_passes_through() {
    for text in ["****", "*****", "a ********"] {
        let doc = at_end(text);
        let result = before_insert(" ", &doc).unwrap();
        assert!(!result.consumed, "{text:?}");
        assert_eq!(result.snapshot, doc);
    }

    // The session then inserts the space as ordinary text
    let mut session = EditorSession::new(at_end("****"), EditorOptions::default());
    session.type_text(" ").unwrap();
    assert_eq!(session.document().plain_text(), "**** ");
    assert!(session.document().current_block().style_runs.is_empty());
}

#[test]
fn test_non_matching_input_is_identity() {
    for (text, input) in [("", "a"), ("hello", "x"), ("hello", " "), ("#", "#"), ("*", "*"), ("", " ")] {
        let doc = at_end(text);
        let result = before_insert(input, &doc).unwrap();
        assert!(!result.consumed);
        assert_eq!(result.snapshot, doc);
    }
}

#[test]
fn test_typed_text_inherits_trigger_style() {
    let mut session = session();
    session.type_text("* bold").unwrap();

    let block = session.document().current_block();
    assert_eq!(block.text, "*bold");
    assert!((0..5).all(|i| block.styles_at(i) == vec![StyleName::Strong]));
}

#[test]
fn test_undo_redo_around_trigger() {
    let mut session = session();
    session.type_text("hi **").unwrap();
    session.type_text(" ").unwrap();
    assert_eq!(
        session.history().next_undo_change(),
        Some(ChangeType::ApplyInlineStyle)
    );

    assert!(session.handle_key_command(&KeyCommand::Undo).unwrap());
    assert!(session.document().current_block().style_runs.is_empty());
    assert_eq!(session.document().plain_text(), "hi **");

    assert!(session.handle_key_command(&KeyCommand::Redo).unwrap());
    assert_eq!(
        session.document().current_block().style_runs,
        vec![StyleRun::new(3..5, StyleName::Accent)]
    );
}

#[test]
fn test_multi_block_editing() {
    let mut session = session();
    session.type_text("# \nbody **").unwrap();
    session.type_text(" ").unwrap();

    let doc = session.document();
    assert_eq!(doc.block_count(), 2);
    assert_eq!(doc.plain_text(), "#\nbody **");

    let second = doc.block_at(1).unwrap();
    assert_eq!(second.styles_at(0), vec![StyleName::Heading]);
    assert_eq!(second.styles_at(5), vec![StyleName::Heading, StyleName::Accent]);
}

#[test]
fn test_list_depth_is_bounded() {
    let mut session = session();
    session.type_text("item").unwrap();
    assert!(session.handle_key_command(&KeyCommand::ToggleUnorderedList).unwrap());

    for _ in 0..10 {
        assert!(session.on_tab(false).unwrap());
    }
    let block = session.document().current_block();
    assert_eq!(block.kind, BlockKind::UnorderedListItem);
    assert_eq!(block.depth, 4);

    assert!(session.on_tab(true).unwrap());
    assert_eq!(session.document().current_block().depth, 3);
}

#[test]
fn test_tab_outside_list_is_not_handled() {
    let mut session = session();
    session.type_text("plain").unwrap();
    assert!(!session.on_tab(false).unwrap());
    assert_eq!(session.document().current_block().depth, 0);
}

#[test]
fn test_unknown_command_is_not_handled() {
    let mut session = session();
    assert!(!session
        .handle_key_command(&KeyCommand::from("italic"))
        .unwrap());
}
