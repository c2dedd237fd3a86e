//! Autoformat benchmarks
//!
//! Recognition runs on every keystroke, so it must stay well under a
//! microsecond for ordinary block lengths.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use markpad_editor::autoformat::recognize_at;
use markpad_editor::interceptor::before_insert;
use markpad_editor::{Block, Document, EditorOptions, EditorSession};

fn recognize_short_block(c: &mut Criterion) {
    let text = "hi **";

    c.bench_function("recognize_short_block", |b| {
        b.iter(|| recognize_at(black_box(text), black_box(5), black_box(' ')))
    });
}

fn recognize_long_block(c: &mut Criterion) {
    let mut text = String::new();
    for i in 0..200 {
        text.push_str(&format!("sentence number {} with some words ", i));
    }
    text.push_str("***");
    let caret = text.chars().count();

    c.bench_function("recognize_long_block", |b| {
        b.iter(|| recognize_at(black_box(&text), black_box(caret), black_box(' ')))
    });
}

fn intercept_pass_through(c: &mut Criterion) {
    let doc = Document::from_blocks(vec![Block::new("a", "plain text without markers")])
        .unwrap()
        .with_caret_at_end();

    c.bench_function("intercept_pass_through", |b| {
        b.iter(|| before_insert(black_box("x"), black_box(&doc)))
    });
}

fn type_paragraph(c: &mut Criterion) {
    let input = "# Title\nsome ** red and * bold text with *** underline\n".repeat(5);

    c.bench_function("type_paragraph", |b| {
        b.iter(|| {
            let mut session = EditorSession::new(Document::empty(), EditorOptions::default());
            session.type_text(black_box(&input)).unwrap();
            session
        })
    });
}

criterion_group!(
    benches,
    recognize_short_block,
    recognize_long_block,
    intercept_pass_through,
    type_paragraph
);
criterion_main!(benches);
