use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::{ColoredString, Colorize};
use markpad_common::{FileStore, KeyValueStore};
use markpad_editor::render::segments;
use markpad_editor::{
    raw, Block, BlockKind, Color, Document, FontSize, FontWeight, StyleMap, VisualRule,
};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Print the style map instead of the document
    #[arg(long)]
    pub styles: bool,

    /// Print the stored raw JSON
    #[arg(long, conflicts_with = "styles")]
    pub raw: bool,
}

pub fn show(args: ShowArgs, cwd: &str) -> Result<()> {
    if args.styles {
        print_style_map(&StyleMap::new());
        return Ok(());
    }

    let config = Config::load(cwd)?;
    let store = FileStore::new(config.get_store_dir(cwd));
    let slot = &config.editor.storage_slot;

    let Some(json) = store.get(slot)? else {
        println!("{}", "(empty)".dimmed());
        return Ok(());
    };

    if args.raw {
        let value: serde_json::Value = serde_json::from_str(&json)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let doc = raw::from_raw_json(&json)?;
    print_document(&doc, &StyleMap::new());
    Ok(())
}

/// Render every block with terminal styling
pub fn print_document(doc: &Document, map: &StyleMap) {
    let mut ordinals: Vec<usize> = Vec::new();

    for block in doc.blocks() {
        let prefix = list_prefix(block, &mut ordinals);
        let line: String = segments(block, map)
            .iter()
            .map(|segment| styled(block.slice(segment.range.clone()), &segment.rule).to_string())
            .collect();
        println!("{}{}", prefix, line);
    }
}

fn print_style_map(map: &StyleMap) {
    for (name, rule) in map.iter() {
        println!("{:<14} {}", name.as_str().bright_white(), describe(&rule));
    }
}

fn describe(rule: &VisualRule) -> String {
    let mut parts = Vec::new();
    if let Some(color) = rule.color {
        parts.push(match color {
            Color::Black => "color: black",
            Color::Red => "color: red",
        });
    }
    if rule.font_size == FontSize::XxxLarge {
        parts.push("font-size: xxx-large");
    }
    match rule.font_weight {
        FontWeight::Normal => {}
        FontWeight::Bold => parts.push("font-weight: bold"),
        FontWeight::Bolder => parts.push("font-weight: bolder"),
    }
    if rule.underline {
        parts.push("text-decoration: underline");
    }
    parts.join("; ")
}

fn styled(text: &str, rule: &VisualRule) -> ColoredString {
    let mut out = text.normal();
    if rule.font_weight != FontWeight::Normal || rule.font_size != FontSize::Normal {
        out = out.bold();
    }
    if rule.underline {
        out = out.underline();
    }
    if rule.color == Some(Color::Red) {
        out = out.red();
    }
    out
}

/// Bullet or number for list items, indented by depth
///
/// `ordinals` tracks the running number per depth of the current
/// ordered list.
fn list_prefix(block: &Block, ordinals: &mut Vec<usize>) -> String {
    let depth = block.depth as usize;
    let indent = "  ".repeat(depth);

    match block.kind {
        BlockKind::Unstyled => {
            ordinals.clear();
            String::new()
        }
        BlockKind::UnorderedListItem => {
            ordinals.truncate(depth);
            format!("{}• ", indent)
        }
        BlockKind::OrderedListItem => {
            ordinals.truncate(depth + 1);
            ordinals.resize(depth + 1, 0);
            ordinals[depth] += 1;
            format!("{}{}. ", indent, ordinals[depth])
        }
    }
}
