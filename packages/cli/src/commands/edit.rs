use crate::commands::show::print_document;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use markpad_common::FileStore;
use markpad_editor::{EditorSession, KeyCommand, StyleMap};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Read directives from a file instead of stdin
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Print the document after the last directive
    #[arg(long)]
    pub show: bool,
}

/// One line of edit input
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Type text character by character; trailing spaces are kept
    Type(String),
    Enter,
    Command(KeyCommand),
    Tab,
    Untab,
    Undo,
    Redo,
    Save,
    Show,
}

#[derive(Error, Debug, PartialEq)]
pub enum DirectiveError {
    #[error("Unknown directive: {0}")]
    Unknown(String),

    #[error("Directive `{0}` needs an argument")]
    MissingArgument(&'static str),
}

impl FromStr for Directive {
    type Err = DirectiveError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (word, rest) = match line.split_once(' ') {
            Some((word, rest)) => (word, Some(rest)),
            None => (line, None),
        };

        match (word, rest) {
            ("type", Some(text)) if !text.is_empty() => Ok(Directive::Type(text.to_string())),
            ("type", _) => Err(DirectiveError::MissingArgument("type")),
            ("command", Some(name)) if !name.trim().is_empty() => {
                Ok(Directive::Command(KeyCommand::from(name.trim())))
            }
            ("command", _) => Err(DirectiveError::MissingArgument("command")),
            ("enter", None) => Ok(Directive::Enter),
            ("tab", None) => Ok(Directive::Tab),
            ("untab", None) => Ok(Directive::Untab),
            ("undo", None) => Ok(Directive::Undo),
            ("redo", None) => Ok(Directive::Redo),
            ("save", None) => Ok(Directive::Save),
            ("show", None) => Ok(Directive::Show),
            _ => Err(DirectiveError::Unknown(line.to_string())),
        }
    }
}

pub fn edit(args: EditArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = FileStore::new(config.get_store_dir(cwd));
    let mut session = EditorSession::open(Box::new(store), config.editor.clone());

    let input: Box<dyn BufRead> = match &args.file {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Cannot open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut applied = 0;
    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let directive = line
            .parse::<Directive>()
            .with_context(|| format!("line {}", index + 1))?;
        run(&mut session, &directive)?;
        applied += 1;
    }

    if args.show {
        print_document(session.document(), &StyleMap::new());
    }

    println!(
        "{} Applied {} directives ({} blocks)",
        "✓".green(),
        applied,
        session.document().block_count()
    );
    Ok(())
}

fn run(session: &mut EditorSession, directive: &Directive) -> Result<()> {
    match directive {
        Directive::Type(text) => session.type_text(text)?,
        Directive::Enter => {
            session.handle_key_command(&KeyCommand::SplitBlock)?;
        }
        Directive::Command(command) => {
            if !session.handle_key_command(command)? {
                println!("{} {} not handled", "·".dimmed(), command.name());
            }
        }
        Directive::Tab => {
            session.on_tab(false)?;
        }
        Directive::Untab => {
            session.on_tab(true)?;
        }
        Directive::Undo => {
            session.undo();
        }
        Directive::Redo => {
            session.redo();
        }
        Directive::Save => {
            session.save()?;
        }
        Directive::Show => print_document(session.document(), &StyleMap::new()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use markpad_editor::{Document, EditorOptions, StyleName};

    #[test]
    fn test_parse_directives() {
        assert_eq!("type # ".parse::<Directive>(), Ok(Directive::Type("# ".to_string())));
        assert_eq!("type  ".parse::<Directive>(), Ok(Directive::Type(" ".to_string())));
        assert_eq!("enter".parse::<Directive>(), Ok(Directive::Enter));
        assert_eq!(
            "command bold".parse::<Directive>(),
            Ok(Directive::Command(KeyCommand::Bold))
        );
        assert_eq!(
            "command italic".parse::<Directive>(),
            Ok(Directive::Command(KeyCommand::Unknown("italic".to_string())))
        );
        assert_eq!("untab".parse::<Directive>(), Ok(Directive::Untab));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "type".parse::<Directive>(),
            Err(DirectiveError::MissingArgument("type"))
        );
        assert_eq!(
            "command ".parse::<Directive>(),
            Err(DirectiveError::MissingArgument("command"))
        );
        assert!(matches!(
            "jump 3".parse::<Directive>(),
            Err(DirectiveError::Unknown(_))
        ));
    }

    #[test]
    fn test_run_directives() {
        let mut session = EditorSession::new(Document::empty(), EditorOptions::default());
        for line in ["type hi **", "type  ", "enter", "type item", "command toggle-unordered-list", "tab"] {
            run(&mut session, &line.parse().unwrap()).unwrap();
        }

        let doc = session.document();
        assert_eq!(doc.plain_text(), "hi **\nitem");
        assert_eq!(doc.block_at(0).unwrap().styles_at(3), vec![StyleName::Accent]);
        assert_eq!(doc.block_at(1).unwrap().depth, 1);
    }
}
