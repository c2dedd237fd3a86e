mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{edit, init, reset, show, EditArgs, InitArgs, ResetArgs, ShowArgs};

/// Markpad - rich-text notes with markdown-style autoformatting
#[derive(Parser, Debug)]
#[command(name = "markpad")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a markpad.config.json in the current directory
    Init(InitArgs),

    /// Apply edit directives read from stdin to the stored document
    Edit(EditArgs),

    /// Render the stored document
    Show(ShowArgs),

    /// Clear the stored document
    Reset(ResetArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Init(args) => init(args, &cwd),
                Command::Edit(args) => edit(args, &cwd),
                Command::Show(args) => show(args, &cwd),
                Command::Reset(args) => reset(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
