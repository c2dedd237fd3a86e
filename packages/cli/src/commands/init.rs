use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use markpad_editor::EditorOptions;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory for persisted content
    #[arg(short, long, default_value = ".markpad")]
    pub store_dir: String,

    /// Storage slot name
    #[arg(long, default_value = "editorContent")]
    pub slot: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Markpad...".bright_blue().bold());

    let config = Config {
        store_dir: args.store_dir.clone(),
        editor: EditorOptions {
            storage_slot: args.slot,
            ..EditorOptions::default()
        },
    };

    let store_dir = config.get_store_dir(cwd);
    if !store_dir.exists() {
        fs::create_dir_all(&store_dir)?;
        println!("  {} Created {}/", "✓".green(), args.store_dir);
    }

    // Write config file
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Markpad initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: echo 'type hi ** ' | markpad edit");
    println!("  2. Run: markpad show");

    Ok(())
}
