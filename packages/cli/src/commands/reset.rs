use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use markpad_common::{FileStore, KeyValueStore};

#[derive(Debug, Args)]
pub struct ResetArgs {
    /// Slot to clear (defaults to the configured slot)
    #[arg(long)]
    pub slot: Option<String>,
}

pub fn reset(args: ResetArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let slot = args.slot.unwrap_or(config.editor.storage_slot.clone());

    let mut store = FileStore::new(config.get_store_dir(cwd));
    store.remove(&slot)?;

    println!("{} Cleared {}", "✓".green(), slot.bright_white());
    Ok(())
}
