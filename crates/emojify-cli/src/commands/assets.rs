//! Assets command - inspect the emoji sticker artwork.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use emojify_adapters::{default_assets_dir, AssetLibrary};

use crate::config::AppConfig;

/// Arguments for the assets command
#[derive(Args)]
pub struct AssetsArgs {
    /// Sticker directory to inspect (overrides default and config)
    #[arg(long, value_name = "DIR")]
    pub assets_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: AssetsCommand,
}

/// Assets subcommands
#[derive(Subcommand)]
pub enum AssetsCommand {
    /// List which stickers are installed
    List,
    /// Print the sticker directory path
    Path,
}

/// Run the assets command.
pub fn run(args: &AssetsArgs, config: &AppConfig) -> Result<()> {
    let dir = args
        .assets_dir
        .clone()
        .or_else(|| config.assets.dir.clone())
        .unwrap_or_else(default_assets_dir);

    match args.command {
        AssetsCommand::List => list_assets(&dir),
        AssetsCommand::Path => print_path(&dir),
    }
}

#[allow(clippy::unnecessary_wraps)]
fn list_assets(dir: &std::path::Path) -> Result<()> {
    let status = AssetLibrary::status(dir);

    println!("Sticker directory: {}", dir.display());
    println!();

    for entry in &status {
        let mark = if entry.installed { "✓" } else { "✗" };
        let file_name = entry
            .path
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
        println!("  {mark} {} ({file_name})", entry.emoji);
    }

    println!();
    let installed = status.iter().filter(|s| s.installed).count();
    println!("{installed}/{} stickers installed", status.len());

    Ok(())
}

#[allow(clippy::unnecessary_wraps)]
fn print_path(dir: &std::path::Path) -> Result<()> {
    println!("{}", dir.display());
    Ok(())
}
