//! CLI command definitions and handlers.

pub mod assets;
pub mod run;

use clap::{Parser, Subcommand};

/// Emojify - Overlay expression-matched emoji on the faces in your photos
#[derive(Parser)]
#[command(name = "emojify")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared run arguments (paths, thresholds, flags).
    #[command(flatten)]
    pub run: run::RunArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Overlay emoji on the faces in photos
    Run(run::RunArgs),
    /// Inspect the emoji sticker artwork
    Assets(assets::AssetsArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every photo had at least one face.
    Success = 0,
    /// At least one photo had no faces.
    NoFacesFound = 1,
    /// A fatal error occurred.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
