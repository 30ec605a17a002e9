use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    name = "gamelink",
    version,
    about = "Finds the main executable of every game in a library folder and creates a shortcut for it",
    long_about = "gamelink treats each subfolder of the library root as one game, searches it for executables, \
                  ranks them by how much they look like the game's launcher and writes a .url shortcut for the winner."
)]
pub struct Cli {
    /// Library root; every direct subfolder is one game (prompted for when omitted)
    pub root: Option<PathBuf>,

    /// JSON config file (default: <root>/gamelink.json when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Shortcut and log directory (default: <root>/_Shortcuts)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Deepest level searched before the unrestricted walk
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Per-folder search budget in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Folders processed concurrently
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Select executables but write neither shortcuts nor logs
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,
}
