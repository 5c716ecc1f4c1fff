//! CLI argument definitions using clap

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Composite file-system trees: uniform show/delete traversal over files and folders
#[derive(Parser, Debug)]
#[command(name = "fstree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short = 'd', long = "debug", action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Include hidden entries when mirroring a directory
    #[arg(long, global = true)]
    pub hidden: bool,

    /// Levels to mirror below the scan root
    #[arg(long, value_name = "N", global = true)]
    pub max_depth: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk the built-in sample tree: show report, rendering, delete report
    Demo,

    /// Mirror a directory and print its show report
    Show {
        /// Directory (or file) to mirror
        #[arg(value_hint = ValueHint::DirPath)]
        dir: String,
    },

    /// Mirror a directory and print it as a tree
    Tree {
        /// Directory (or file) to mirror
        #[arg(value_hint = ValueHint::DirPath)]
        dir: String,
    },

    /// Mirror a directory and print its deletion report (dry-run, never touches the disk)
    Delete {
        /// Directory (or file) to mirror
        #[arg(value_hint = ValueHint::DirPath)]
        dir: String,
    },

    /// Print the file paths of a mirrored directory, pre-order
    Leaves {
        /// Directory to mirror
        #[arg(value_hint = ValueHint::DirPath)]
        dir: String,
    },

    /// Print total size and node count of a mirrored directory
    Size {
        /// Directory to mirror
        #[arg(value_hint = ValueHint::DirPath)]
        dir: String,
    },

    /// Build a tree from a sketch file and print its show report
    Sketch {
        /// Sketch file (indented outline)
        #[arg(value_hint = ValueHint::FilePath)]
        file: String,

        /// Print the tree rendering instead of the show report
        #[arg(long)]
        render: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,
}
