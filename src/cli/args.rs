//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::Traversal;

/// Interactive catalog of taxonomic classification paths (Class > Order > Family > Genus > Species)
#[derive(Parser, Debug)]
#[command(name = "taxtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug logging to stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath, env = "TAXTREE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Start with an empty tree instead of the example species
    #[arg(long, global = true)]
    pub no_seed: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive menu (default)
    Menu,

    /// Display the full taxonomy tree
    Show,

    /// List nodes in traversal order
    Traverse {
        /// Traversal order
        #[arg(short, long, value_enum, default_value_t = OrderArg::Pre)]
        order: OrderArg,
    },

    /// Search a taxonomic or common name
    Search {
        /// Name to look up (case-insensitive)
        name: String,
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
    /// Show effective settings
    Show,
    /// Show global config file path
    Path,
}

/// Traversal order as accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderArg {
    Pre,
    Post,
    Level,
}

impl From<OrderArg> for Traversal {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Pre => Traversal::PreOrder,
            OrderArg::Post => Traversal::PostOrder,
            OrderArg::Level => Traversal::LevelOrder,
        }
    }
}
