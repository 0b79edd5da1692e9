//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

use crate::application::services::TraversalOrder;
use crate::domain::{Execution, SortAlgorithm};

/// Fork-join parallelism demos: parallel tree traversal and parallel sorting
#[derive(Parser, Debug)]
#[command(name = "forkjoin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (repeat for more: -d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Worker threads (overrides config)
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    /// Additional config file
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a tree by level-order insertion and traverse it in parallel
    Traverse {
        /// Values to insert (prompts interactively when omitted)
        #[arg(allow_negative_numbers = true)]
        values: Vec<i32>,
        /// Traversal to run
        #[arg(short, long, value_enum, default_value_t = OrderArg::Both)]
        order: OrderArg,
        /// Print the tree shape before traversing
        #[arg(long)]
        show_tree: bool,
    },

    /// Sort values with the selected variants
    Sort {
        /// Values to sort
        #[arg(allow_negative_numbers = true, conflicts_with = "random")]
        values: Vec<i32>,
        /// Sort N random values instead
        #[arg(short, long, value_name = "N")]
        random: Option<usize>,
        /// Seed for --random
        #[arg(long, requires = "random")]
        seed: Option<u64>,
        /// Algorithm(s) to run
        #[arg(short, long, value_enum, default_value_t = AlgorithmArg::All)]
        algorithm: AlgorithmArg,
        /// Execution mode(s) to run
        #[arg(short, long, value_enum, default_value_t = ExecutionArg::Both)]
        execution: ExecutionArg,
    },

    /// Time sequential vs. parallel bubble and merge sort on random arrays
    Bench {
        /// Array sizes (overrides config)
        #[arg(short, long, value_delimiter = ',')]
        sizes: Vec<usize>,
        /// RNG seed (overrides config)
        #[arg(long)]
        seed: Option<u64>,
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

    /// Create global config from template
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Print config template
    Template,

    /// Show config paths
    Path,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderArg {
    Bfs,
    Dfs,
    Both,
}

impl From<OrderArg> for TraversalOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Bfs => TraversalOrder::Bfs,
            OrderArg::Dfs => TraversalOrder::Dfs,
            OrderArg::Both => TraversalOrder::Both,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmArg {
    Bubble,
    Merge,
    All,
}

impl AlgorithmArg {
    pub fn algorithms(self) -> Vec<SortAlgorithm> {
        match self {
            AlgorithmArg::Bubble => vec![SortAlgorithm::Bubble],
            AlgorithmArg::Merge => vec![SortAlgorithm::Merge],
            AlgorithmArg::All => SortAlgorithm::ALL.to_vec(),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionArg {
    Sequential,
    Parallel,
    Both,
}

impl ExecutionArg {
    pub fn executions(self) -> Vec<Execution> {
        match self {
            ExecutionArg::Sequential => vec![Execution::Sequential],
            ExecutionArg::Parallel => vec![Execution::Parallel],
            ExecutionArg::Both => Execution::ALL.to_vec(),
        }
    }
}
