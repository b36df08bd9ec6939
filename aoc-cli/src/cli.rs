//! CLI argument parsing using clap

use aoc_dispatch::CallOptions;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Advent of Code puzzle dispatcher
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Resolve and run Advent of Code puzzle units", version)]
pub struct Args {
    /// Settings file (defaults to ./aoc.toml, then the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Root of the input/example layout
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Rebuild units before dispatching
    #[arg(long, global = true)]
    pub auto_compile: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Puzzle selection; omitted fields fall back to settings, then today's date
#[derive(ClapArgs, Debug, Clone, Copy, Default)]
pub struct KeyArgs {
    /// Puzzle year
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Puzzle day
    #[arg(short, long)]
    pub day: Option<u8>,
}

impl KeyArgs {
    pub fn options(self) -> CallOptions {
        CallOptions {
            year: self.year,
            day: self.day,
            ..CallOptions::default()
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one part of a puzzle unit
    Run {
        #[command(flatten)]
        key: KeyArgs,

        /// Part to run
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=2))]
        part: u8,

        /// Run on example N instead of the puzzle input (`-e` alone means 0)
        #[arg(short, long, num_args = 0..=1, default_missing_value = "0", conflicts_with = "text")]
        example: Option<usize>,

        /// Run on this text instead of a file
        #[arg(long)]
        text: Option<String>,

        /// Report how long the call took (`--time false` turns configured timing off)
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        time: Option<bool>,
    },

    /// Print the path of the puzzle input or of an example
    Path {
        #[command(flatten)]
        key: KeyArgs,

        /// Example index
        #[arg(short, long, num_args = 0..=1, default_missing_value = "0")]
        example: Option<usize>,
    },

    /// Print the puzzle input or an example
    Text {
        #[command(flatten)]
        key: KeyArgs,

        /// Example index
        #[arg(short, long, num_args = 0..=1, default_missing_value = "0")]
        example: Option<usize>,
    },

    /// Print every example of a puzzle
    Examples {
        #[command(flatten)]
        key: KeyArgs,
    },

    /// List the registered units
    Units,
}
