//! AOC CLI - Command-line interface for resolving and running Advent of Code units

mod cli;
mod config;
mod error;
mod logging;
mod output;
mod rebuild;

// Import aoc-solutions to link the unit plugins
use aoc_solutions as _;

use aoc_dispatch::{Dispatcher, InputSource, Part, PathLayout, UnitRegistry};
use clap::Parser;
use cli::{Args, Command};
use rebuild::CargoRebuilder;
use std::io;

fn main() {
    logging::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), error::CliError> {
    let settings = config::from_args(&args)?;
    let registry = UnitRegistry::from_plugins()?;

    let mut dispatcher = Dispatcher::builder(registry)
        .defaults(settings.defaults())
        .layout(PathLayout::new(&settings.data_dir))
        .rebuilder(CargoRebuilder::new())
        .build();
    let mut stdout = io::stdout();

    match args.command {
        Command::Run {
            key,
            part,
            example,
            text,
            time,
        } => {
            let mut options = key.options();
            options.time = time;
            let source = match (text, example) {
                (Some(text), _) => InputSource::Explicit(text),
                (None, Some(index)) => InputSource::FromExample(Some(index)),
                (None, None) => InputSource::FromInput,
            };
            let part = Part::from_number(part).unwrap_or(Part::One);
            let answer = dispatcher.invoke(part, source, &options)?;
            output::print_answer(&answer, &mut stdout)?;
        }
        Command::Path { key, example } => {
            let path = match example {
                Some(index) => dispatcher.example_path_for(&key.options().example(index))?,
                None => dispatcher.input_path_for(&key.options())?,
            };
            output::print_path(&path, &mut stdout)?;
        }
        Command::Text { key, example } => {
            let text = match example {
                Some(index) => dispatcher.example_text_for(&key.options().example(index))?,
                None => dispatcher.input_text_for(&key.options())?,
            };
            output::print_answer(&text, &mut stdout)?;
        }
        Command::Examples { key } => dispatcher.list_examples_for(&key.options())?,
        Command::Units => output::print_units(dispatcher.registry(), &mut stdout)?,
    }

    Ok(())
}
