//! Advent of Code Dispatch Library
//!
//! Resolves which puzzle is "current", binds each (year, day) to a solution
//! unit, loads puzzle and example text from a fixed file layout, and invokes
//! a unit's parts at runtime, optionally timed and preceded by a rebuild.
//!
//! # Overview
//!
//! This library provides:
//! - A two-part solution contract with an optional part 2 capability
//! - `#[aoc_unit]` to generate and register a unit, `#[aoc_harness]` for its paired test
//! - A registry keyed by [`PuzzleKey`] that rejects duplicate registrations
//! - Three-tier key resolution: call options, process defaults, then today's date
//! - A deterministic input/example path layout with lazy example enumeration
//! - A [`Dispatcher`] tying it together
//!
//! # Quick Example
//!
//! ```
//! use aoc_dispatch::{
//!     CallOptions, Dispatcher, FnUnit, InputSource, PuzzleKey, UnitRegistryBuilder,
//! };
//!
//! let registry = UnitRegistryBuilder::new()
//!     .register(
//!         PuzzleKey::new(2023, 1),
//!         FnUnit::new(|input| {
//!             Ok(input.lines().map(|l| l.parse::<i32>().unwrap()).sum::<i32>().to_string())
//!         }),
//!     )
//!     .unwrap()
//!     .build();
//!
//! let mut dispatcher = Dispatcher::builder(registry).build();
//! let options = CallOptions::new().year(2023).day(1);
//! let answer = dispatcher
//!     .part1(InputSource::Explicit("1\n2\n3".to_string()), &options)
//!     .unwrap();
//! assert_eq!(answer, "6");
//! ```
//!
//! # Generated Units
//!
//! ```ignore
//! use aoc_dispatch::aoc_unit;
//!
//! pub struct Day01;
//!
//! /// ```aoc
//! /// part1("1\n2\n3") => 6
//! /// ```
//! #[aoc_unit(year = 2023, day = 1)]
//! impl Day01 {
//!     pub fn part1(input: &str) -> anyhow::Result<i32> {
//!         Ok(input.lines().map(str::parse::<i32>).sum::<Result<_, _>>()?)
//!     }
//! }
//! ```
//!
//! Units submitted this way are collected by [`UnitRegistry::from_plugins`].

mod config;
mod dispatch;
mod doc_examples;
mod error;
mod harness;
mod input;
mod key;
mod paths;
mod rebuild;
mod registry;
mod solution;

// Re-export public API
pub use config::{
    CallOptions, Clock, ConfigResolver, FixedClock, ProcessDefaults, Settings, SystemClock,
    parse_timezone,
};
pub use dispatch::{Dispatcher, DispatcherBuilder, InputSource, format_duration};
pub use doc_examples::{DocExample, check_doc_examples, parse_doc_examples};
pub use error::{
    BuildError, ConfigError, DispatchError, DocExampleFailure, HarnessError, RegistrationError,
    SolveError,
};
pub use harness::{Harness, HarnessOptions};
pub use input::{Examples, FileReader, FsReader, InputLoader, MemoryReader, strip_trailing_newlines};
pub use key::PuzzleKey;
pub use paths::{Artifact, ArtifactKind, DEFAULT_DATA_DIR, PathLayout};
pub use rebuild::{NoRebuild, Rebuilder};
pub use registry::{UnitDescriptor, UnitPlugin, UnitRegistry, UnitRegistryBuilder};
pub use solution::{FnUnit, Part, Solution, SolutionPart2};

#[doc(hidden)]
pub use solution::__private;

// Re-export inventory for use by the generated code
pub use inventory;

// Re-export the attribute macros
pub use aoc_dispatch_macros::{aoc_harness, aoc_unit};
