//! Test harness paired with a unit
//!
//! Normally generated by `#[aoc_harness]`, which turns a `fn(&Harness)` into
//! a `#[test]`:
//!
//! ```ignore
//! use aoc_dispatch::{aoc_harness, Harness};
//!
//! #[aoc_harness(year = 2020, day = 1)]
//! fn day01(h: &Harness) {
//!     assert_eq!(h.part1_example(0).unwrap(), "514579");
//! }
//! ```

use crate::doc_examples::check_doc_examples;
use crate::error::{DispatchError, HarnessError};
use crate::input::{Examples, InputLoader};
use crate::key::PuzzleKey;
use crate::paths::{DEFAULT_DATA_DIR, PathLayout};
use crate::registry::UnitRegistry;
use crate::solution::{Part, Solution};
use std::path::PathBuf;
use tracing::debug;

/// Options of a generated harness
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessOptions {
    /// Link the unit registered for the key
    pub link_unit: bool,
    /// Evaluate the unit's doc examples after the body
    pub doc_examples: bool,
    /// Root of the input/example layout
    pub data_dir: PathBuf,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            link_unit: true,
            doc_examples: true,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

/// Artifact accessors and part invocations scoped to one puzzle
pub struct Harness {
    key: PuzzleKey,
    options: HarnessOptions,
    loader: InputLoader,
    registry: Option<UnitRegistry>,
}

impl Harness {
    /// Build a harness; linking fails if no unit was registered for `key`
    pub fn new(key: PuzzleKey, options: HarnessOptions) -> Result<Self, HarnessError> {
        let registry = if options.link_unit {
            let registry = UnitRegistry::from_plugins()?;
            if !registry.contains(key) {
                return Err(DispatchError::UnitNotFound(key).into());
            }
            Some(registry)
        } else {
            None
        };

        Ok(Self {
            key,
            loader: InputLoader::from_fs(PathLayout::new(&options.data_dir)),
            options,
            registry,
        })
    }

    /// Harness over an explicit registry, used when units are registered by hand
    pub fn with_registry(
        key: PuzzleKey,
        options: HarnessOptions,
        registry: UnitRegistry,
    ) -> Result<Self, HarnessError> {
        if !registry.contains(key) {
            return Err(DispatchError::UnitNotFound(key).into());
        }
        Ok(Self {
            key,
            loader: InputLoader::from_fs(PathLayout::new(&options.data_dir)),
            options,
            registry: Some(registry),
        })
    }

    pub fn key(&self) -> PuzzleKey {
        self.key
    }

    pub fn options(&self) -> &HarnessOptions {
        &self.options
    }

    pub fn input_path(&self) -> PathBuf {
        self.loader.layout().input_path(self.key)
    }

    pub fn example_path(&self, index: usize) -> PathBuf {
        self.loader.layout().example_path(self.key, index)
    }

    pub fn input_text(&self) -> Result<String, DispatchError> {
        self.loader.input_text(self.key)
    }

    pub fn example_text(&self, index: usize) -> Result<String, DispatchError> {
        self.loader.example_text(self.key, index)
    }

    pub fn examples(&self) -> Examples<'_> {
        self.loader.examples(self.key)
    }

    /// The linked unit
    pub fn unit(&self) -> Result<&dyn Solution, HarnessError> {
        self.registry
            .as_ref()
            .and_then(|r| r.unit(self.key))
            .ok_or(HarnessError::NotLinked(self.key))
    }

    pub fn part1(&self, input: &str) -> Result<String, HarnessError> {
        self.solve(Part::One, input)
    }

    pub fn part2(&self, input: &str) -> Result<String, HarnessError> {
        self.solve(Part::Two, input)
    }

    pub fn part1_example(&self, index: usize) -> Result<String, HarnessError> {
        self.solve(Part::One, &self.example_text(index)?)
    }

    pub fn part2_example(&self, index: usize) -> Result<String, HarnessError> {
        self.solve(Part::Two, &self.example_text(index)?)
    }

    pub fn solve(&self, part: Part, input: &str) -> Result<String, HarnessError> {
        let unit = self.unit()?;
        let key = self.key;
        let result = match part {
            Part::One => unit.part1(input),
            Part::Two => unit
                .as_part2()
                .ok_or(DispatchError::OperationNotImplemented { key, part })?
                .part2(input),
        };
        result.map_err(|source| DispatchError::Solve { key, part, source }.into())
    }

    /// Evaluate the linked unit's doc examples, returning how many passed
    pub fn check_doc_examples(&self) -> Result<usize, HarnessError> {
        check_doc_examples(self.key, self.unit()?)
    }

    /// Run `body`, then the doc example check unless disabled or unlinked
    pub fn run<F>(self, body: F) -> Result<(), HarnessError>
    where
        F: FnOnce(&Harness),
    {
        body(&self);
        if !self.options.doc_examples {
            return Ok(());
        }
        if self.registry.is_none() {
            debug!(key = %self.key, "skipping doc examples for unlinked harness");
            return Ok(());
        }
        self.check_doc_examples().map(|_| ())
    }
}
