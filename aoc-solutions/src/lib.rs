//! Advent of Code puzzle solutions with automatic registration
//!
//! This crate contains actual puzzle solutions organized by year.
//! Each solution is an inherent impl annotated with `#[aoc_unit]`, which
//! registers it with the dispatcher's plugin registry.
//!
//! Example inputs live under `data/{year}/day{dd}/example_{i}.txt` next to
//! this manifest; puzzle inputs are not committed.

#[cfg(feature = "my-solutions")]
pub mod my_solutions;

