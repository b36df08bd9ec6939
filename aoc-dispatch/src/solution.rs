//! The two-part solution contract

use crate::error::SolveError;
use std::fmt;

/// One of the two operations of a puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Part {
    One,
    Two,
}

impl Part {
    /// Map a part number (1 or 2) to a `Part`
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Part::One),
            2 => Some(Part::Two),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Part::One => 1,
            Part::Two => 2,
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "part {}", self.number())
    }
}

/// Core trait every unit implements.
///
/// `part1` is required. Part 2 is an optional capability probed through
/// [`Solution::as_part2`]; units without one (day 25 style) keep the default.
///
/// Units are normally generated by `#[aoc_unit]`, but the trait can be
/// implemented by hand:
///
/// ```
/// use aoc_dispatch::{Solution, SolutionPart2, SolveError};
///
/// struct Sum;
///
/// impl Solution for Sum {
///     fn part1(&self, input: &str) -> Result<String, SolveError> {
///         input
///             .lines()
///             .map(|l| l.parse::<i64>().map_err(|e| SolveError::SolveFailed(e.into())))
///             .sum::<Result<i64, _>>()
///             .map(|n| n.to_string())
///     }
///
///     fn as_part2(&self) -> Option<&dyn SolutionPart2> {
///         Some(self)
///     }
/// }
///
/// impl SolutionPart2 for Sum {
///     fn part2(&self, input: &str) -> Result<String, SolveError> {
///         Ok(input.lines().count().to_string())
///     }
/// }
///
/// assert_eq!(Sum.part1("1\n2\n3").unwrap(), "6");
/// assert_eq!(Sum.as_part2().unwrap().part2("1\n2\n3").unwrap(), "3");
/// ```
pub trait Solution: Sync {
    /// Solve part 1 against raw input text
    fn part1(&self, input: &str) -> Result<String, SolveError>;

    /// Capability probe for part 2
    fn as_part2(&self) -> Option<&dyn SolutionPart2> {
        None
    }

    /// Documentation captured from the unit's source, scanned for doc examples
    fn docs(&self) -> &'static str {
        ""
    }
}

/// Optional second operation of a unit
pub trait SolutionPart2: Sync {
    fn part2(&self, input: &str) -> Result<String, SolveError>;
}

impl<S: Solution + ?Sized> Solution for &S {
    fn part1(&self, input: &str) -> Result<String, SolveError> {
        (**self).part1(input)
    }

    fn as_part2(&self) -> Option<&dyn SolutionPart2> {
        (**self).as_part2()
    }

    fn docs(&self) -> &'static str {
        (**self).docs()
    }
}

type PartFn = Box<dyn Fn(&str) -> Result<String, SolveError> + Send + Sync>;

/// Closure-backed unit for hand-written registration
///
/// # Example
///
/// ```
/// use aoc_dispatch::{FnUnit, Solution};
///
/// let unit = FnUnit::new(|input| Ok(input.len().to_string()))
///     .with_part2(|input| Ok(input.lines().count().to_string()));
///
/// assert_eq!(unit.part1("abc").unwrap(), "3");
/// assert!(unit.as_part2().is_some());
/// ```
pub struct FnUnit {
    part1: PartFn,
    part2: Option<FnPart2>,
    docs: &'static str,
}

struct FnPart2(PartFn);

impl FnUnit {
    pub fn new<F>(part1: F) -> Self
    where
        F: Fn(&str) -> Result<String, SolveError> + Send + Sync + 'static,
    {
        Self {
            part1: Box::new(part1),
            part2: None,
            docs: "",
        }
    }

    pub fn with_part2<F>(mut self, part2: F) -> Self
    where
        F: Fn(&str) -> Result<String, SolveError> + Send + Sync + 'static,
    {
        self.part2 = Some(FnPart2(Box::new(part2)));
        self
    }

    pub fn with_docs(mut self, docs: &'static str) -> Self {
        self.docs = docs;
        self
    }
}

impl Solution for FnUnit {
    fn part1(&self, input: &str) -> Result<String, SolveError> {
        (self.part1)(input)
    }

    fn as_part2(&self) -> Option<&dyn SolutionPart2> {
        self.part2.as_ref().map(|p| p as &dyn SolutionPart2)
    }

    fn docs(&self) -> &'static str {
        self.docs
    }
}

impl SolutionPart2 for FnPart2 {
    fn part2(&self, input: &str) -> Result<String, SolveError> {
        (self.0)(input)
    }
}

#[doc(hidden)]
pub mod __private {
    //! Adapters used by `#[aoc_unit]` to turn a part's return value into an answer

    use crate::error::SolveError;
    use std::fmt::Display;

    pub fn answer<T: Display>(value: T) -> Result<String, SolveError> {
        Ok(value.to_string())
    }

    pub fn answer_result<T, E>(result: Result<T, E>) -> Result<String, SolveError>
    where
        T: Display,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        result
            .map(|value| value.to_string())
            .map_err(|e| SolveError::SolveFailed(e.into()))
    }
}
