use aoc_dispatch::{
    PuzzleKey, Solution, SolveError, UnitRegistry, aoc_unit, check_doc_examples,
};
use std::num::ParseIntError;

pub struct Sum;

/// Sums one integer per line.
///
/// ```aoc
/// part1("1\n2\n3") => 6
/// ```
#[aoc_unit(year = 2023, day = 1)]
impl Sum {
    pub fn part1(input: &str) -> i64 {
        input.lines().filter_map(|l| l.trim().parse::<i64>().ok()).sum()
    }
}

pub struct Checked;

#[aoc_unit(year = 2023, day = 2)]
impl Checked {
    /// ```aoc
    /// part1("4\n5") => 9
    /// ```
    pub fn part1(input: &str) -> Result<i64, ParseIntError> {
        input.lines().map(|l| l.trim().parse::<i64>()).sum()
    }

    /// ```aoc
    /// part2("4\n5") => 20
    /// ```
    pub fn part2(input: &str) -> Result<i64, ParseIntError> {
        input.lines().map(|l| l.trim().parse::<i64>()).product()
    }

    // Non-part helpers are left alone
    #[allow(dead_code)]
    fn helper() -> u8 {
        0
    }
}

pub struct Words;

#[aoc_unit(year = 2023, day = 3)]
impl Words {
    pub fn part1(input: &str) -> String {
        input.split_whitespace().rev().collect::<Vec<_>>().join(" ")
    }

    pub fn part2(input: &str) -> std::result::Result<usize, String> {
        if input.is_empty() {
            Err("empty input".to_string())
        } else {
            Ok(input.split_whitespace().count())
        }
    }
}

#[test]
fn test_generated_part1() {
    assert_eq!(Sum.part1("1\n2\n3").unwrap(), "6");
    assert_eq!(Words.part1("a b c").unwrap(), "c b a");
}

#[test]
fn test_inherent_functions_stay_callable() {
    assert_eq!(Sum::part1("10\n-3"), 7);
    assert_eq!(Checked::part2("2\n3\n4").unwrap(), 24);
}

#[test]
fn test_part2_capability_follows_definition() {
    assert!(Sum.as_part2().is_none());

    let part2 = Checked.as_part2().unwrap();
    assert_eq!(part2.part2("2\n3\n4").unwrap(), "24");
}

#[test]
fn test_result_errors_become_solve_failures() {
    assert!(matches!(
        Checked.part1("4\nfour"),
        Err(SolveError::SolveFailed(_))
    ));

    let error = Words.as_part2().unwrap().part2("").unwrap_err();
    assert_eq!(error.to_string(), "Solve failed: empty input");
}

#[test]
fn test_docs_are_collected_from_block_and_parts() {
    assert!(Sum.docs().contains("Sums one integer per line."));
    assert!(Checked.docs().contains("part1(\"4\\n5\") => 9"));
    assert!(Checked.docs().contains("part2(\"4\\n5\") => 20"));
    assert_eq!(Words.docs(), "");
}

#[test]
fn test_doc_examples_pass() {
    assert_eq!(check_doc_examples(PuzzleKey::new(2023, 1), &Sum).unwrap(), 1);
    assert_eq!(check_doc_examples(PuzzleKey::new(2023, 2), &Checked).unwrap(), 2);
}

#[test]
fn test_units_are_registered_as_plugins() {
    let registry = UnitRegistry::from_plugins().unwrap();
    assert_eq!(registry.len(), 3);

    let names: Vec<_> = registry.descriptors().map(|d| d.name.clone()).collect();
    assert_eq!(names, ["Year2023Day01", "Year2023Day02", "Year2023Day03"]);

    let checked = registry.find(PuzzleKey::new(2023, 2)).unwrap();
    assert!(checked.has_part2);
    assert!(!registry.find(PuzzleKey::new(2023, 1)).unwrap().has_part2);

    let unit = registry.unit(PuzzleKey::new(2023, 3)).unwrap();
    assert_eq!(unit.part1("x y").unwrap(), "y x");
}
