use anyhow::{Context, anyhow};
use aoc_dispatch::aoc_unit;
use itertools::Itertools;

pub struct Solver;

/// Report Repair: find the expense entries that sum to 2020 and multiply them.
///
/// ```aoc
/// part1("1721\n979\n366\n299\n675\n1456") => 514579
/// part2("1721\n979\n366\n299\n675\n1456") => 241861950
/// ```
#[aoc_unit(year = 2020, day = 1)]
impl Solver {
    pub fn part1(input: &str) -> anyhow::Result<u64> {
        parse(input)?
            .into_iter()
            .tuple_combinations()
            .find(|(a, b)| a + b == TARGET)
            .map(|(a, b)| a * b)
            .ok_or_else(|| anyhow!("no pair sums to {}", TARGET))
    }

    pub fn part2(input: &str) -> anyhow::Result<u64> {
        parse(input)?
            .into_iter()
            .tuple_combinations()
            .find(|(a, b, c)| a + b + c == TARGET)
            .map(|(a, b, c)| a * b * c)
            .ok_or_else(|| anyhow!("no triple sums to {}", TARGET))
    }
}

const TARGET: u64 = 2020;

fn parse(input: &str) -> anyhow::Result<Vec<u64>> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.parse::<u64>()
                .with_context(|| format!("invalid expense entry {:?}", line))
        })
        .collect()
}
