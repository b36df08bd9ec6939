use anyhow::{anyhow, bail};
use aoc_dispatch::aoc_unit;

pub struct Solver;

/// Secret entrance: a dial numbered 0-99 starts at 50 and is rotated left
/// or right once per line.
///
/// ```aoc
/// part1("L68\nL30\nR48\nL5\nR60\nL55\nL1\nL99\nR14\nL82") => 3
/// part2("L68\nL30\nR48\nL5\nR60\nL55\nL1\nL99\nR14\nL82") => 6
/// part2("R1000") => 10
/// ```
#[aoc_unit(year = 2025, day = 1)]
impl Solver {
    /// Number of rotations that leave the dial at 0
    pub fn part1(input: &str) -> anyhow::Result<u64> {
        Ok(turn_dial(&parse(input)?).zero_counts)
    }

    /// Number of clicks that pass over or land on 0
    pub fn part2(input: &str) -> anyhow::Result<u64> {
        Ok(turn_dial(&parse(input)?).pass_zero_counts)
    }
}

#[derive(Debug, Default)]
struct DialCounts {
    zero_counts: u64,
    pass_zero_counts: u64,
}

/// Signed rotations, left being negative
fn parse(input: &str) -> anyhow::Result<Vec<i64>> {
    input
        .trim()
        .lines()
        .enumerate()
        .map(|(line_idx, line)| {
            parse_rotation(line.trim()).map_err(|e| anyhow!("(line {}) {}", line_idx + 1, e))
        })
        .collect()
}

fn parse_rotation(line: &str) -> anyhow::Result<i64> {
    let negative = match line.as_bytes().first() {
        Some(b'L') => true,
        Some(b'R') => false,
        _ => bail!("first character need to be 'L' or 'R'"),
    };
    let val = i64::from(line[1..].parse::<u32>()?);
    Ok(if negative { -val } else { val })
}

fn turn_dial(rotations: &[i64]) -> DialCounts {
    let (_, counts) = rotations.iter().fold(
        (50i64, DialCounts::default()),
        |(mut dial_value, mut counts), rotate_val| {
            let old_dial_value = dial_value;
            dial_value += rotate_val;
            if dial_value <= 0 && old_dial_value != 0 {
                counts.pass_zero_counts += 1;
            }
            counts.pass_zero_counts += (dial_value / 100).unsigned_abs();
            dial_value = dial_value.rem_euclid(100);
            if dial_value == 0 {
                counts.zero_counts += 1;
            }
            (dial_value, counts)
        },
    );
    counts
}
