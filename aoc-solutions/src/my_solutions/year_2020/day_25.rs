use anyhow::{Context, bail};
use aoc_dispatch::aoc_unit;

pub struct Solver;

/// Combo Breaker: recover the handshake's encryption key from the two
/// public keys. Day 25 has a single part.
///
/// ```aoc
/// part1("5764801\n17807724") => 14897079
/// ```
#[aoc_unit(year = 2020, day = 25)]
impl Solver {
    pub fn part1(input: &str) -> anyhow::Result<u64> {
        let mut keys = input.split_whitespace().map(|key| {
            key.parse::<u64>()
                .with_context(|| format!("invalid public key {:?}", key))
        });
        let (Some(card), Some(door), None) = (keys.next(), keys.next(), keys.next()) else {
            bail!("expected exactly two public keys");
        };
        let loop_size = loop_size(card?)?;
        Ok(transform(door?, loop_size))
    }
}

const MODULUS: u64 = 20201227;
const SUBJECT: u64 = 7;

fn loop_size(public_key: u64) -> anyhow::Result<u64> {
    let mut value = 1;
    for size in 0..MODULUS {
        if value == public_key {
            return Ok(size);
        }
        value = value * SUBJECT % MODULUS;
    }
    bail!("{} is not a power of {} modulo {}", public_key, SUBJECT, MODULUS)
}

/// `subject^loop_size mod MODULUS`
fn transform(subject: u64, mut loop_size: u64) -> u64 {
    let mut result = 1;
    let mut base = subject % MODULUS;
    while loop_size > 0 {
        if loop_size & 1 == 1 {
            result = result * base % MODULUS;
        }
        base = base * base % MODULUS;
        loop_size >>= 1;
    }
    result
}
