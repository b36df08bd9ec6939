//! Usage examples embedded in a unit's documentation
//!
//! A unit documents its behaviour with ```` ```aoc ```` fenced blocks, one
//! example per line:
//!
//! ```text
//! /// ```aoc
//! /// part1("1721\n979\n366") => 514579
//! /// part2("1\n2") => "two words"
//! /// ```
//! ```
//!
//! The input is a double-quoted string with `\n`, `\t`, `\\` and `\"`
//! escapes. The expected output is the rest of the line, optionally quoted.
//! Blank lines and lines starting with `#` are ignored.

use crate::error::{DocExampleFailure, HarnessError};
use crate::key::PuzzleKey;
use crate::solution::{Part, Solution};
use tracing::debug;

const FENCE: &str = "```";
const LANGUAGE: &str = "aoc";

/// One parsed doc example
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocExample {
    /// Line within the documentation (1-based)
    pub line: usize,
    pub part: Part,
    pub input: String,
    pub expected: String,
}

/// Extract every example from ```` ```aoc ```` blocks of `docs`
pub fn parse_doc_examples(docs: &str) -> Result<Vec<DocExample>, HarnessError> {
    let mut examples = Vec::new();
    let mut in_block = false;

    for (number, raw) in docs.lines().enumerate() {
        let line = raw.trim();
        let number = number + 1;

        if let Some(info) = line.strip_prefix(FENCE) {
            in_block = !in_block && info.trim() == LANGUAGE;
            continue;
        }
        if !in_block || line.is_empty() || line.starts_with('#') {
            continue;
        }
        let example = parse_line(line, number)
            .map_err(|reason| HarnessError::MalformedDocExample { line: number, reason })?;
        examples.push(example);
    }

    Ok(examples)
}

fn parse_line(line: &str, number: usize) -> Result<DocExample, String> {
    let (part, rest) = if let Some(rest) = line.strip_prefix("part1(") {
        (Part::One, rest)
    } else if let Some(rest) = line.strip_prefix("part2(") {
        (Part::Two, rest)
    } else {
        return Err("expected `part1(` or `part2(`".to_string());
    };

    let (input, rest) = parse_quoted(rest.trim_start())?;
    let rest = rest
        .trim_start()
        .strip_prefix(')')
        .ok_or("expected `)` after the input")?;
    let expected = rest
        .trim_start()
        .strip_prefix("=>")
        .ok_or("expected `=>` before the output")?
        .trim();

    let expected = if expected.starts_with('"') {
        let (value, trailing) = parse_quoted(expected)?;
        if !trailing.trim().is_empty() {
            return Err("unexpected text after the quoted output".to_string());
        }
        value
    } else if expected.is_empty() {
        return Err("missing expected output".to_string());
    } else {
        expected.to_string()
    };

    Ok(DocExample {
        line: number,
        part,
        input,
        expected,
    })
}

/// Parse a leading double-quoted string, returning it unescaped along with the remainder
fn parse_quoted(text: &str) -> Result<(String, &str), String> {
    let body = text
        .strip_prefix('"')
        .ok_or("expected a double-quoted string")?;
    let mut value = String::new();
    let mut chars = body.char_indices();

    while let Some((index, c)) = chars.next() {
        match c {
            '"' => return Ok((value, &body[index + 1..])),
            '\\' => match chars.next() {
                Some((_, 'n')) => value.push('\n'),
                Some((_, 't')) => value.push('\t'),
                Some((_, 'r')) => value.push('\r'),
                Some((_, '\\')) => value.push('\\'),
                Some((_, '"')) => value.push('"'),
                Some((_, other)) => return Err(format!("unknown escape `\\{}`", other)),
                None => break,
            },
            c => value.push(c),
        }
    }

    Err("unterminated string".to_string())
}

/// Evaluate every doc example of `unit`, returning how many passed.
///
/// All examples are evaluated; mismatches are reported together.
pub fn check_doc_examples(key: PuzzleKey, unit: &dyn Solution) -> Result<usize, HarnessError> {
    let examples = parse_doc_examples(unit.docs())?;
    let failures: Vec<DocExampleFailure> = examples
        .iter()
        .filter_map(|example| {
            let actual = match example.part {
                Part::One => unit.part1(&example.input),
                Part::Two => match unit.as_part2() {
                    Some(part2) => part2.part2(&example.input),
                    None => {
                        return Some(DocExampleFailure {
                            line: example.line,
                            part: example.part,
                            expected: example.expected.clone(),
                            actual: "part 2 is not implemented".to_string(),
                        });
                    }
                },
            };
            let actual = actual.unwrap_or_else(|e| format!("error: {}", e));
            (actual != example.expected).then(|| DocExampleFailure {
                line: example.line,
                part: example.part,
                expected: example.expected.clone(),
                actual,
            })
        })
        .collect();

    debug!(%key, checked = examples.len(), failed = failures.len(), "doc examples evaluated");
    if failures.is_empty() {
        Ok(examples.len())
    } else {
        Err(HarnessError::DocExampleMismatch { key, failures })
    }
}
