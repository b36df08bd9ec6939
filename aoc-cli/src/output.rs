//! Output formatting for command results

use aoc_dispatch::{UnitDescriptor, UnitRegistry};
use std::io::{self, Write};
use std::path::Path;

/// Print one line per registered unit, in key order
pub fn print_units(registry: &UnitRegistry, out: &mut impl Write) -> io::Result<()> {
    if registry.is_empty() {
        writeln!(out, "No units registered.")?;
        return Ok(());
    }
    for descriptor in registry.descriptors() {
        writeln!(out, "{}", format_unit(descriptor))?;
    }
    writeln!(out, "{} unit(s)", registry.len())
}

fn format_unit(descriptor: &UnitDescriptor) -> String {
    let parts = if descriptor.has_part2 { "1, 2" } else { "1" };
    format!(
        "{}  {}  parts: {}",
        descriptor.key, descriptor.name, parts
    )
}

pub fn print_answer(answer: &str, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", answer)
}

pub fn print_path(path: &Path, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_dispatch::{FnUnit, PuzzleKey, UnitRegistryBuilder};

    #[test]
    fn test_print_units() {
        let registry = UnitRegistryBuilder::new()
            .register(PuzzleKey::new(2020, 25), FnUnit::new(|_| Ok("a".into())))
            .unwrap()
            .register(
                PuzzleKey::new(2020, 1),
                FnUnit::new(|_| Ok("a".into())).with_part2(|_| Ok("b".into())),
            )
            .unwrap()
            .build();

        let mut out = Vec::new();
        print_units(&registry, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "2020/day01  Year2020Day01  parts: 1, 2\n\
             2020/day25  Year2020Day25  parts: 1\n\
             2 unit(s)\n"
        );
    }

    #[test]
    fn test_print_units_empty() {
        let mut out = Vec::new();
        print_units(&UnitRegistryBuilder::new().build(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No units registered.\n");
    }
}
