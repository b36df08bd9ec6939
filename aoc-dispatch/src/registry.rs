//! Unit registry for binding puzzle keys to solution units

use crate::error::RegistrationError;
use crate::key::PuzzleKey;
use crate::solution::Solution;
use std::collections::BTreeMap;
use tracing::debug;

/// Metadata about a registered unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitDescriptor {
    pub key: PuzzleKey,
    /// Deterministic identifier, see [`PuzzleKey::unit_name`]
    pub name: String,
    /// Whether the unit implements part 2
    pub has_part2: bool,
}

struct UnitEntry {
    descriptor: UnitDescriptor,
    unit: Box<dyn Solution>,
}

/// Plugin information for automatic unit registration
///
/// Submitted by `#[aoc_unit]` through `inventory`; can also be submitted by hand:
///
/// ```no_run
/// use aoc_dispatch::{Solution, SolveError, UnitPlugin};
///
/// struct Day1;
///
/// impl Solution for Day1 {
///     fn part1(&self, input: &str) -> Result<String, SolveError> {
///         Ok(input.len().to_string())
///     }
/// }
///
/// aoc_dispatch::inventory::submit! {
///     UnitPlugin {
///         year: 2023,
///         day: 1,
///         unit: &Day1,
///     }
/// }
/// ```
pub struct UnitPlugin {
    /// The Advent of Code year
    pub year: u16,
    /// The day number (1-25)
    pub day: u8,
    /// The unit (type-erased)
    pub unit: &'static dyn Solution,
}

impl UnitPlugin {
    pub fn key(&self) -> PuzzleKey {
        PuzzleKey::new(self.year, self.day)
    }
}

// Enable plugin collection via inventory
inventory::collect!(UnitPlugin);

/// Builder for constructing a [`UnitRegistry`]
///
/// Registration is rejected for a key that already has a unit; the first
/// registration is kept.
///
/// # Example
///
/// ```
/// use aoc_dispatch::{FnUnit, PuzzleKey, UnitRegistryBuilder};
///
/// let registry = UnitRegistryBuilder::new()
///     .register(PuzzleKey::new(2020, 1), FnUnit::new(|input| Ok(input.len().to_string())))
///     .unwrap()
///     .build();
///
/// let descriptor = registry.find(PuzzleKey::new(2020, 1)).unwrap();
/// assert_eq!(descriptor.name, "Year2020Day01");
/// assert!(!descriptor.has_part2);
/// ```
pub struct UnitRegistryBuilder {
    units: BTreeMap<PuzzleKey, UnitEntry>,
}

impl UnitRegistryBuilder {
    /// Create a new empty registry builder
    pub fn new() -> Self {
        Self {
            units: BTreeMap::new(),
        }
    }

    /// Bind `unit` to `key` and return its descriptor
    ///
    /// # Returns
    /// * `Ok(UnitDescriptor)` - The unit was recorded
    /// * `Err(RegistrationError)` - A unit is already bound to this key
    pub fn generate<S>(&mut self, key: PuzzleKey, unit: S) -> Result<UnitDescriptor, RegistrationError>
    where
        S: Solution + 'static,
    {
        if self.units.contains_key(&key) {
            return Err(RegistrationError::DuplicateUnit(key));
        }
        let descriptor = UnitDescriptor {
            key,
            name: key.unit_name(),
            has_part2: unit.as_part2().is_some(),
        };
        debug!(%key, name = %descriptor.name, has_part2 = descriptor.has_part2, "registered unit");
        self.units.insert(
            key,
            UnitEntry {
                descriptor: descriptor.clone(),
                unit: Box::new(unit),
            },
        );
        Ok(descriptor)
    }

    /// Chaining form of [`generate`](Self::generate)
    pub fn register<S>(mut self, key: PuzzleKey, unit: S) -> Result<Self, RegistrationError>
    where
        S: Solution + 'static,
    {
        self.generate(key, unit)?;
        Ok(self)
    }

    /// Register all collected unit plugins
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_plugins(|_| true)
    }

    /// Register unit plugins that match the given filter predicate
    pub fn register_plugins<F>(mut self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&UnitPlugin) -> bool,
    {
        for plugin in inventory::iter::<UnitPlugin>() {
            if filter(plugin) {
                self.generate(plugin.key(), plugin.unit)?;
            }
        }
        Ok(self)
    }

    /// Finalize the builder and create an immutable registry
    pub fn build(self) -> UnitRegistry {
        UnitRegistry { units: self.units }
    }
}

impl Default for UnitRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable registry for looking up units by puzzle key
pub struct UnitRegistry {
    units: BTreeMap<PuzzleKey, UnitEntry>,
}

impl UnitRegistry {
    /// Registry of every unit submitted through `inventory`
    pub fn from_plugins() -> Result<Self, RegistrationError> {
        Ok(UnitRegistryBuilder::new().register_all_plugins()?.build())
    }

    /// Descriptor of the unit bound to `key`, if any
    pub fn find(&self, key: PuzzleKey) -> Option<UnitDescriptor> {
        self.units.get(&key).map(|e| e.descriptor.clone())
    }

    /// The unit bound to `key`, if any
    pub fn unit(&self, key: PuzzleKey) -> Option<&dyn Solution> {
        self.units.get(&key).map(|e| e.unit.as_ref())
    }

    pub fn contains(&self, key: PuzzleKey) -> bool {
        self.units.contains_key(&key)
    }

    /// Descriptors of all units in key order
    pub fn descriptors(&self) -> impl Iterator<Item = &UnitDescriptor> + '_ {
        self.units.values().map(|e| &e.descriptor)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
