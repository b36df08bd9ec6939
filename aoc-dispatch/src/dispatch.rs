//! Runtime dispatch of puzzle operations
//!
//! A call flows through: key resolution, optional rebuild, unit lookup,
//! input loading, then a timed or direct invocation of the requested part.

use crate::config::{CallOptions, Clock, ConfigResolver, ProcessDefaults, SystemClock};
use crate::error::DispatchError;
use crate::input::{FileReader, FsReader, InputLoader};
use crate::key::PuzzleKey;
use crate::paths::PathLayout;
use crate::rebuild::{NoRebuild, Rebuilder};
use crate::registry::UnitRegistry;
use crate::solution::{Part, SolutionPart2};
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Where the text handed to a unit comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Use this text verbatim
    Explicit(String),
    /// Load the puzzle input
    FromInput,
    /// Load an example; `None` defers to the call options, then index 0
    FromExample(Option<usize>),
}

/// Resolves, locates and invokes units
///
/// # Example
///
/// ```
/// use aoc_dispatch::{
///     CallOptions, Dispatcher, FnUnit, InputSource, MemoryReader, Part, PuzzleKey,
///     UnitRegistryBuilder,
/// };
///
/// let registry = UnitRegistryBuilder::new()
///     .register(PuzzleKey::new(2020, 1), FnUnit::new(|input| Ok(input.lines().count().to_string())))
///     .unwrap()
///     .build();
///
/// let mut dispatcher = Dispatcher::builder(registry)
///     .reader(MemoryReader::new().with_file("data/2020/day01/input.txt", "a\nb\nc\n"))
///     .build();
///
/// let options = CallOptions::new().year(2020).day(1);
/// let answer = dispatcher.invoke(Part::One, InputSource::FromInput, &options).unwrap();
/// assert_eq!(answer, "3");
/// ```
pub struct Dispatcher {
    defaults: ProcessDefaults,
    resolver: ConfigResolver,
    registry: UnitRegistry,
    loader: InputLoader,
    rebuilder: Box<dyn Rebuilder>,
    report: Box<dyn Write>,
}

/// Builder for [`Dispatcher`]; every collaborator has a production default
pub struct DispatcherBuilder {
    registry: UnitRegistry,
    defaults: ProcessDefaults,
    clock: Box<dyn Clock>,
    layout: PathLayout,
    reader: Box<dyn FileReader>,
    rebuilder: Box<dyn Rebuilder>,
    report: Box<dyn Write>,
}

impl DispatcherBuilder {
    pub fn defaults(mut self, defaults: ProcessDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn layout(mut self, layout: PathLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn reader(mut self, reader: impl FileReader + 'static) -> Self {
        self.reader = Box::new(reader);
        self
    }

    pub fn rebuilder(mut self, rebuilder: impl Rebuilder + 'static) -> Self {
        self.rebuilder = Box::new(rebuilder);
        self
    }

    /// Sink for timing notices and example listings (stdout by default)
    pub fn report(mut self, report: impl Write + 'static) -> Self {
        self.report = Box::new(report);
        self
    }

    pub fn build(self) -> Dispatcher {
        Dispatcher {
            defaults: self.defaults,
            resolver: ConfigResolver { clock: self.clock },
            registry: self.registry,
            loader: InputLoader {
                layout: self.layout,
                reader: self.reader,
            },
            rebuilder: self.rebuilder,
            report: self.report,
        }
    }
}

impl Dispatcher {
    pub fn builder(registry: UnitRegistry) -> DispatcherBuilder {
        DispatcherBuilder {
            registry,
            defaults: ProcessDefaults::default(),
            clock: Box::new(SystemClock),
            layout: PathLayout::default(),
            reader: Box::new(FsReader),
            rebuilder: Box::new(NoRebuild),
            report: Box::new(std::io::stdout()),
        }
    }

    pub fn defaults(&self) -> &ProcessDefaults {
        &self.defaults
    }

    /// Rewrite the process defaults; affects future resolutions only
    pub fn defaults_mut(&mut self) -> &mut ProcessDefaults {
        &mut self.defaults
    }

    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    pub fn layout(&self) -> &PathLayout {
        self.loader.layout()
    }

    /// Resolve the puzzle key for `options` against the defaults and the clock
    pub fn resolve_key(&self, options: &CallOptions) -> Result<PuzzleKey, DispatchError> {
        Ok(self.resolver.resolve(options, &self.defaults)?)
    }

    /// Invoke `part` of the resolved unit on text from `source`.
    ///
    /// # Returns
    /// * `Ok(String)` - The unit's answer, unchanged by timing
    /// * `Err(DispatchError::Build)` - The rebuild failed; no lookup happened
    /// * `Err(DispatchError::UnitNotFound)` - No unit for the resolved key
    /// * `Err(DispatchError::OperationNotImplemented)` - The unit has no part 2
    /// * `Err(DispatchError::ArtifactMissing)` - The input or example file is absent
    pub fn invoke(
        &mut self,
        part: Part,
        source: InputSource,
        options: &CallOptions,
    ) -> Result<String, DispatchError> {
        let key = self.resolve_key(options)?;
        debug!(%key, %part, ?source, "dispatching");

        self.rebuild_if_enabled()?;

        let unit = self
            .registry
            .unit(key)
            .ok_or(DispatchError::UnitNotFound(key))?;
        let part2: Option<&dyn SolutionPart2> = match part {
            Part::One => None,
            Part::Two => Some(
                unit.as_part2()
                    .ok_or(DispatchError::OperationNotImplemented { key, part })?,
            ),
        };

        let input = match source {
            InputSource::Explicit(text) => text,
            InputSource::FromInput => self.loader.input_text(key)?,
            InputSource::FromExample(index) => {
                let index = index.or(options.example_index).unwrap_or(0);
                self.loader.example_text(key, index)?
            }
        };

        let run = |input: &str| match part2 {
            Some(part2) => part2.part2(input),
            None => unit.part1(input),
        };

        let timed = options.time.unwrap_or(self.defaults.time_calls);
        let result = if timed {
            let start = Instant::now();
            let result = run(&input);
            let elapsed = start.elapsed();
            info!(%key, %part, elapsed_us = elapsed.as_micros() as u64, "timed call");
            writeln!(
                self.report,
                "{} {} took {}",
                key,
                part,
                format_duration(elapsed)
            )
            .map_err(DispatchError::Report)?;
            result
        } else {
            run(&input)
        };

        result.map_err(|source| DispatchError::Solve { key, part, source })
    }

    pub fn part1(&mut self, source: InputSource, options: &CallOptions) -> Result<String, DispatchError> {
        self.invoke(Part::One, source, options)
    }

    pub fn part2(&mut self, source: InputSource, options: &CallOptions) -> Result<String, DispatchError> {
        self.invoke(Part::Two, source, options)
    }

    /// Part 1 on the example selected by `options.example_index` (default 0)
    pub fn part1_example(&mut self, options: &CallOptions) -> Result<String, DispatchError> {
        self.invoke(Part::One, InputSource::FromExample(None), options)
    }

    /// Part 2 on the example selected by `options.example_index` (default 0)
    pub fn part2_example(&mut self, options: &CallOptions) -> Result<String, DispatchError> {
        self.invoke(Part::Two, InputSource::FromExample(None), options)
    }

    pub fn input_path(&self, key: PuzzleKey) -> PathBuf {
        self.loader.layout().input_path(key)
    }

    pub fn example_path(&self, key: PuzzleKey, index: usize) -> PathBuf {
        self.loader.layout().example_path(key, index)
    }

    pub fn input_text(&self, key: PuzzleKey) -> Result<String, DispatchError> {
        self.loader.input_text(key)
    }

    pub fn example_text(&self, key: PuzzleKey, index: usize) -> Result<String, DispatchError> {
        self.loader.example_text(key, index)
    }

    /// Input path of the puzzle resolved from `options`
    pub fn input_path_for(&self, options: &CallOptions) -> Result<PathBuf, DispatchError> {
        Ok(self.input_path(self.resolve_key(options)?))
    }

    /// Example path of the puzzle resolved from `options`
    pub fn example_path_for(&self, options: &CallOptions) -> Result<PathBuf, DispatchError> {
        let key = self.resolve_key(options)?;
        Ok(self.example_path(key, options.example_index.unwrap_or(0)))
    }

    pub fn input_text_for(&self, options: &CallOptions) -> Result<String, DispatchError> {
        self.input_text(self.resolve_key(options)?)
    }

    pub fn example_text_for(&self, options: &CallOptions) -> Result<String, DispatchError> {
        let key = self.resolve_key(options)?;
        self.example_text(key, options.example_index.unwrap_or(0))
    }

    /// Write every example of `key` to the report sink, stopping at the first gap
    pub fn list_examples(&mut self, key: PuzzleKey) -> Result<(), DispatchError> {
        for example in self.loader.examples(key) {
            let (index, text) = example?;
            writeln!(self.report, "Example {}:\n{}\n", index, text).map_err(DispatchError::Report)?;
        }
        Ok(())
    }

    pub fn list_examples_for(&mut self, options: &CallOptions) -> Result<(), DispatchError> {
        let key = self.resolve_key(options)?;
        self.list_examples(key)
    }

    fn rebuild_if_enabled(&self) -> Result<(), DispatchError> {
        if !self.defaults.auto_compile {
            return Ok(());
        }
        if !self.rebuilder.is_active() {
            warn!("auto-compile is enabled but no build tool is active");
            return Ok(());
        }
        info!("rebuilding units");
        self.rebuilder.rebuild()?;
        Ok(())
    }
}

/// Format a duration for display
pub fn format_duration(d: Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FixedClock;
    use crate::error::BuildError;
    use crate::input::MemoryReader;
    use crate::registry::UnitRegistryBuilder;
    use crate::solution::FnUnit;
    use chrono::NaiveDate;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct FakeRebuilder {
        active: bool,
        fail: bool,
        calls: Rc<Cell<usize>>,
    }

    impl Rebuilder for FakeRebuilder {
        fn is_active(&self) -> bool {
            self.active
        }

        fn rebuild(&self) -> Result<(), BuildError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err(BuildError::Failed {
                    command: "cargo build".into(),
                    status: "exit status: 101".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn registry() -> UnitRegistry {
        UnitRegistryBuilder::new()
            .register(
                PuzzleKey::new(2020, 1),
                FnUnit::new(|input| Ok(input.lines().count().to_string()))
                    .with_part2(|input| Ok(input.len().to_string())),
            )
            .unwrap()
            .register(
                PuzzleKey::new(2020, 25),
                FnUnit::new(|input| Ok(input.to_uppercase())),
            )
            .unwrap()
            .build()
    }

    fn files() -> MemoryReader {
        MemoryReader::new()
            .with_file("data/2020/day01/input.txt", "1\n2\n3\n\n")
            .with_file("data/2020/day01/example_0.txt", "x\n")
            .with_file("data/2020/day01/example_1.txt", "x\ny\n")
            .with_file("data/2020/day01/example_3.txt", "skipped\n")
    }

    fn dispatcher() -> (Dispatcher, SharedBuffer) {
        let report = SharedBuffer::default();
        let dispatcher = Dispatcher::builder(registry())
            .clock(FixedClock(NaiveDate::from_ymd_opt(2020, 12, 1).unwrap()))
            .reader(files())
            .report(report.clone())
            .build();
        (dispatcher, report)
    }

    fn day1() -> CallOptions {
        CallOptions::new().year(2020).day(1)
    }

    #[test]
    fn test_input_is_loaded_and_stripped() {
        let (mut dispatcher, _) = dispatcher();
        assert_eq!(
            dispatcher.invoke(Part::One, InputSource::FromInput, &day1()).unwrap(),
            "3"
        );
        assert_eq!(dispatcher.part2(InputSource::FromInput, &day1()).unwrap(), "5");
    }

    #[test]
    fn test_explicit_text_is_verbatim() {
        let (mut dispatcher, _) = dispatcher();
        let answer = dispatcher
            .part2(InputSource::Explicit("ab\n\n".into()), &day1())
            .unwrap();
        assert_eq!(answer, "4");
    }

    #[test]
    fn test_example_selection() {
        let (mut dispatcher, _) = dispatcher();
        assert_eq!(dispatcher.part1_example(&day1()).unwrap(), "1");
        assert_eq!(dispatcher.part1_example(&day1().example(1)).unwrap(), "2");
        // Explicit index on the source wins over the options
        assert_eq!(
            dispatcher
                .invoke(Part::One, InputSource::FromExample(Some(0)), &day1().example(1))
                .unwrap(),
            "1"
        );
    }

    #[test]
    fn test_key_falls_back_to_clock() {
        let (mut dispatcher, _) = dispatcher();
        // Clock says 2020-12-01, so the default puzzle is 2020 day 1
        assert_eq!(
            dispatcher.part1(InputSource::Explicit("a".into()), &CallOptions::new()).unwrap(),
            "1"
        );

        dispatcher.defaults_mut().day = Some(25);
        assert_eq!(
            dispatcher.part1(InputSource::Explicit("a".into()), &CallOptions::new()).unwrap(),
            "A"
        );
    }

    #[test]
    fn test_unit_not_found() {
        let (mut dispatcher, _) = dispatcher();
        let result = dispatcher.part1(InputSource::FromInput, &CallOptions::new().year(2021).day(3));
        assert!(matches!(
            result,
            Err(DispatchError::UnitNotFound(key)) if key == PuzzleKey::new(2021, 3)
        ));
    }

    #[test]
    fn test_missing_part2_is_not_implemented() {
        let (mut dispatcher, _) = dispatcher();
        let options = CallOptions::new().year(2020).day(25);
        let result = dispatcher.part2(InputSource::Explicit("x".into()), &options);
        assert!(matches!(
            result,
            Err(DispatchError::OperationNotImplemented { key, part: Part::Two })
                if key == PuzzleKey::new(2020, 25)
        ));

        // Reported before any input is loaded
        let result = dispatcher.part2(InputSource::FromInput, &options);
        assert!(matches!(result, Err(DispatchError::OperationNotImplemented { .. })));
    }

    #[test]
    fn test_missing_artifact() {
        let (mut dispatcher, _) = dispatcher();
        let options = CallOptions::new().year(2020).day(25);
        match dispatcher.part1(InputSource::FromInput, &options) {
            Err(DispatchError::ArtifactMissing { path }) => {
                assert_eq!(path, PathBuf::from("data/2020/day25/input.txt"));
            }
            other => panic!("expected ArtifactMissing, got {:?}", other),
        }
    }

    #[test]
    fn test_timing_does_not_change_result() {
        let (mut dispatcher, report) = dispatcher();

        let plain = dispatcher
            .part1(InputSource::FromInput, &day1().timed(false))
            .unwrap();
        assert_eq!(report.contents(), "");

        let timed = dispatcher
            .part1(InputSource::FromInput, &day1().timed(true))
            .unwrap();
        assert_eq!(plain, timed);
        assert!(report.contents().starts_with("2020/day01 part 1 took "));
    }

    #[test]
    fn test_timing_defaults_to_process_setting() {
        let (mut dispatcher, report) = dispatcher();
        dispatcher.defaults_mut().time_calls = true;

        dispatcher.part1(InputSource::FromInput, &day1()).unwrap();
        assert!(report.contents().contains("took"));

        // Explicit option wins
        let before = report.contents();
        dispatcher.part1(InputSource::FromInput, &day1().timed(false)).unwrap();
        assert_eq!(report.contents(), before);
    }

    #[test]
    fn test_rebuild_only_when_enabled_and_active() {
        let calls = Rc::new(Cell::new(0));
        let mut dispatcher = Dispatcher::builder(registry())
            .reader(files())
            .rebuilder(FakeRebuilder {
                active: true,
                fail: false,
                calls: calls.clone(),
            })
            .build();

        dispatcher.part1(InputSource::FromInput, &day1()).unwrap();
        assert_eq!(calls.get(), 0);

        dispatcher.defaults_mut().auto_compile = true;
        dispatcher.part1(InputSource::FromInput, &day1()).unwrap();
        assert_eq!(calls.get(), 1);

        let inactive = Rc::new(Cell::new(0));
        let mut dispatcher = Dispatcher::builder(registry())
            .defaults(ProcessDefaults {
                auto_compile: true,
                ..Default::default()
            })
            .reader(files())
            .rebuilder(FakeRebuilder {
                active: false,
                fail: false,
                calls: inactive.clone(),
            })
            .build();
        dispatcher.part1(InputSource::FromInput, &day1()).unwrap();
        assert_eq!(inactive.get(), 0);
    }

    #[test]
    fn test_failed_rebuild_stops_before_lookup() {
        let calls = Rc::new(Cell::new(0));
        let mut dispatcher = Dispatcher::builder(registry())
            .defaults(ProcessDefaults {
                auto_compile: true,
                ..Default::default()
            })
            .rebuilder(FakeRebuilder {
                active: true,
                fail: true,
                calls: calls.clone(),
            })
            .build();

        // Even an unknown puzzle reports the build failure first
        let result = dispatcher.part1(InputSource::FromInput, &CallOptions::new().year(1999).day(1));
        assert!(matches!(result, Err(DispatchError::Build(_))));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_solve_errors_carry_key_and_part() {
        let registry = UnitRegistryBuilder::new()
            .register(
                PuzzleKey::new(2020, 2),
                FnUnit::new(|_| Err(crate::error::SolveError::InvalidInput("bad".into()))),
            )
            .unwrap()
            .build();
        let mut dispatcher = Dispatcher::builder(registry).build();

        let result = dispatcher.part1(InputSource::Explicit(String::new()), &CallOptions::new().year(2020).day(2));
        assert!(matches!(
            result,
            Err(DispatchError::Solve { part: Part::One, .. })
        ));
    }

    #[test]
    fn test_list_examples_stops_at_gap() {
        let (mut dispatcher, report) = dispatcher();
        dispatcher.list_examples(PuzzleKey::new(2020, 1)).unwrap();
        assert_eq!(report.contents(), "Example 0:\nx\n\nExample 1:\nx\ny\n\n");
    }

    #[test]
    fn test_read_only_accessors() {
        let (dispatcher, _) = dispatcher();
        let key = PuzzleKey::new(2020, 1);
        assert_eq!(dispatcher.input_path(key), PathBuf::from("data/2020/day01/input.txt"));
        assert_eq!(
            dispatcher.example_path_for(&day1().example(2)).unwrap(),
            PathBuf::from("data/2020/day01/example_2.txt")
        );
        assert_eq!(dispatcher.input_text(key).unwrap(), "1\n2\n3");
        assert_eq!(dispatcher.example_text_for(&day1().example(1)).unwrap(), "x\ny");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_micros(250)), "250µs");
        assert_eq!(format_duration(Duration::from_micros(1500)), "1.50ms");
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.50s");
    }
}
