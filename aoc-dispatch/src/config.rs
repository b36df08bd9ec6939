//! Layered resolution of "which puzzle, right now"
//!
//! Each field of the puzzle key resolves independently, highest first:
//! 1. the explicit per-call [`CallOptions`]
//! 2. the process-wide [`ProcessDefaults`]
//! 3. today's date from the [`Clock`], in the configured time zone if any

use crate::error::ConfigError;
use crate::key::PuzzleKey;
use crate::paths::DEFAULT_DATA_DIR;
use chrono::{Datelike, Local, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Process-wide defaults, the middle tier of the precedence chain
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProcessDefaults {
    pub year: Option<u16>,
    pub day: Option<u8>,
    /// Rebuild units before every dispatch
    pub auto_compile: bool,
    /// Time every dispatched call
    pub time_calls: bool,
    /// IANA zone name used to derive "today", e.g. `America/New_York`
    pub timezone: Option<String>,
}

/// Per-call overrides; `None` defers to the next tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallOptions {
    pub year: Option<u16>,
    pub day: Option<u8>,
    pub example_index: Option<usize>,
    pub time: Option<bool>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin both fields of the key
    pub fn for_key(key: PuzzleKey) -> Self {
        Self::new().year(key.year).day(key.day)
    }

    pub fn year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    pub fn day(mut self, day: u8) -> Self {
        self.day = Some(day);
        self
    }

    pub fn example(mut self, index: usize) -> Self {
        self.example_index = Some(index);
        self
    }

    pub fn timed(mut self, time: bool) -> Self {
        self.time = Some(time);
        self
    }
}

/// Clock collaborator
pub trait Clock {
    /// Today's date, in `timezone` if given, otherwise on the local clock.
    /// `None` means the clock is unavailable.
    fn today(&self, timezone: Option<Tz>) -> Option<NaiveDate>;
}

/// Wall clock of the running process
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self, timezone: Option<Tz>) -> Option<NaiveDate> {
        Some(match timezone {
            Some(tz) => Utc::now().with_timezone(&tz).date_naive(),
            None => Local::now().date_naive(),
        })
    }
}

/// A clock stuck on one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self, _timezone: Option<Tz>) -> Option<NaiveDate> {
        Some(self.0)
    }
}

/// Resolves [`CallOptions`] against [`ProcessDefaults`] and the clock
pub struct ConfigResolver {
    pub(crate) clock: Box<dyn Clock>,
}

impl ConfigResolver {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
        }
    }

    /// Resolve the puzzle key for one call.
    ///
    /// The clock is consulted only when a field is missing from both upper
    /// tiers. No calendar validation is applied to the result.
    pub fn resolve(
        &self,
        explicit: &CallOptions,
        defaults: &ProcessDefaults,
    ) -> Result<PuzzleKey, ConfigError> {
        let mut cached = None;
        let mut today = || -> Result<NaiveDate, ConfigError> {
            if let Some(date) = cached {
                return Ok(date);
            }
            let date = self.today(defaults)?;
            cached = Some(date);
            Ok(date)
        };

        let year = match explicit.year.or(defaults.year) {
            Some(year) => year,
            None => u16::try_from(today()?.year())
                .map_err(|_| ConfigError::Incomplete { field: "year" })?,
        };
        let day = match explicit.day.or(defaults.day) {
            Some(day) => day,
            None => u8::try_from(today()?.day())
                .map_err(|_| ConfigError::Incomplete { field: "day" })?,
        };

        let key = PuzzleKey::new(year, day);
        debug!(%key, "resolved puzzle");
        Ok(key)
    }

    fn today(&self, defaults: &ProcessDefaults) -> Result<NaiveDate, ConfigError> {
        let timezone = defaults
            .timezone
            .as_deref()
            .map(parse_timezone)
            .transpose()?;
        trace!(?timezone, "reading clock");
        self.clock
            .today(timezone)
            .ok_or(ConfigError::Incomplete { field: "date" })
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

/// Parse an IANA time zone name
pub fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
    name.parse::<Tz>()
        .map_err(|_| ConfigError::InvalidTimezone(name.to_string()))
}

/// Settings file contents (`aoc.toml`)
///
/// ```toml
/// year = 2020
/// day = 1
/// auto_compile = false
/// time_calls = true
/// timezone = "America/New_York"
/// data_dir = "data"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub year: Option<u16>,
    pub day: Option<u8>,
    pub auto_compile: bool,
    pub time_calls: bool,
    pub timezone: Option<String>,
    /// Root of the input/example layout
    pub data_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            year: None,
            day: None,
            auto_compile: false,
            time_calls: false,
            timezone: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Apply `AOC_*` environment overrides read through `var`
    pub fn apply_env<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = var("AOC_YEAR") {
            self.year = Some(parse_env("AOC_YEAR", &value)?);
        }
        if let Some(value) = var("AOC_DAY") {
            self.day = Some(parse_env("AOC_DAY", &value)?);
        }
        if let Some(value) = var("AOC_TIMEZONE") {
            self.timezone = Some(value);
        }
        if let Some(value) = var("AOC_AUTO_COMPILE") {
            self.auto_compile = parse_env_flag("AOC_AUTO_COMPILE", &value)?;
        }
        if let Some(value) = var("AOC_TIME_CALLS") {
            self.time_calls = parse_env_flag("AOC_TIME_CALLS", &value)?;
        }
        if let Some(value) = var("AOC_DATA_DIR") {
            self.data_dir = PathBuf::from(value);
        }
        Ok(())
    }

    pub fn defaults(&self) -> ProcessDefaults {
        ProcessDefaults {
            year: self.year,
            day: self.day,
            auto_compile: self.auto_compile,
            time_calls: self.time_calls,
            timezone: self.timezone.clone(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        name,
        value: value.to_string(),
    })
}

fn parse_env_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            name,
            value: value.to_string(),
        }),
    }
}
