//! Settings resolution from the settings file, environment and CLI args

use crate::cli::Args;
use crate::error::CliError;
use aoc_dispatch::Settings;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings file looked up in the working directory
const LOCAL_SETTINGS: &str = "aoc.toml";

/// Build settings from the settings file, `AOC_*` variables and CLI args,
/// in increasing order of precedence
pub fn from_args(args: &Args) -> Result<Settings, CliError> {
    let path = settings_path(args.config.as_deref(), dirs::config_dir())?;
    debug!(path = %path.display(), "loading settings");

    let mut settings = Settings::load(&path)?;
    settings.apply_env(|name| std::env::var(name).ok())?;
    apply_args(&mut settings, args);
    Ok(settings)
}

fn apply_args(settings: &mut Settings, args: &Args) {
    if let Some(data_dir) = &args.data_dir {
        settings.data_dir = data_dir.clone();
    }
    if args.auto_compile {
        settings.auto_compile = true;
    }
    settings.data_dir = expand_tilde(&settings.data_dir);
}

/// `--config` if given (must exist), else `./aoc.toml`, else the user config file
fn settings_path(explicit: Option<&Path>, config_dir: Option<PathBuf>) -> Result<PathBuf, CliError> {
    if let Some(path) = explicit {
        let path = expand_tilde(path);
        if !path.is_file() {
            return Err(CliError::Config(format!(
                "settings file not found: {}",
                path.display()
            )));
        }
        return Ok(path);
    }

    let local = PathBuf::from(LOCAL_SETTINGS);
    if local.is_file() {
        return Ok(local);
    }
    Ok(config_dir
        .map(|dir| dir.join("aoc").join("config.toml"))
        .unwrap_or(local))
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && (path_str.starts_with("~/") || path_str == "~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path_str.get(2..).unwrap_or_default());
    }
    path.to_path_buf()
}
