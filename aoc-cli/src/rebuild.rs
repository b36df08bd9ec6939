//! Rebuild-and-reload through cargo
//!
//! Units are linked into the `aoc` binary, so picking up an edited unit means
//! rebuilding the binary and re-running the same command with the fresh
//! executable. The re-executed process sees `AOC_REBUILT` and skips the
//! build step, which keeps the loop to one step. It still counts as an active
//! rebuilder so reloads stay quiet.

use aoc_dispatch::{BuildError, Rebuilder};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::SystemTime;
use tracing::{debug, info};

/// Set in the environment of a re-executed process
pub const REBUILT_ENV: &str = "AOC_REBUILT";

const PACKAGE: &str = "aoc-cli";
const BINARY: &str = "aoc";

/// Rebuilds the CLI with cargo and re-executes it when the binary changed
pub struct CargoRebuilder {
    workspace: PathBuf,
    cargo: OsString,
    /// This process is already the product of a rebuild
    rebuilt: bool,
}

impl CargoRebuilder {
    /// Rebuilder for the workspace this binary was compiled from
    pub fn new() -> Self {
        let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        Self {
            workspace: manifest_dir
                .parent()
                .unwrap_or(manifest_dir)
                .to_path_buf(),
            cargo: std::env::var_os("CARGO").unwrap_or_else(|| OsString::from("cargo")),
            rebuilt: std::env::var_os(REBUILT_ENV).is_some(),
        }
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.cargo);
        cmd.current_dir(&self.workspace)
            .args(["build", "--quiet", "--package", PACKAGE, "--bin", BINARY]);
        if !cfg!(debug_assertions) {
            cmd.arg("--release");
        }
        cmd
    }

    fn describe(cmd: &Command) -> String {
        std::iter::once(cmd.get_program())
            .chain(cmd.get_args())
            .map(|part| part.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for CargoRebuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Rebuilder for CargoRebuilder {
    fn is_active(&self) -> bool {
        self.workspace.join("Cargo.toml").is_file()
    }

    fn rebuild(&self) -> Result<(), BuildError> {
        if self.rebuilt {
            debug!("already rebuilt, skipping build");
            return Ok(());
        }
        let exe = std::env::current_exe()?;
        let before = modified(&exe);

        let mut cmd = self.build_command();
        let command = Self::describe(&cmd);
        debug!(%command, workspace = %self.workspace.display(), "running build");
        let status = cmd.status()?;
        if !status.success() {
            return Err(BuildError::Failed {
                command,
                status: status.to_string(),
            });
        }

        if modified(&exe) == before {
            debug!("binary unchanged after build");
            return Ok(());
        }
        info!(exe = %exe.display(), "binary changed, re-executing");
        reexec(&exe)
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Replace the running process with a fresh run of `exe`
#[cfg(unix)]
fn reexec(exe: &Path) -> Result<(), BuildError> {
    use std::os::unix::process::CommandExt;

    let err = Command::new(exe)
        .args(std::env::args_os().skip(1))
        .env(REBUILT_ENV, "1")
        .exec();
    Err(BuildError::Io(err))
}

/// Run `exe` to completion and exit with its status
#[cfg(not(unix))]
fn reexec(exe: &Path) -> Result<(), BuildError> {
    let status = Command::new(exe)
        .args(std::env::args_os().skip(1))
        .env(REBUILT_ENV, "1")
        .status()?;
    std::process::exit(status.code().unwrap_or(1));
}
