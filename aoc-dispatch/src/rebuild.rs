//! Rebuild collaborator invoked before dispatch when auto-compile is on

use crate::error::BuildError;

/// Triggers a rebuild of generated units
pub trait Rebuilder {
    /// Whether a build tool is actually available in this process
    fn is_active(&self) -> bool;

    /// Rebuild; blocks until the build finishes
    fn rebuild(&self) -> Result<(), BuildError>;
}

/// Rebuilder for processes without a build tool
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRebuild;

impl Rebuilder for NoRebuild {
    fn is_active(&self) -> bool {
        false
    }

    fn rebuild(&self) -> Result<(), BuildError> {
        Ok(())
    }
}
