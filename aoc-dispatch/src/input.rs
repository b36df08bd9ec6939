//! Loading puzzle text from the file layout

use crate::error::DispatchError;
use crate::key::PuzzleKey;
use crate::paths::{Artifact, PathLayout};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// File-read collaborator
pub trait FileReader {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    fn exists(&self, path: &Path) -> bool;
}

/// Reads from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl FileReader for FsReader {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// In-memory file set, keyed by path
#[derive(Debug, Clone, Default)]
pub struct MemoryReader {
    files: HashMap<PathBuf, String>,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }
}

impl FileReader for MemoryReader {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

/// Strip trailing `\n` and `\r\n` line terminators only; other whitespace,
/// a lone `\r` included, is kept
pub fn strip_trailing_newlines(text: &str) -> &str {
    let mut text = text;
    while let Some(rest) = text.strip_suffix('\n') {
        text = rest.strip_suffix('\r').unwrap_or(rest);
    }
    text
}

/// Reads artifacts resolved through a [`PathLayout`]
pub struct InputLoader {
    pub(crate) layout: PathLayout,
    pub(crate) reader: Box<dyn FileReader>,
}

impl InputLoader {
    pub fn new(layout: PathLayout, reader: impl FileReader + 'static) -> Self {
        Self {
            layout,
            reader: Box::new(reader),
        }
    }

    /// Loader over the local filesystem
    pub fn from_fs(layout: PathLayout) -> Self {
        Self::new(layout, FsReader)
    }

    pub fn layout(&self) -> &PathLayout {
        &self.layout
    }

    /// Read a file and strip its trailing newlines
    pub fn load(&self, path: &Path) -> Result<String, DispatchError> {
        debug!(path = %path.display(), "loading artifact");
        match self.reader.read_to_string(path) {
            Ok(text) => Ok(strip_trailing_newlines(&text).to_string()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(DispatchError::ArtifactMissing {
                path: path.to_path_buf(),
            }),
            Err(source) => Err(DispatchError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn artifact_text(&self, key: PuzzleKey, artifact: Artifact) -> Result<String, DispatchError> {
        self.load(&self.layout.resolve(key, artifact))
    }

    pub fn input_text(&self, key: PuzzleKey) -> Result<String, DispatchError> {
        self.artifact_text(key, Artifact::Input)
    }

    pub fn example_text(&self, key: PuzzleKey, index: usize) -> Result<String, DispatchError> {
        self.artifact_text(key, Artifact::Example(index))
    }

    pub fn has_example(&self, key: PuzzleKey, index: usize) -> bool {
        self.reader.exists(&self.layout.example_path(key, index))
    }

    /// Lazily enumerate the examples of a puzzle
    pub fn examples(&self, key: PuzzleKey) -> Examples<'_> {
        Examples {
            loader: self,
            key,
            next: 0,
            done: false,
        }
    }
}

/// Iterator over `(index, text)` of a puzzle's examples.
///
/// Probes index 0, 1, 2, … and stops at the first missing file; examples
/// after a gap are never visited.
pub struct Examples<'a> {
    loader: &'a InputLoader,
    key: PuzzleKey,
    next: usize,
    done: bool,
}

impl Iterator for Examples<'_> {
    type Item = Result<(usize, String), DispatchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let index = self.next;
        if !self.loader.has_example(self.key, index) {
            trace!(key = %self.key, index, "no more examples");
            self.done = true;
            return None;
        }
        self.next += 1;
        match self.loader.example_text(self.key, index) {
            Ok(text) => Some(Ok((index, text))),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
