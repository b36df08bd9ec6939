//! Canonical file layout for puzzle inputs and examples
//!
//! Directory structure:
//! - `{root}/{year}/day{day:02}/input.txt`
//! - `{root}/{year}/day{day:02}/example_{index}.txt`

use crate::key::PuzzleKey;
use std::path::PathBuf;

/// Default data root, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "data";

/// Kind of text artifact stored for a puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Input,
    Example,
}

/// A single artifact of a puzzle; examples are zero-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    Input,
    Example(usize),
}

impl Artifact {
    /// Combine a kind with an optional index. Examples default to index 0;
    /// the index carries no meaning for the input file.
    pub fn new(kind: ArtifactKind, index: Option<usize>) -> Self {
        match kind {
            ArtifactKind::Input => Artifact::Input,
            ArtifactKind::Example => Artifact::Example(index.unwrap_or(0)),
        }
    }
}

/// Pure mapping from (key, artifact) to a file path under a data root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathLayout {
    root: PathBuf,
}

impl PathLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding every artifact of one puzzle
    pub fn puzzle_dir(&self, key: PuzzleKey) -> PathBuf {
        self.root
            .join(key.year.to_string())
            .join(format!("day{:02}", key.day))
    }

    /// Resolve the path of an artifact. No I/O is performed.
    pub fn resolve(&self, key: PuzzleKey, artifact: Artifact) -> PathBuf {
        let file = match artifact {
            Artifact::Input => "input.txt".to_string(),
            Artifact::Example(index) => format!("example_{}.txt", index),
        };
        self.puzzle_dir(key).join(file)
    }

    /// Resolve by kind and optional index (examples default to index 0)
    pub fn resolve_kind(&self, key: PuzzleKey, kind: ArtifactKind, index: Option<usize>) -> PathBuf {
        self.resolve(key, Artifact::new(kind, index))
    }

    pub fn input_path(&self, key: PuzzleKey) -> PathBuf {
        self.resolve(key, Artifact::Input)
    }

    pub fn example_path(&self, key: PuzzleKey, index: usize) -> PathBuf {
        self.resolve(key, Artifact::Example(index))
    }
}

impl Default for PathLayout {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_path_format() {
        let layout = PathLayout::new("/tmp/aoc");
        let path = layout.input_path(PuzzleKey::new(2020, 1));
        assert_eq!(path, PathBuf::from("/tmp/aoc/2020/day01/input.txt"));
    }

    #[test]
    fn test_example_path_format() {
        let layout = PathLayout::new("data");
        let path = layout.example_path(PuzzleKey::new(2023, 25), 3);
        assert_eq!(path, PathBuf::from("data/2023/day25/example_3.txt"));
    }

    #[test]
    fn test_example_index_defaults_to_zero() {
        let layout = PathLayout::default();
        let key = PuzzleKey::new(2021, 4);
        assert_eq!(
            layout.resolve_kind(key, ArtifactKind::Example, None),
            layout.example_path(key, 0)
        );
    }

    #[test]
    fn test_input_ignores_index() {
        let layout = PathLayout::default();
        let key = PuzzleKey::new(2021, 4);
        assert_eq!(Artifact::new(ArtifactKind::Input, Some(5)), Artifact::Input);
        assert_eq!(
            layout.resolve_kind(key, ArtifactKind::Input, Some(5)),
            layout.input_path(key)
        );
    }
}
