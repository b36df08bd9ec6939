//! Property-based tests for the input/example path layout

use aoc_dispatch::{Artifact, ArtifactKind, PathLayout, PuzzleKey};
use proptest::prelude::*;

fn artifact() -> impl Strategy<Value = Artifact> {
    prop_oneof![
        Just(Artifact::Input),
        (0usize..64).prop_map(Artifact::Example),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* key and artifact, resolving twice yields the same path.
    #[test]
    fn prop_resolution_is_deterministic(
        year in 2015u16..2100,
        day in 1u8..=25,
        artifact in artifact(),
    ) {
        let layout = PathLayout::new("data");
        let key = PuzzleKey::new(year, day);
        prop_assert_eq!(layout.resolve(key, artifact), layout.resolve(key, artifact));
    }

    /// *For any* two distinct (key, artifact) pairs, the paths differ.
    #[test]
    fn prop_distinct_artifacts_have_distinct_paths(
        a in (2015u16..2030, 1u8..=25, artifact()),
        b in (2015u16..2030, 1u8..=25, artifact()),
    ) {
        let layout = PathLayout::default();
        let (ka, kb) = (PuzzleKey::new(a.0, a.1), PuzzleKey::new(b.0, b.1));
        if (ka, a.2) != (kb, b.2) {
            prop_assert_ne!(layout.resolve(ka, a.2), layout.resolve(kb, b.2));
        }
    }

    /// *For any* key, every artifact lives under the puzzle directory.
    #[test]
    fn prop_artifacts_live_under_puzzle_dir(
        year in 2015u16..2100,
        day in 1u8..=25,
        artifact in artifact(),
    ) {
        let layout = PathLayout::new("/srv/aoc");
        let key = PuzzleKey::new(year, day);
        let path = layout.resolve(key, artifact);
        prop_assert!(path.starts_with(layout.puzzle_dir(key)));
        prop_assert!(path.starts_with("/srv/aoc"));
    }

    /// *For any* index, the input path ignores it and examples default to 0.
    #[test]
    fn prop_kind_resolution_matches_artifact(year in 2015u16..2100, day in 1u8..=25, index in 0usize..100) {
        let layout = PathLayout::default();
        let key = PuzzleKey::new(year, day);
        prop_assert_eq!(
            layout.resolve_kind(key, ArtifactKind::Input, Some(index)),
            layout.input_path(key)
        );
        prop_assert_eq!(
            layout.resolve_kind(key, ArtifactKind::Example, Some(index)),
            layout.example_path(key, index)
        );
        prop_assert_eq!(
            layout.resolve_kind(key, ArtifactKind::Example, None),
            layout.example_path(key, 0)
        );
    }
}

#[test]
fn test_layout_shape() {
    let layout = PathLayout::new("data");
    let key = PuzzleKey::new(2020, 1);
    assert_eq!(
        layout.input_path(key),
        std::path::Path::new("data/2020/day01/input.txt")
    );
    assert_eq!(
        layout.example_path(key, 3),
        std::path::Path::new("data/2020/day01/example_3.txt")
    );
}
