// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Small helpers over integers, strings, paths and random numbers.

use rand::Rng;
use std::collections::HashSet;
use std::ops::{Range, RangeInclusive};
use std::path::{Path, PathBuf};

/// Errors returned by the helpers in this module.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExtError {
    /// The requested range contains no value at all.
    #[error("range {start}..{end} is empty")]
    EmptyRange {
        /// Inclusive lower bound.
        start: i32,
        /// Exclusive upper bound.
        end: i32,
    },
    /// Every value of the range is excluded.
    #[error("every value in {start}..{end} is excluded")]
    NoCandidate {
        /// Inclusive lower bound.
        start: i32,
        /// Exclusive upper bound.
        end: i32,
    },
}

/// Counts the set bits of a flags value, using its two's complement
/// representation for negative values.
///
/// ```
/// use kiln_core::ext::set_bit_count;
/// assert_eq!(set_bit_count(0b1011_u8), 3);
/// assert_eq!(set_bit_count(-1_i32), 64);
/// ```
#[inline]
pub fn set_bit_count<T: Into<i64>>(flags: T) -> u32 {
    flags.into().count_ones()
}

/// Returns `true` if `haystack` contains at least one of `needles`.
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Case-insensitive substring search.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Returns `path` if nothing exists there yet, otherwise the first free
/// `"{stem} ({n}){ext}"` variant with `n` counting up from 1.
///
/// `ext` is the full suffix including the dot (e.g. `".ron"`).
pub fn unique_path(path: impl AsRef<Path>, ext: &str) -> PathBuf {
    let path = path.as_ref();
    if !path.exists() {
        return path.to_path_buf();
    }

    let text = path.to_string_lossy();
    let stem = text.strip_suffix(ext).unwrap_or(&*text);
    first_free_numbered(stem, ext, 1..=u32::MAX).unwrap_or_else(|| path.to_path_buf())
}

fn first_free_numbered(stem: &str, ext: &str, indices: RangeInclusive<u32>) -> Option<PathBuf> {
    indices
        .map(|i| PathBuf::from(format!("{stem} ({i}){ext}")))
        .find(|candidate| !candidate.exists())
}

/// Draws a value from `range` that differs from `exclude`.
pub fn random_range_excluding<R: Rng>(
    rng: &mut R,
    range: Range<i32>,
    exclude: i32,
) -> Result<i32, ExtError> {
    check_range(&range)?;
    if range.len() == 1 && range.start == exclude {
        return Err(ExtError::NoCandidate {
            start: range.start,
            end: range.end,
        });
    }
    loop {
        let value = rng.random_range(range.clone());
        if value != exclude {
            return Ok(value);
        }
    }
}

/// Draws a value from `range` that is not in `exclude`.
pub fn random_range_excluding_set<R: Rng>(
    rng: &mut R,
    range: Range<i32>,
    exclude: &HashSet<i32>,
) -> Result<i32, ExtError> {
    check_range(&range)?;
    if exclude.len() >= range.len() && range.clone().all(|v| exclude.contains(&v)) {
        return Err(ExtError::NoCandidate {
            start: range.start,
            end: range.end,
        });
    }
    loop {
        let value = rng.random_range(range.clone());
        if !exclude.contains(&value) {
            return Ok(value);
        }
    }
}

fn check_range(range: &Range<i32>) -> Result<(), ExtError> {
    if range.is_empty() {
        return Err(ExtError::EmptyRange {
            start: range.start,
            end: range.end,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::fs;

    #[test]
    fn test_set_bit_count() {
        assert_eq!(set_bit_count(0_u8), 0);
        assert_eq!(set_bit_count(0b1000_0001_u8), 2);
        assert_eq!(set_bit_count(u32::MAX), 32);
        assert_eq!(set_bit_count(i64::MIN), 1);
    }

    #[test]
    fn test_string_helpers() {
        assert!(contains_any("player_idle", &["run", "idle"]));
        assert!(!contains_any("player_idle", &["run", "jump"]));
        assert!(!contains_any("player_idle", &[]));
        assert!(contains_ignore_case("GameView", "gameview"));
        assert!(!contains_ignore_case("GameView", "scene"));
    }

    #[test]
    fn test_unique_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let base = dir.path().join("save.ron");
        assert_eq!(unique_path(&base, ".ron"), base);

        fs::write(&base, "()").unwrap();
        let first = unique_path(&base, ".ron");
        assert_eq!(first, dir.path().join("save (1).ron"));

        fs::write(&first, "()").unwrap();
        assert_eq!(unique_path(&base, ".ron"), dir.path().join("save (2).ron"));
    }

    #[test]
    fn test_unique_path_exhausted_indices() {
        let dir = tempfile::tempdir().expect("temp dir");
        let stem = dir.path().join("save");
        let stem = stem.to_string_lossy();
        let last = dir.path().join(format!("save ({}).ron", u32::MAX));

        assert_eq!(
            first_free_numbered(&stem, ".ron", u32::MAX..=u32::MAX),
            Some(last.clone())
        );
        fs::write(&last, "()").unwrap();
        // The index range ends at u32::MAX instead of overflowing.
        assert_eq!(first_free_numbered(&stem, ".ron", u32::MAX..=u32::MAX), None);
    }

    #[test]
    fn test_random_range_excluding() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let v = random_range_excluding(&mut rng, 0..3, 1).unwrap();
            assert!(v == 0 || v == 2);
        }
        assert_eq!(
            random_range_excluding(&mut rng, 5..6, 5),
            Err(ExtError::NoCandidate { start: 5, end: 6 })
        );
        assert_eq!(
            random_range_excluding(&mut rng, 3..3, 0),
            Err(ExtError::EmptyRange { start: 3, end: 3 })
        );
    }

    #[test]
    fn test_random_range_excluding_set() {
        let mut rng = StdRng::seed_from_u64(11);
        let exclude: HashSet<i32> = [0, 1, 3].into_iter().collect();
        for _ in 0..200 {
            assert_eq!(random_range_excluding_set(&mut rng, 0..4, &exclude), Ok(2));
        }
        let all: HashSet<i32> = (0..4).collect();
        assert_eq!(
            random_range_excluding_set(&mut rng, 0..4, &all),
            Err(ExtError::NoCandidate { start: 0, end: 4 })
        );
    }
}
