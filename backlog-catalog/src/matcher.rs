//! Fuzzy title matching.
//!
//! Scores are distances on a 0-1 scale: 0 is an identical title, 1 shares
//! nothing. A candidate is only accepted when its distance is strictly below
//! the matcher's threshold.

use crate::title::{normalize_title, sequel_number};

/// Acceptance threshold used when none is configured.
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Distance for titles that differ only in case, punctuation or articles.
/// Keeps a byte-identical candidate strictly ahead of them.
const NEAR_EXACT_DISTANCE: f64 = 0.001;

/// The winning candidate of a [`Matcher::best_match`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleMatch<'a> {
    pub candidate: &'a str,
    /// Position of the candidate in the input slice.
    pub index: usize,
    pub score: f64,
}

/// Picks the closest title from a candidate list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matcher {
    threshold: f64,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl Matcher {
    /// Thresholds are clamped to 0-1; NaN and infinities fall back to
    /// [`DEFAULT_THRESHOLD`].
    pub fn new(threshold: f64) -> Self {
        let threshold = if threshold.is_finite() {
            threshold.clamp(0.0, 1.0)
        } else {
            DEFAULT_THRESHOLD
        };
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Return the lowest-distance candidate under the threshold.
    ///
    /// The first candidate reaching the lowest distance wins, so callers
    /// control tie-breaks through ordering.
    pub fn best_match<'a, S: AsRef<str>>(
        &self,
        target: &str,
        candidates: &'a [S],
    ) -> Option<TitleMatch<'a>> {
        let mut best: Option<TitleMatch<'a>> = None;

        for (index, candidate) in candidates.iter().enumerate() {
            let candidate = candidate.as_ref();
            let score = title_distance(target, candidate);
            if score >= self.threshold {
                continue;
            }
            let better = match &best {
                Some(current) => score < current.score,
                None => true,
            };
            if better {
                best = Some(TitleMatch {
                    candidate,
                    index,
                    score,
                });
                if score == 0.0 {
                    break;
                }
            }
        }

        best
    }

    /// Whether two titles are close enough to be the same game.
    pub fn is_match(&self, a: &str, b: &str) -> bool {
        title_distance(a, b) < self.threshold
    }
}

/// Distance between two titles on a 0-1 scale.
///
/// Titles carrying different sequel numbers never match ("Hades" vs
/// "Hades II" is 1.0 no matter how similar the strings are).
pub fn title_distance(a: &str, b: &str) -> f64 {
    if a == b {
        return 0.0;
    }

    let norm_a = normalize_title(a);
    let norm_b = normalize_title(b);

    if sequel_number(a) != sequel_number(b) {
        return 1.0;
    }
    if norm_a == norm_b {
        return NEAR_EXACT_DISTANCE;
    }

    let distance = 1.0 - strsim::normalized_levenshtein(&norm_a, &norm_b);
    distance.max(NEAR_EXACT_DISTANCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_exact_is_not_zero() {
        assert!(title_distance("HADES", "Hades") > 0.0);
        assert!(title_distance("HADES", "Hades") < 0.01);
    }

    #[test]
    fn sequel_numbers_split_titles() {
        assert_eq!(title_distance("Hades", "Hades II"), 1.0);
        assert_eq!(title_distance("Left 4 Dead", "Left 4 Dead 2"), 1.0);
        assert!(title_distance("Hades II", "Hades 2") < DEFAULT_THRESHOLD);
    }
}
