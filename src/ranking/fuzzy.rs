//! Approximate matching for entries the deterministic tiers miss.
//!
//! Each field is scored by the smallest edit distance between the query and
//! any substring of the field, divided by the query length. A field qualifies
//! when that normalized distance is within [`FuzzyConfig::threshold`]. The
//! entry's relevance is the best `weight * (1 - distance)` among qualifying
//! fields. Ties are broken by the skim score of the name, then corpus order.

use crate::domain::AppEntry;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};

/// Tunable parameters of the fuzzy fallback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzyConfig {
    /// Maximum normalized distance (edits per query character) accepted.
    pub threshold: f64,

    /// Weight applied to matches on the entry name.
    pub name_weight: f64,

    /// Weight applied to matches on the entry category.
    pub category_weight: f64,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            name_weight: 1.0,
            category_weight: 0.5,
        }
    }
}

#[derive(Debug, Clone)]
struct IndexedEntry {
    name: Vec<char>,
    name_lower: String,
    category: Vec<char>,
}

/// Lowercased, pre-split field data for one roster snapshot.
///
/// Built once per roster refresh and reused for every keystroke.
pub struct FuzzyIndex {
    entries: Vec<IndexedEntry>,
    config: FuzzyConfig,
    matcher: SkimMatcherV2,
}

impl FuzzyIndex {
    /// Indexes `corpus` in order. Positions returned by [`search`](Self::search)
    /// refer to this order.
    #[must_use]
    pub fn build(corpus: &[AppEntry], config: FuzzyConfig) -> Self {
        let _span = tracing::debug_span!("fuzzy_index_build", entries = corpus.len()).entered();

        let entries = corpus
            .iter()
            .map(|entry| {
                let name_lower = entry.name.to_lowercase();
                IndexedEntry {
                    name: name_lower.chars().collect(),
                    name_lower,
                    category: entry.category.to_lowercase().chars().collect(),
                }
            })
            .collect();

        Self {
            entries,
            config,
            matcher: SkimMatcherV2::default(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn config(&self) -> &FuzzyConfig {
        &self.config
    }

    /// Returns corpus positions of qualifying entries, most relevant first.
    ///
    /// `normalized_query` must already be trimmed and lowercased.
    #[must_use]
    pub fn search(&self, normalized_query: &str) -> Vec<usize> {
        let pattern: Vec<char> = normalized_query.chars().collect();
        if pattern.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(f64, i64, usize)> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(position, entry)| {
                let relevance = self.relevance(entry, &pattern)?;
                let tie_break = self
                    .matcher
                    .fuzzy_match(&entry.name_lower, normalized_query)
                    .unwrap_or(i64::MIN);
                Some((relevance, tie_break, position))
            })
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.1.cmp(&a.1))
                .then_with(|| a.2.cmp(&b.2))
        });

        tracing::trace!(query = %normalized_query, matches = scored.len(), "fuzzy search");
        scored.into_iter().map(|(_, _, position)| position).collect()
    }

    fn relevance(&self, entry: &IndexedEntry, pattern: &[char]) -> Option<f64> {
        [
            (&entry.name, self.config.name_weight),
            (&entry.category, self.config.category_weight),
        ]
        .into_iter()
        .filter_map(|(field, weight)| {
            let distance = normalized_distance(pattern, field);
            (distance <= self.config.threshold).then(|| weight * (1.0 - distance))
        })
        .reduce(f64::max)
    }
}

impl std::fmt::Debug for FuzzyIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzyIndex")
            .field("entries", &self.entries.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Edit distance of `pattern` to its closest substring of `text`, per pattern char.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn normalized_distance(pattern: &[char], text: &[char]) -> f64 {
    if pattern.is_empty() {
        return 0.0;
    }
    substring_distance(pattern, text) as f64 / pattern.len() as f64
}

/// Sellers' approximate substring matching: the free start and end positions
/// in `text` make leading and trailing text cost nothing.
fn substring_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    let mut previous: Vec<usize> = (0..=m).collect();
    let mut current = vec![0; m + 1];
    let mut best = previous[m];

    for &t in text {
        current[0] = 0;
        for i in 1..=m {
            let substitution = previous[i - 1] + usize::from(pattern[i - 1] != t);
            current[i] = substitution.min(previous[i] + 1).min(current[i - 1] + 1);
        }
        best = best.min(current[m]);
        std::mem::swap(&mut previous, &mut current);
    }

    best
}
