//! Two-phase ranking over a roster snapshot.
//!
//! Phase one sorts every deterministically matched entry by [`Tier`], keeping
//! corpus order inside a tier. Phase two appends fuzzy matches that phase one
//! did not already return. The result is truncated to the configured limit.

use super::fuzzy::{FuzzyConfig, FuzzyIndex};
use super::tiers::{normalize_query, NameKey, Tier};
use crate::domain::AppEntry;
use std::collections::HashSet;

/// Default number of results shown by the palette.
pub const DEFAULT_MAX_RESULTS: usize = 8;

/// One ranked entry and the tier that admitted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedResult {
    pub entry: AppEntry,
    pub tier: Tier,
}

/// Ranks `corpus` against `query` and returns at most `limit` entries.
///
/// An empty or whitespace-only query returns the head of `corpus` unchanged.
/// `index` must have been built from the same `corpus`.
///
/// ```
/// use quicklaunch::ranking::{rank, FuzzyConfig, FuzzyIndex};
/// use quicklaunch::AppEntry;
///
/// let corpus = vec![
///     AppEntry::new("Google Chrome", "/apps/chrome", "Programs"),
///     AppEntry::new("Visual Studio Code", "/apps/code", "Programs"),
/// ];
/// let index = FuzzyIndex::build(&corpus, FuzzyConfig::default());
///
/// let names: Vec<String> = rank(&corpus, "vsc", &index, 8)
///     .into_iter()
///     .map(|entry| entry.name)
///     .collect();
/// assert_eq!(names, ["Visual Studio Code"]);
/// ```
#[must_use]
pub fn rank(corpus: &[AppEntry], query: &str, index: &FuzzyIndex, limit: usize) -> Vec<AppEntry> {
    rank_scored(corpus, query, index, limit)
        .into_iter()
        .map(|result| result.entry)
        .collect()
}

/// Like [`rank`] but keeps the admitting tier of each entry.
///
/// Entries of an empty query are reported as [`Tier::Fuzzy`] since no tier
/// was evaluated.
#[must_use]
pub fn rank_scored(
    corpus: &[AppEntry],
    query: &str,
    index: &FuzzyIndex,
    limit: usize,
) -> Vec<RankedResult> {
    let Some(normalized) = normalize_query(query) else {
        return corpus
            .iter()
            .take(limit)
            .map(|entry| RankedResult {
                entry: entry.clone(),
                tier: Tier::Fuzzy,
            })
            .collect();
    };

    let keys: Vec<NameKey> = corpus.iter().map(|entry| NameKey::new(&entry.name)).collect();
    rank_with_keys(corpus, &keys, &normalized, index, limit)
}

fn rank_with_keys(
    corpus: &[AppEntry],
    keys: &[NameKey],
    normalized: &str,
    index: &FuzzyIndex,
    limit: usize,
) -> Vec<RankedResult> {
    let _span = tracing::debug_span!("rank", corpus = corpus.len(), query = %normalized).entered();

    let mut direct: Vec<(Tier, &AppEntry)> = corpus
        .iter()
        .zip(keys)
        .filter_map(|(entry, key)| key.classify(normalized).map(|tier| (tier, entry)))
        .collect();
    // stable: equal tiers keep corpus order
    direct.sort_by_key(|(tier, _)| *tier);

    let mut seen: HashSet<&str> = HashSet::with_capacity(direct.len());
    let mut results: Vec<RankedResult> = Vec::with_capacity(limit);

    for (tier, entry) in direct {
        if !seen.insert(entry.path.as_str()) {
            continue;
        }
        if results.len() == limit {
            break;
        }
        results.push(RankedResult {
            entry: entry.clone(),
            tier,
        });
    }

    if results.len() < limit {
        for position in index.search(normalized) {
            if results.len() == limit {
                break;
            }
            let Some(entry) = corpus.get(position) else {
                continue;
            };
            if seen.insert(entry.path.as_str()) {
                results.push(RankedResult {
                    entry: entry.clone(),
                    tier: Tier::Fuzzy,
                });
            }
        }
    }

    tracing::debug!(results = results.len(), "ranking complete");
    results
}

/// A roster snapshot paired with its search indexes.
///
/// [`refresh`](Self::refresh) is the only place indexes are built, so typing
/// never pays for index construction.
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<AppEntry>,
    keys: Vec<NameKey>,
    index: FuzzyIndex,
    limit: usize,
}

impl Catalog {
    #[must_use]
    pub fn new(entries: Vec<AppEntry>, fuzzy: FuzzyConfig, limit: usize) -> Self {
        let keys = entries.iter().map(|entry| NameKey::new(&entry.name)).collect();
        let index = FuzzyIndex::build(&entries, fuzzy);
        Self {
            entries,
            keys,
            index,
            limit,
        }
    }

    /// Replaces the roster and rebuilds the indexes once.
    pub fn refresh(&mut self, entries: Vec<AppEntry>) {
        tracing::debug!(entries = entries.len(), "refreshing catalog");
        *self = Self::new(entries, *self.index.config(), self.limit);
    }

    #[must_use]
    pub fn entries(&self) -> &[AppEntry] {
        &self.entries
    }

    /// Looks up an entry by its path.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&AppEntry> {
        self.entries.iter().find(|entry| entry.path == path)
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub const fn fuzzy_config(&self) -> &FuzzyConfig {
        self.index.config()
    }

    #[must_use]
    pub fn rank(&self, query: &str) -> Vec<AppEntry> {
        self.rank_scored(query)
            .into_iter()
            .map(|result| result.entry)
            .collect()
    }

    #[must_use]
    pub fn rank_scored(&self, query: &str) -> Vec<RankedResult> {
        match normalize_query(query) {
            Some(normalized) => {
                rank_with_keys(&self.entries, &self.keys, &normalized, &self.index, self.limit)
            }
            None => rank_scored(&self.entries, query, &self.index, self.limit),
        }
    }
}
