//! Deterministic match tiers.
//!
//! A query is classified against a name in a fixed precedence: exact, prefix,
//! substring, then initials. Lower tiers rank first.

use serde::{Deserialize, Serialize};

/// Rank class of a match. Variants are ordered best-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Name equals the query.
    Exact,
    /// Name starts with the query.
    Prefix,
    /// Query occurs inside the name.
    Substring,
    /// Query occurs inside the name's initials.
    Initials,
    /// Only the approximate matcher accepted the entry.
    Fuzzy,
}

impl Tier {
    /// Numeric score used in logs: 0..=3 for deterministic tiers, `None` for fuzzy.
    #[must_use]
    pub const fn score(self) -> Option<u8> {
        match self {
            Self::Exact => Some(0),
            Self::Prefix => Some(1),
            Self::Substring => Some(2),
            Self::Initials => Some(3),
            Self::Fuzzy => None,
        }
    }
}

/// Characters that separate words when computing initials.
const fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '_' | '.')
}

/// Lowercased first characters of each word in `name`.
///
/// ```
/// use quicklaunch::ranking::initials;
///
/// assert_eq!(initials("Visual Studio Code"), "vsc");
/// assert_eq!(initials("node_modules-cleaner.app"), "nmca");
/// ```
#[must_use]
pub fn initials(name: &str) -> String {
    name.split(is_word_separator)
        .filter_map(|token| token.chars().next())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Lowercases and trims a query; returns `None` when nothing is left.
#[must_use]
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Query with all whitespace removed, used against initials.
fn compact(query: &str) -> String {
    query.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Returns true when `query` (whitespace stripped) occurs in the initials of `name`.
///
/// ```
/// use quicklaunch::ranking::initials_match;
///
/// assert!(initials_match("Visual Studio Code", "vs"));
/// assert!(initials_match("Google Chrome", "gc"));
/// assert!(!initials_match("Google Chrome", "xz"));
/// ```
#[must_use]
pub fn initials_match(name: &str, query: &str) -> bool {
    let needle = compact(&query.to_lowercase());
    !needle.is_empty() && initials(name).contains(&needle)
}

/// Precomputed lowercase forms of a name, reused across keystrokes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameKey {
    lower: String,
    initials: String,
}

impl NameKey {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            lower: name.to_lowercase(),
            initials: initials(name),
        }
    }

    #[must_use]
    pub fn lower(&self) -> &str {
        &self.lower
    }

    /// Classifies an already normalized query (see [`normalize_query`]).
    ///
    /// Returns `None` if no deterministic tier applies.
    #[must_use]
    pub fn classify(&self, normalized_query: &str) -> Option<Tier> {
        if normalized_query.is_empty() {
            return None;
        }
        if self.lower == normalized_query {
            return Some(Tier::Exact);
        }
        if self.lower.starts_with(normalized_query) {
            return Some(Tier::Prefix);
        }
        if self.lower.contains(normalized_query) {
            return Some(Tier::Substring);
        }

        let needle = compact(normalized_query);
        if !needle.is_empty() && self.initials.contains(&needle) {
            return Some(Tier::Initials);
        }
        None
    }
}

/// Classifies `query` against `name` without a precomputed key.
#[must_use]
pub fn classify(name: &str, query: &str) -> Option<Tier> {
    normalize_query(query).and_then(|q| NameKey::new(name).classify(&q))
}
