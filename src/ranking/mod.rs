//! Search ranking for the palette.
//!
//! Ranking is a pure function of the roster and the query. Deterministic tiers
//! (exact, prefix, substring, initials) come first; an approximate matcher
//! fills the remaining slots.
//!
//! - [`tiers`]: tier classification and initials
//! - [`fuzzy`]: typo-tolerant fallback index
//! - [`catalog`]: the two-phase merge and the per-roster [`Catalog`]

pub mod catalog;
pub mod fuzzy;
pub mod tiers;

pub use catalog::{rank, rank_scored, Catalog, RankedResult, DEFAULT_MAX_RESULTS};
pub use fuzzy::{FuzzyConfig, FuzzyIndex};
pub use tiers::{classify, initials, initials_match, normalize_query, Tier};
