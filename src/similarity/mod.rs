//! Near-duplicate detection for attribute names.
//!
//! - [`normalize`]: comparison and scoring forms of a string.
//! - [`score`]: 0–100 Levenshtein ratio between two strings.
//! - [`explain`]: case / whitespace / punctuation / spelling differences.
//! - [`grouping`]: pairwise scoring and transitive clustering into
//!   [`SimilarityGroup`](crate::models::SimilarityGroup)s.

pub mod disjoint_set;
pub mod explain;
pub mod grouping;
pub mod normalize;
pub mod score;
