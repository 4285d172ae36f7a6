use std::str::FromStr;

use serde::Serialize;

use crate::error::SimilarityError;
use crate::similarity::normalize::suggested_key;

/// A raw attribute value together with the row it was read from (1-based).
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeCell {
    pub row: usize,
    pub value: String,
}

/// Lexical similarity between two attribute strings, `0..=100`.
pub type Score = u8;

/// Minimum similarity score for two attributes to be linked.
///
/// Only constructible through validation, so anything holding a `Threshold`
/// holds a value in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Threshold(u8);

impl Threshold {
    pub fn new(value: i64) -> Result<Self, SimilarityError> {
        if (0..=100).contains(&value) {
            Ok(Threshold(value as u8))
        } else {
            Err(SimilarityError::InvalidThreshold {
                value: value.to_string(),
            })
        }
    }

    pub fn value(self) -> Score {
        self.0
    }

    pub fn admits(self, score: Score) -> bool {
        score >= self.0
    }
}

impl FromStr for Threshold {
    type Err = SimilarityError;

    /// Accepts `85`, ` 85 `, and `85%`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
        let value: i64 = digits
            .parse()
            .map_err(|_| SimilarityError::InvalidThreshold {
                value: trimmed.to_string(),
            })?;
        Threshold::new(value)
    }
}

impl std::fmt::Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// One character-level edit: `from` in the first string became `to` in the second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edit {
    pub from: String,
    pub to: String,
}

impl std::fmt::Display for Edit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' → '{}'", self.from, self.to)
    }
}

/// A single explained difference between two attribute strings.
///
/// "first" and "second" always refer to the alphabetically-first and
/// alphabetically-second raw strings of the pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Difference {
    /// Letters that match except for case, as `(first, second)` pairs.
    Case { pairs: Vec<(char, char)> },
    /// Whitespace characters present in only one of the strings.
    Whitespace { first_extra: usize, second_extra: usize },
    /// Punctuation present in only one of the strings.
    Punctuation { first_only: String, second_only: String },
    /// Remaining letter/digit/symbol edits.
    Spelling { edits: Vec<Edit> },
}

impl std::fmt::Display for Difference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difference::Case { pairs } => {
                let shown: Vec<String> = pairs
                    .iter()
                    .map(|(a, b)| format!("'{}' vs '{}'", a, b))
                    .collect();
                write!(f, "Case difference ({})", shown.join(", "))
            }
            Difference::Whitespace {
                first_extra,
                second_extra,
            } => match (first_extra, second_extra) {
                (n, 0) => write!(f, "Whitespace/spacing difference: first has {} extra", n),
                (0, n) => write!(f, "Whitespace/spacing difference: second has {} extra", n),
                (a, b) => write!(
                    f,
                    "Whitespace/spacing difference: first has {} extra, second has {} extra",
                    a, b
                ),
            },
            Difference::Punctuation {
                first_only,
                second_only,
            } => write!(f, "Punctuation: '{}' vs '{}'", first_only, second_only),
            Difference::Spelling { edits } => {
                let shown: Vec<String> = edits.iter().map(ToString::to_string).collect();
                write!(f, "Spelling/character difference: {}", shown.join(", "))
            }
        }
    }
}

/// Ordered list of differences for one pair: case, whitespace, punctuation, spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DifferenceRecord(pub Vec<Difference>);

impl DifferenceRecord {
    pub fn iter(&self) -> impl Iterator<Item = &Difference> {
        self.0.iter()
    }

    /// Human-readable descriptions, in record order.
    pub fn descriptions(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl std::fmt::Display for DifferenceRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.descriptions().join("; "))
    }
}

/// Two attributes, their score, and how they differ. `first <= second` lexically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredPair {
    pub first: String,
    pub second: String,
    pub score: Score,
    /// The strings differ only in case, spacing or punctuation.
    pub formatting_only: bool,
    pub differences: DifferenceRecord,
}

impl ScoredPair {
    pub fn involves(&self, attribute: &str) -> bool {
        self.first == attribute || self.second == attribute
    }
}

pub type GroupId = u32;

/// A connected component of attributes linked by pairs at or above the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimilarityGroup {
    pub id: GroupId,
    /// Members in input (discovery) order.
    pub members: Vec<String>,
    /// Pairs that cleared the threshold and formed the group.
    pub links: Vec<ScoredPair>,
    /// Member pairs below the threshold, joined only through other members.
    pub bridged: Vec<ScoredPair>,
}

impl SimilarityGroup {
    /// Highest-scoring link touching `attribute`; earliest link wins ties.
    pub fn best_link(&self, attribute: &str) -> Option<&ScoredPair> {
        self.links
            .iter()
            .filter(|p| p.involves(attribute))
            .fold(None, |best: Option<&ScoredPair>, p| match best {
                Some(b) if b.score >= p.score => Some(b),
                _ => Some(p),
            })
    }

    /// Proposed merged key, derived from the first member.
    pub fn suggested_key(&self) -> String {
        self.members
            .first()
            .map(|m| suggested_key(m))
            .unwrap_or_default()
    }
}
