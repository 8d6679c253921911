//! Coarse match type of a duplicate group.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::scoring::{MatchCategory, MatchReason};

/// Which field(s) made a group's members look alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum MatchType {
    /// Exactly one field category matched
    Single(MatchCategory),
    /// Reasons spanned more than one category
    Multiple,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(category) => f.write_str(category.as_str()),
            Self::Multiple => f.write_str("multiple"),
        }
    }
}

impl From<MatchType> for String {
    fn from(value: MatchType) -> Self {
        value.to_string()
    }
}

impl FromStr for MatchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "multiple" {
            return Ok(Self::Multiple);
        }
        MatchCategory::parse(s)
            .map(Self::Single)
            .ok_or_else(|| format!("unknown match type: {s}"))
    }
}

impl TryFrom<String> for MatchType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Classify a group from the reasons of all its qualifying pairs.
///
/// More than one distinct category yields [`MatchType::Multiple`]; no
/// category at all yields `fallback`.
pub fn classify<'a>(
    reasons: impl IntoIterator<Item = &'a MatchReason>,
    fallback: MatchCategory,
) -> MatchType {
    let categories: BTreeSet<MatchCategory> = reasons.into_iter().map(|r| r.category).collect();

    let mut iter = categories.into_iter();
    match (iter.next(), iter.next()) {
        (None, _) => MatchType::Single(fallback),
        (Some(only), None) => MatchType::Single(only),
        (Some(_), Some(_)) => MatchType::Multiple,
    }
}
