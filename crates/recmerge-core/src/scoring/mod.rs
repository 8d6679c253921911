//! Pairwise field scoring for each entity type.
//!
//! Every field comparison earns a *credit* and enters the average with a
//! *weight* equal to that field's exact-match credit. The pair score is
//! `round(100 * Σcredit / Σweight)`, so identical records score 100 and
//! high-priority fields dominate the mean. Fields that do not participate
//! (both sides blank, unparseable, or a miss on a field that only counts
//! when it hits) add to neither sum.

mod contact;
mod order;
mod product;

pub use contact::{ContactScorer, ContactScoring};
pub use order::{OrderScorer, OrderScoring};
pub use product::{ProductScorer, ProductScoring};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::blank::to_cents;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Which field a match reason came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchCategory {
    Email,
    Phone,
    Name,
    Address,
    Total,
    Contact,
    Date,
    Status,
    Sku,
    Price,
    Description,
}

impl MatchCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Name => "name",
            Self::Address => "address",
            Self::Total => "total",
            Self::Contact => "contact",
            Self::Date => "date",
            Self::Status => "status",
            Self::Sku => "sku",
            Self::Price => "price",
            Self::Description => "description",
        }
    }

    /// Inverse of [`MatchCategory::as_str`].
    pub fn parse(s: &str) -> Option<Self> {
        let category = match s {
            "email" => Self::Email,
            "phone" => Self::Phone,
            "name" => Self::Name,
            "address" => Self::Address,
            "total" => Self::Total,
            "contact" => Self::Contact,
            "date" => Self::Date,
            "status" => Self::Status,
            "sku" => Self::Sku,
            "price" => Self::Price,
            "description" => Self::Description,
            _ => return None,
        };
        Some(category)
    }
}

impl fmt::Display for MatchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable explanation of one matching field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReason {
    pub category: MatchCategory,
    pub text: String,
}

impl MatchReason {
    pub fn new(category: MatchCategory, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
        }
    }
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Result of comparing two records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Similarity {
    /// Aggregate score, 0–100
    pub score: u8,
    /// Triggered reasons in field order
    pub reasons: Vec<MatchReason>,
}

impl Similarity {
    /// Reason texts, in order.
    pub fn reason_texts(&self) -> Vec<&str> {
        self.reasons.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn has_category(&self, category: MatchCategory) -> bool {
        self.reasons.iter().any(|r| r.category == category)
    }
}

/// Two records together with their comparison result.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredPair<'a, T> {
    pub left: &'a T,
    pub right: &'a T,
    pub similarity: Similarity,
}

/// Pairwise comparison capability for one entity type.
pub trait Scorer<T> {
    /// Score a pair. Must be symmetric in the records' *fields*; the
    /// clusterer always passes the anchor first.
    fn score(&self, a: &T, b: &T) -> Similarity;

    /// Category reported for a group whose reasons name no field.
    fn fallback_category(&self) -> MatchCategory;

    fn compare<'a>(&self, left: &'a T, right: &'a T) -> ScoredPair<'a, T> {
        ScoredPair {
            left,
            right,
            similarity: self.score(left, right),
        }
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Minimum similarity and the factor applied to it when reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuzzyTier {
    pub min: u8,
    pub factor: f64,
}

/// Text field rule: full credit on exact match, scaled credit on fuzzy tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRule {
    /// Credit for an exact match; also the field's weight
    pub exact: f64,
    /// Checked in order, first hit wins
    pub tiers: Vec<FuzzyTier>,
}

impl TextRule {
    pub(crate) fn new(exact: f64, tiers: &[(u8, f64)]) -> Self {
        Self {
            exact,
            tiers: tiers
                .iter()
                .map(|&(min, factor)| FuzzyTier { min, factor })
                .collect(),
        }
    }

    /// Credit earned by a similarity, `None` when no tier is reached.
    pub fn credit(&self, sim: u8) -> Option<f64> {
        if sim == 100 {
            return Some(self.exact);
        }
        self.tiers
            .iter()
            .find(|t| sim >= t.min)
            .map(|t| t.factor * f64::from(sim))
    }
}

/// Maximum percentage difference and the credit it earns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentTier {
    pub max_pct: f64,
    pub credit: f64,
}

/// How a numeric amount comparison matched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum AmountMatch {
    Exact,
    WithinCent,
    Percent(f64),
}

/// Amount rule: exact, within one cent, then percentage-difference tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountRule {
    /// Credit for equal amounts; also the field's weight
    pub exact: f64,
    pub within_cent: f64,
    pub tiers: Vec<PercentTier>,
}

impl AmountRule {
    pub(crate) fn new(exact: f64, within_cent: f64, tiers: &[(f64, f64)]) -> Self {
        Self {
            exact,
            within_cent,
            tiers: tiers
                .iter()
                .map(|&(max_pct, credit)| PercentTier { max_pct, credit })
                .collect(),
        }
    }

    /// Compare two amounts. Differences are measured against the average of
    /// the two; a zero average never matches on percentage.
    pub(crate) fn compare(&self, a: f64, b: f64) -> Option<(f64, AmountMatch)> {
        if a == b {
            return Some((self.exact, AmountMatch::Exact));
        }
        // NaN for two same-sign amounts whose cents overflow; no cent tier then
        let cents = (to_cents(a) - to_cents(b)).abs();
        if cents == 0.0 {
            return Some((self.exact, AmountMatch::Exact));
        }
        if cents <= 1.0 {
            return Some((self.within_cent, AmountMatch::WithinCent));
        }

        let average = a / 2.0 + b / 2.0;
        if average == 0.0 {
            return None;
        }
        let pct = ((a - b) / average).abs() * 100.0;
        self.tiers
            .iter()
            .find(|t| pct <= t.max_pct)
            .map(|t| (t.credit, AmountMatch::Percent(pct)))
    }
}

// ---------------------------------------------------------------------------
// Accumulator
// ---------------------------------------------------------------------------

/// Weighted running total of field credits.
#[derive(Debug, Default)]
pub(crate) struct FieldTally {
    credit: f64,
    weight: f64,
    reasons: Vec<MatchReason>,
}

impl FieldTally {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Field participated but earned nothing.
    pub(crate) fn miss(&mut self, weight: f64) {
        self.weight += weight;
    }

    pub(crate) fn hit(&mut self, weight: f64, credit: f64, reason: MatchReason) {
        self.weight += weight;
        self.credit += credit;
        self.reasons.push(reason);
    }

    /// Score a participating text field against its rule. The fuzzy reason
    /// text is built from the similarity only when a fuzzy tier is reached.
    pub(crate) fn text(
        &mut self,
        rule: &TextRule,
        sim: u8,
        category: MatchCategory,
        exact: &str,
        fuzzy: impl FnOnce(u8) -> String,
    ) {
        match rule.credit(sim) {
            Some(credit) if sim == 100 => {
                self.hit(rule.exact, credit, MatchReason::new(category, exact))
            }
            Some(credit) => self.hit(rule.exact, credit, MatchReason::new(category, fuzzy(sim))),
            None => self.miss(rule.exact),
        }
    }

    pub(crate) fn finish(self) -> Similarity {
        let score = if self.weight > 0.0 {
            (self.credit / self.weight * 100.0).round().clamp(0.0, 100.0) as u8
        } else {
            0
        };
        Similarity {
            score,
            reasons: self.reasons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: Option<f64>, expected: f64) -> bool {
        actual.map_or(false, |v| (v - expected).abs() < 1e-9)
    }

    #[test]
    fn text_rule_tiers() {
        let rule = TextRule::new(80.0, &[(85, 0.8), (70, 0.6)]);
        assert_eq!(rule.credit(100), Some(80.0));
        assert!(approx(rule.credit(90), 72.0));
        assert!(approx(rule.credit(70), 42.0));
        assert_eq!(rule.credit(69), None);
    }

    #[test]
    fn amount_rule_cents_and_percent() {
        let rule = AmountRule::new(100.0, 95.0, &[(5.0, 85.0), (10.0, 70.0)]);
        assert_eq!(rule.compare(100.0, 100.0).map(|m| m.0), Some(100.0));
        assert_eq!(rule.compare(100.0, 100.01).map(|m| m.0), Some(95.0));
        assert_eq!(rule.compare(100.0, 104.0).map(|m| m.0), Some(85.0));
        assert_eq!(rule.compare(100.0, 109.0).map(|m| m.0), Some(70.0));
        assert_eq!(rule.compare(100.0, 150.0), None);
    }

    #[test]
    fn amount_rule_zero_average_never_matches_on_percent() {
        let rule = AmountRule::new(100.0, 95.0, &[(5.0, 85.0)]);
        assert_eq!(rule.compare(-5.0, 5.0), None);
    }

    #[test]
    fn amount_rule_handles_extreme_amounts() {
        let rule = AmountRule::new(100.0, 95.0, &[(5.0, 85.0), (10.0, 70.0)]);
        assert_eq!(rule.compare(1e300, -1e300), None);
        assert_eq!(rule.compare(-1e300, 0.0), None);
        assert_eq!(rule.compare(f64::MAX, -f64::MAX), None);
        assert_eq!(rule.compare(f64::MAX, f64::MAX).map(|m| m.0), Some(100.0));
        assert_eq!(rule.compare(1e300, 1.02e300).map(|m| m.0), Some(85.0));
    }

    #[test]
    fn empty_tally_scores_zero() {
        let sim = FieldTally::new().finish();
        assert_eq!(sim.score, 0);
        assert!(sim.reasons.is_empty());
    }

    #[test]
    fn tally_weights_fields() {
        let mut tally = FieldTally::new();
        tally.hit(100.0, 100.0, MatchReason::new(MatchCategory::Email, "Exact email match"));
        tally.miss(80.0);
        // 100 / 180
        assert_eq!(tally.finish().score, 56);
    }

    #[test]
    fn category_names_roundtrip() {
        for category in [MatchCategory::Email, MatchCategory::Sku, MatchCategory::Description] {
            assert_eq!(MatchCategory::parse(category.as_str()), Some(category));
        }
    }
}
