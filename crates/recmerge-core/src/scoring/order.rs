//! Order scoring: total, contact name, order date, status.

use serde::{Deserialize, Serialize};

use super::{AmountMatch, AmountRule, FieldTally, MatchCategory, MatchReason, Scorer, Similarity, TextRule};
use crate::blank::{is_blank, parse_amount, parse_date};
use crate::model::Order;
use crate::similarity::similarity;

pub const TOTAL_EXACT: f64 = 100.0;
pub const TOTAL_WITHIN_CENT: f64 = 95.0;
pub const TOTAL_CLOSE_PCT: f64 = 5.0;
pub const TOTAL_CLOSE: f64 = 85.0;
pub const TOTAL_NEAR_PCT: f64 = 10.0;
pub const TOTAL_NEAR: f64 = 70.0;
pub const CONTACT_EXACT: f64 = 100.0;
pub const CONTACT_SIMILAR_MIN: u8 = 90;
pub const CONTACT_SIMILAR_FACTOR: f64 = 0.9;
pub const CONTACT_PARTIAL_MIN: u8 = 70;
pub const CONTACT_PARTIAL_FACTOR: f64 = 0.7;
pub const STATUS_EXACT: f64 = 60.0;
pub const STATUS_FUZZY_MIN: u8 = 80;
pub const STATUS_FUZZY_FACTOR: f64 = 0.5;

/// Day-difference tiers for order dates, checked in order.
pub const DATE_TIERS: [(f64, f64); 4] = [(0.0, 80.0), (1.0, 70.0), (7.0, 60.0), (30.0, 40.0)];

/// Maximum day difference and the credit it earns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayTier {
    pub max_days: f64,
    pub credit: f64,
}

/// Field rules for orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderScoring {
    /// Participates only when a tier is reached
    pub total: AmountRule,
    pub contact_name: TextRule,
    /// First tier is the same-day credit and the field's weight
    pub date: Vec<DayTier>,
    pub status: TextRule,
}

impl Default for OrderScoring {
    fn default() -> Self {
        Self {
            total: AmountRule::new(
                TOTAL_EXACT,
                TOTAL_WITHIN_CENT,
                &[(TOTAL_CLOSE_PCT, TOTAL_CLOSE), (TOTAL_NEAR_PCT, TOTAL_NEAR)],
            ),
            contact_name: TextRule::new(
                CONTACT_EXACT,
                &[
                    (CONTACT_SIMILAR_MIN, CONTACT_SIMILAR_FACTOR),
                    (CONTACT_PARTIAL_MIN, CONTACT_PARTIAL_FACTOR),
                ],
            ),
            date: DATE_TIERS
                .iter()
                .map(|&(max_days, credit)| DayTier { max_days, credit })
                .collect(),
            status: TextRule::new(STATUS_EXACT, &[(STATUS_FUZZY_MIN, STATUS_FUZZY_FACTOR)]),
        }
    }
}

/// Scores order pairs.
#[derive(Debug, Clone, Default)]
pub struct OrderScorer {
    config: OrderScoring,
}

impl OrderScorer {
    pub fn new(config: OrderScoring) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OrderScoring {
        &self.config
    }

    fn score_date(&self, tally: &mut FieldTally, a: &Order, b: &Order) {
        let (Some(date_a), Some(date_b)) = (parse_date(&a.order_date), parse_date(&b.order_date))
        else {
            return;
        };
        let Some(weight) = self.config.date.first().map(|t| t.credit) else {
            return;
        };

        let days = (date_a - date_b).num_seconds().abs() as f64 / 86_400.0;
        match self.config.date.iter().find(|t| days <= t.max_days) {
            Some(tier) => {
                let text = if days == 0.0 {
                    "Same order date".to_string()
                } else {
                    let whole = days.ceil() as i64;
                    let unit = if whole == 1 { "day" } else { "days" };
                    format!("Order dates within {whole} {unit}")
                };
                tally.hit(weight, tier.credit, MatchReason::new(MatchCategory::Date, text));
            }
            None => tally.miss(weight),
        }
    }
}

impl Scorer<Order> for OrderScorer {
    fn score(&self, a: &Order, b: &Order) -> Similarity {
        let cfg = &self.config;
        let mut tally = FieldTally::new();

        if let (Some(total_a), Some(total_b)) = (parse_amount(&a.total), parse_amount(&b.total)) {
            if let Some((credit, how)) = cfg.total.compare(total_a, total_b) {
                let text = match how {
                    AmountMatch::Exact => "Exact total match".to_string(),
                    AmountMatch::WithinCent => "Nearly identical total".to_string(),
                    AmountMatch::Percent(pct) => format!("Similar total ({pct:.1}% difference)"),
                };
                tally.hit(cfg.total.exact, credit, MatchReason::new(MatchCategory::Total, text));
            }
        }

        if !is_blank(&a.contact_name) && !is_blank(&b.contact_name) {
            tally.text(
                &cfg.contact_name,
                similarity(&a.contact_name, &b.contact_name),
                MatchCategory::Contact,
                "Same contact name",
                |sim| format!("Similar contact name ({sim}%)"),
            );
        }

        self.score_date(&mut tally, a, b);

        if !is_blank(&a.status) && !is_blank(&b.status) {
            tally.text(
                &cfg.status,
                similarity(&a.status, &b.status),
                MatchCategory::Status,
                "Same status",
                |sim| format!("Similar status ({sim}%)"),
            );
        }

        tally.finish()
    }

    fn fallback_category(&self) -> MatchCategory {
        MatchCategory::Status
    }
}
