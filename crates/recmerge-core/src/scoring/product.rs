//! Product scoring: SKU, name, price, description.

use serde::{Deserialize, Serialize};

use super::{AmountMatch, AmountRule, FieldTally, MatchCategory, MatchReason, Scorer, Similarity, TextRule};
use crate::blank::{is_blank, parse_amount};
use crate::model::Product;
use crate::similarity::similarity;

pub const SKU_EXACT: f64 = 100.0;
pub const SKU_CLOSE_MIN: u8 = 90;
pub const SKU_NEAR_MIN: u8 = 80;
pub const SKU_NEAR_FACTOR: f64 = 0.9;
pub const NAME_EXACT: f64 = 95.0;
pub const NAME_TIERS: [(u8, f64); 3] = [(90, 0.9), (80, 0.8), (70, 0.6)];
pub const PRICE_EXACT: f64 = 85.0;
pub const PRICE_WITHIN_CENT: f64 = 80.0;
pub const PRICE_TIERS: [(f64, f64); 2] = [(5.0, 75.0), (10.0, 65.0)];
pub const DESCRIPTION_EXACT: f64 = 70.0;
pub const DESCRIPTION_TIERS: [(u8, f64); 2] = [(85, 0.6), (70, 0.4)];

/// Field rules for products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductScoring {
    pub sku: TextRule,
    /// Participates unless blank on both sides
    pub name: TextRule,
    /// Participates only when a tier is reached
    pub price: AmountRule,
    pub description: TextRule,
}

impl Default for ProductScoring {
    fn default() -> Self {
        Self {
            sku: TextRule::new(SKU_EXACT, &[(SKU_CLOSE_MIN, 1.0), (SKU_NEAR_MIN, SKU_NEAR_FACTOR)]),
            name: TextRule::new(NAME_EXACT, &NAME_TIERS),
            price: AmountRule::new(PRICE_EXACT, PRICE_WITHIN_CENT, &PRICE_TIERS),
            description: TextRule::new(DESCRIPTION_EXACT, &DESCRIPTION_TIERS),
        }
    }
}

/// Scores product pairs.
#[derive(Debug, Clone, Default)]
pub struct ProductScorer {
    config: ProductScoring,
}

impl ProductScorer {
    pub fn new(config: ProductScoring) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProductScoring {
        &self.config
    }
}

impl Scorer<Product> for ProductScorer {
    fn score(&self, a: &Product, b: &Product) -> Similarity {
        let cfg = &self.config;
        let mut tally = FieldTally::new();

        if !is_blank(&a.sku) && !is_blank(&b.sku) {
            tally.text(
                &cfg.sku,
                similarity(&a.sku, &b.sku),
                MatchCategory::Sku,
                "Exact SKU match",
                |sim| format!("Similar SKU ({sim}%)"),
            );
        }

        if !is_blank(&a.name) || !is_blank(&b.name) {
            tally.text(
                &cfg.name,
                similarity(&a.name, &b.name),
                MatchCategory::Name,
                "Exact name match",
                |sim| format!("Similar name ({sim}%)"),
            );
        }

        if let (Some(price_a), Some(price_b)) = (parse_amount(&a.price), parse_amount(&b.price)) {
            if let Some((credit, how)) = cfg.price.compare(price_a, price_b) {
                let text = match how {
                    AmountMatch::Exact => "Exact price match".to_string(),
                    AmountMatch::WithinCent => "Nearly identical price".to_string(),
                    AmountMatch::Percent(pct) => format!("Similar price ({pct:.1}% difference)"),
                };
                tally.hit(cfg.price.exact, credit, MatchReason::new(MatchCategory::Price, text));
            }
        }

        if !is_blank(&a.description) && !is_blank(&b.description) {
            tally.text(
                &cfg.description,
                similarity(&a.description, &b.description),
                MatchCategory::Description,
                "Exact description match",
                |sim| format!("Similar description ({sim}%)"),
            );
        }

        tally.finish()
    }

    fn fallback_category(&self) -> MatchCategory {
        MatchCategory::Description
    }
}
