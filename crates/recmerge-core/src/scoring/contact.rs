//! Contact scoring: email, phone, name, address.

use serde::{Deserialize, Serialize};

use super::{FieldTally, MatchCategory, MatchReason, Scorer, Similarity, TextRule};
use crate::blank::is_blank;
use crate::model::Contact;
use crate::similarity::{digits_only, similarity};

pub const EMAIL_EXACT: f64 = 100.0;
pub const EMAIL_FUZZY_MIN: u8 = 80;
pub const PHONE_EXACT: f64 = 95.0;
pub const PHONE_FUZZY_MIN: u8 = 80;
pub const PHONE_FUZZY_FACTOR: f64 = 0.9;
pub const NAME_EXACT: f64 = 80.0;
pub const NAME_SIMILAR_MIN: u8 = 85;
pub const NAME_SIMILAR_FACTOR: f64 = 0.8;
pub const NAME_PARTIAL_MIN: u8 = 70;
pub const NAME_PARTIAL_FACTOR: f64 = 0.6;
pub const ADDRESS_MIN: u8 = 90;
pub const ADDRESS_FACTOR: f64 = 0.5;

/// Field rules for contacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactScoring {
    pub email: TextRule,
    /// Compared on digits only
    pub phone: TextRule,
    /// Participates unless blank on both sides
    pub name: TextRule,
    /// Address and city together; participates only when a tier is reached
    pub address: TextRule,
}

impl Default for ContactScoring {
    fn default() -> Self {
        Self {
            email: TextRule::new(EMAIL_EXACT, &[(EMAIL_FUZZY_MIN, 1.0)]),
            phone: TextRule::new(PHONE_EXACT, &[(PHONE_FUZZY_MIN, PHONE_FUZZY_FACTOR)]),
            name: TextRule::new(
                NAME_EXACT,
                &[
                    (NAME_SIMILAR_MIN, NAME_SIMILAR_FACTOR),
                    (NAME_PARTIAL_MIN, NAME_PARTIAL_FACTOR),
                ],
            ),
            address: TextRule::new(ADDRESS_FACTOR * 100.0, &[(ADDRESS_MIN, ADDRESS_FACTOR)]),
        }
    }
}

/// Scores contact pairs.
#[derive(Debug, Clone, Default)]
pub struct ContactScorer {
    config: ContactScoring,
}

impl ContactScorer {
    pub fn new(config: ContactScoring) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ContactScoring {
        &self.config
    }
}

impl Scorer<Contact> for ContactScorer {
    fn score(&self, a: &Contact, b: &Contact) -> Similarity {
        let cfg = &self.config;
        let mut tally = FieldTally::new();

        if !is_blank(&a.email) && !is_blank(&b.email) {
            tally.text(
                &cfg.email,
                similarity(&a.email, &b.email),
                MatchCategory::Email,
                "Exact email match",
                |sim| format!("Similar email ({sim}%)"),
            );
        }

        let phone_a = digits_only(&a.phone);
        let phone_b = digits_only(&b.phone);
        if !phone_a.is_empty() && !phone_b.is_empty() {
            tally.text(
                &cfg.phone,
                similarity(&phone_a, &phone_b),
                MatchCategory::Phone,
                "Exact phone match",
                |sim| format!("Similar phone ({sim}%)"),
            );
        }

        // Name participates even when far apart or blank on one side
        if !is_blank(&a.name) || !is_blank(&b.name) {
            let close_name = cfg.name.tiers.first().map_or(100, |t| t.min);
            tally.text(
                &cfg.name,
                similarity(&a.name, &b.name),
                MatchCategory::Name,
                "Exact name match",
                |sim| {
                    if sim >= close_name {
                        format!("Similar name ({sim}%)")
                    } else {
                        format!("Partially similar name ({sim}%)")
                    }
                },
            );
        }

        let place_a = format!("{} {}", a.address.trim(), a.city.trim()).to_lowercase();
        let place_b = format!("{} {}", b.address.trim(), b.city.trim()).to_lowercase();
        let sim = similarity(&place_a, &place_b);
        if let Some(credit) = cfg.address.credit(sim) {
            tally.hit(
                cfg.address.exact,
                credit,
                MatchReason::new(MatchCategory::Address, format!("Similar address ({sim}%)")),
            );
        }

        tally.finish()
    }

    fn fallback_category(&self) -> MatchCategory {
        MatchCategory::Address
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn contact(name: &str, email: &str, phone: &str) -> Contact {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Contact {
            id: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip: String::new(),
            notes: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn self_match_is_100() {
        let mut c = contact("Jane Roe", "jane@example.com", "555-123-4567");
        c.address = "12 Main St".to_string();
        c.city = "Springfield".to_string();
        let sim = ContactScorer::default().score(&c, &c);
        assert_eq!(sim.score, 100);
        assert_eq!(
            sim.reason_texts(),
            vec![
                "Exact email match",
                "Exact phone match",
                "Exact name match",
                "Similar address (100%)"
            ]
        );
    }

    #[test]
    fn email_and_fuzzy_name() {
        let a = contact("John Doe", "john@ex.com", "5551234567");
        let b = contact("Jon Doe", "john@ex.com", "");
        let sim = ContactScorer::default().score(&a, &b);
        // (100 + 0.8 * 88) / (100 + 80)
        assert_eq!(sim.score, 95);
        assert_eq!(sim.reason_texts(), vec!["Exact email match", "Similar name (88%)"]);
    }

    #[test]
    fn phone_formatting_is_ignored() {
        let a = contact("Ann Lee", "", "(555) 123-4567");
        let b = contact("Ann Lee", "", "555.123.4567");
        let sim = ContactScorer::default().score(&a, &b);
        assert!(sim.has_category(MatchCategory::Phone));
        assert_eq!(sim.score, 100);
    }

    #[test]
    fn different_email_counts_against() {
        let a = contact("Sam Poe", "sam@one.com", "");
        let b = contact("Sam Poe", "other@two.org", "");
        let sim = ContactScorer::default().score(&a, &b);
        // 80 / 180
        assert_eq!(sim.score, 44);
        assert_eq!(sim.reason_texts(), vec!["Exact name match"]);
    }

    #[test]
    fn unrelated_names_score_zero() {
        let a = contact("John Doe", "", "");
        let b = contact("Unrelated Person", "", "");
        let sim = ContactScorer::default().score(&a, &b);
        assert_eq!(sim.score, 0);
        assert!(sim.reasons.is_empty());
    }

    #[test]
    fn blank_names_are_skipped() {
        let c = contact("", "a@b.com", "5551234567");
        let sim = ContactScorer::default().score(&c, &c);
        assert_eq!(sim.score, 100);
        assert!(!sim.has_category(MatchCategory::Name));
    }

    #[test]
    fn one_blank_name_still_counts() {
        let a = contact("", "a@b.com", "");
        let b = contact("Ann Lee", "a@b.com", "");
        // 100 / 180
        assert_eq!(ContactScorer::default().score(&a, &b).score, 56);
    }

    #[test]
    fn fallback_is_lowest_priority_field() {
        assert_eq!(ContactScorer::default().fallback_category(), MatchCategory::Address);
    }

    #[test]
    fn partial_name_tier() {
        // two substitutions over ten characters
        let a = contact("Mark Jones", "", "");
        let b = contact("Marc Jonas", "", "");
        let sim = ContactScorer::default().score(&a, &b);
        assert_eq!(sim.reason_texts(), vec!["Partially similar name (80%)"]);
        // 0.6 * 80 / 80
        assert_eq!(sim.score, 60);
    }
}
