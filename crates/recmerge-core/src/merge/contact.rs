use chrono::{DateTime, Utc};

use super::{FieldPicker, MergeOutcome, Mergeable};
use crate::model::{Contact, MergedContact};

/// Merge two duplicate contacts into the field set to persist over
/// `primary`'s id.
pub fn smart_merge_contact(primary: &Contact, other: &Contact) -> MergedContact {
    primary.smart_merge(other).merged
}

impl Mergeable for Contact {
    type Merged = MergedContact;

    fn smart_merge(&self, other: &Self) -> MergeOutcome<MergedContact> {
        let mut pick = FieldPicker::new(self, other);

        let name = pick.text("name", &self.name, &other.name);
        let email = pick.text("email", &self.email, &other.email);
        let phone = pick.text("phone", &self.phone, &other.phone);
        let address = pick.text("address", &self.address, &other.address);
        let city = pick.text("city", &self.city, &other.city);
        let state = pick.text("state", &self.state, &other.state);
        let zip = pick.text("zip", &self.zip, &other.zip);

        let notes = merge_notes(self.notes.as_deref(), other.notes.as_deref());
        let own_notes = self.notes.as_deref().map(str::trim).filter(|n| !n.is_empty());
        if notes.is_some() && notes.as_deref() != own_notes {
            pick.note_from_other("notes");
        }

        // The merged contact has existed since the older record was created
        let created_at = if other.created_at < self.created_at {
            pick.note_from_other("created_at");
            other.created_at
        } else {
            self.created_at
        };

        pick.finish(MergedContact {
            name,
            email,
            phone,
            address,
            city,
            state,
            zip,
            notes,
            created_at,
        })
    }

    fn absorb(&self, merged: MergedContact, updated_at: DateTime<Utc>) -> Self {
        Self {
            id: self.id.clone(),
            name: merged.name,
            email: merged.email,
            phone: merged.phone,
            address: merged.address,
            city: merged.city,
            state: merged.state,
            zip: merged.zip,
            notes: merged.notes,
            created_at: merged.created_at,
            updated_at,
        }
    }
}

/// Both notes present and different: primary first, blank line, other.
fn merge_notes(primary: Option<&str>, other: Option<&str>) -> Option<String> {
    let primary = primary.map(str::trim).filter(|s| !s.is_empty());
    let other = other.map(str::trim).filter(|s| !s.is_empty());

    match (primary, other) {
        (Some(p), Some(o)) if p != o => Some(format!("{p}\n\n{o}")),
        (Some(p), _) => Some(p.to_string()),
        (None, Some(o)) => Some(o.to_string()),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn contact(id: &str, created_day: u32, updated_day: u32) -> Contact {
        Contact {
            id: id.to_string(),
            name: "Lee Wong".to_string(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip: String::new(),
            notes: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, created_day, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 2, updated_day, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn primary_value_wins() {
        let mut a = contact("a", 1, 1);
        let mut b = contact("b", 1, 9);
        a.email = "x@example.com".to_string();
        b.email = "y@example.com".to_string();
        assert_eq!(smart_merge_contact(&a, &b).email, "x@example.com");
    }

    #[test]
    fn blank_primary_takes_other() {
        let a = contact("a", 1, 1);
        let mut b = contact("b", 1, 1);
        b.email = "y@example.com".to_string();
        let outcome = a.smart_merge(&b);
        assert_eq!(outcome.merged.email, "y@example.com");
        assert_eq!(outcome.fields_from_other, vec!["email"]);
    }

    #[test]
    fn whitespace_counts_as_blank() {
        let mut a = contact("a", 1, 1);
        let mut b = contact("b", 1, 1);
        a.city = "   ".to_string();
        b.city = "Portland".to_string();
        assert_eq!(smart_merge_contact(&a, &b).city, "Portland");
    }

    #[test]
    fn both_blank_stays_blank() {
        let a = contact("a", 1, 1);
        let b = contact("b", 1, 28);
        assert_eq!(smart_merge_contact(&a, &b).state, "");
        assert_eq!(smart_merge_contact(&b, &a).state, "");
    }

    #[test]
    fn notes_concatenate_when_different() {
        let mut a = contact("a", 1, 1);
        let mut b = contact("b", 1, 1);
        a.notes = Some("foo".to_string());
        b.notes = Some("bar".to_string());
        assert_eq!(smart_merge_contact(&a, &b).notes.as_deref(), Some("foo\n\nbar"));
    }

    #[test]
    fn identical_notes_are_not_duplicated() {
        let mut a = contact("a", 1, 1);
        let mut b = contact("b", 1, 1);
        a.notes = Some("foo".to_string());
        b.notes = Some("foo".to_string());
        let outcome = a.smart_merge(&b);
        assert_eq!(outcome.merged.notes.as_deref(), Some("foo"));
        assert!(outcome.fields_from_other.is_empty());
    }

    #[test]
    fn single_or_no_notes() {
        let a = contact("a", 1, 1);
        let mut b = contact("b", 1, 1);
        assert_eq!(smart_merge_contact(&a, &b).notes, None);
        b.notes = Some("call after 5pm".to_string());
        assert_eq!(smart_merge_contact(&a, &b).notes.as_deref(), Some("call after 5pm"));
        assert_eq!(smart_merge_contact(&b, &a).notes.as_deref(), Some("call after 5pm"));
        b.notes = Some("  ".to_string());
        assert_eq!(smart_merge_contact(&a, &b).notes, None);
    }

    #[test]
    fn created_at_uses_earliest() {
        let a = contact("a", 5, 1);
        let b = contact("b", 1, 1);
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(smart_merge_contact(&a, &b).created_at, expected);
        assert_eq!(smart_merge_contact(&b, &a).created_at, expected);
    }
}
