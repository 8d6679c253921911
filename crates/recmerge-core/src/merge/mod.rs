//! Smart merge of duplicate records.
//!
//! Field by field: a non-blank primary value is kept, otherwise a non-blank
//! value from the other record is taken, otherwise the value of whichever
//! record was updated last (primary on ties). Booleans always follow the
//! most recently updated record. Per-entity exceptions live in the entity
//! modules.

mod contact;
mod order;
mod product;

pub use contact::smart_merge_contact;
pub use order::smart_merge_order;
pub use product::smart_merge_product;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::blank::{is_blank, is_blank_amount};
use crate::cluster::DuplicateGroup;
use crate::error::{RecmergeError, Result};
use crate::model::Record;

/// Merged fields plus which of them came from the non-primary record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeOutcome<M> {
    pub merged: M,
    pub fields_from_other: Vec<&'static str>,
}

/// Entity types that can be merged into a canonical record.
pub trait Mergeable: Record + Clone {
    /// Field set persisted over the primary's id
    type Merged: Clone;

    /// Merge `other` into `self` (the primary).
    fn smart_merge(&self, other: &Self) -> MergeOutcome<Self::Merged>;

    /// The primary as it will look once `merged` is persisted over it.
    fn absorb(&self, merged: Self::Merged, updated_at: DateTime<Utc>) -> Self;
}

/// What the caller should persist and retire for one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergePlan<M> {
    /// Id whose record receives `merged`
    pub keep_id: String,
    /// Ids to delete or retire, in group order
    pub retire_ids: Vec<String>,
    pub merged: M,
    pub fields_from_other: Vec<&'static str>,
}

/// Fold every non-primary member of a group into the primary.
///
/// Members are merged one at a time in group order, each into the result of
/// the previous merge.
pub fn plan_merge<T: Mergeable>(
    group: &DuplicateGroup<T>,
    primary_index: usize,
) -> Result<MergePlan<T::Merged>> {
    let primary = group
        .members
        .get(primary_index)
        .ok_or(RecmergeError::PrimaryOutOfRange {
            index: primary_index,
            len: group.members.len(),
        })?;

    let mut current = primary.clone();
    let mut merged = primary.smart_merge(primary).merged;
    let mut fields_from_other: Vec<&'static str> = Vec::new();
    let mut retire_ids = Vec::new();

    for (k, other) in group.members.iter().enumerate() {
        if k == primary_index {
            continue;
        }
        let outcome = current.smart_merge(other);
        for field in outcome.fields_from_other {
            if !fields_from_other.contains(&field) {
                fields_from_other.push(field);
            }
        }
        let updated_at = current.updated_at().max(other.updated_at());
        current = current.absorb(outcome.merged.clone(), updated_at);
        merged = outcome.merged;
        retire_ids.push(other.id().to_string());
    }

    debug!(
        keep = primary.id(),
        retired = retire_ids.len(),
        from_other = fields_from_other.len(),
        "planned merge"
    );

    Ok(MergePlan {
        keep_id: primary.id().to_string(),
        retire_ids,
        merged,
        fields_from_other,
    })
}

// ---------------------------------------------------------------------------
// Field picking
// ---------------------------------------------------------------------------

/// Applies the per-field precedence rules and records provenance.
pub(crate) struct FieldPicker {
    other_is_newer: bool,
    from_other: Vec<&'static str>,
}

impl FieldPicker {
    pub(crate) fn new(primary: &impl Record, other: &impl Record) -> Self {
        Self {
            other_is_newer: other.updated_at() > primary.updated_at(),
            from_other: Vec::new(),
        }
    }

    fn pick(&mut self, field: &'static str, primary: &str, other: &str, blank: fn(&str) -> bool) -> String {
        if !blank(primary) {
            primary.to_string()
        } else if !blank(other) {
            self.from_other.push(field);
            other.to_string()
        } else if self.other_is_newer {
            other.to_string()
        } else {
            primary.to_string()
        }
    }

    pub(crate) fn text(&mut self, field: &'static str, primary: &str, other: &str) -> String {
        self.pick(field, primary, other, is_blank)
    }

    /// Zero and unparseable amounts count as blank.
    pub(crate) fn amount(&mut self, field: &'static str, primary: &str, other: &str) -> String {
        self.pick(field, primary, other, is_blank_amount)
    }

    /// Booleans have no blank state; the most recent record wins.
    pub(crate) fn flag(&mut self, field: &'static str, primary: bool, other: bool) -> bool {
        if self.other_is_newer {
            if other != primary {
                self.from_other.push(field);
            }
            other
        } else {
            primary
        }
    }

    pub(crate) fn note_from_other(&mut self, field: &'static str) {
        self.from_other.push(field);
    }

    pub(crate) fn finish<M>(self, merged: M) -> MergeOutcome<M> {
        MergeOutcome {
            merged,
            fields_from_other: self.from_other,
        }
    }
}
