use chrono::{DateTime, Utc};

use super::{FieldPicker, MergeOutcome, Mergeable};
use crate::model::{MergedOrder, Order};

/// Merge two duplicate orders into the field set to persist over
/// `primary`'s id. A zero total never replaces a nonzero one.
pub fn smart_merge_order(primary: &Order, other: &Order) -> MergedOrder {
    primary.smart_merge(other).merged
}

impl Mergeable for Order {
    type Merged = MergedOrder;

    fn smart_merge(&self, other: &Self) -> MergeOutcome<MergedOrder> {
        let mut pick = FieldPicker::new(self, other);

        let merged = MergedOrder {
            contact_id: pick.text("contact_id", &self.contact_id, &other.contact_id),
            contact_name: pick.text("contact_name", &self.contact_name, &other.contact_name),
            total: pick.amount("total", &self.total, &other.total),
            order_date: pick.text("order_date", &self.order_date, &other.order_date),
            status: pick.text("status", &self.status, &other.status),
            created_at: self.created_at,
        };
        pick.finish(merged)
    }

    fn absorb(&self, merged: MergedOrder, updated_at: DateTime<Utc>) -> Self {
        Self {
            id: self.id.clone(),
            contact_id: merged.contact_id,
            contact_name: merged.contact_name,
            total: merged.total,
            order_date: merged.order_date,
            status: merged.status,
            created_at: merged.created_at,
            updated_at,
        }
    }
}
