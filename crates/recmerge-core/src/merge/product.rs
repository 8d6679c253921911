use chrono::{DateTime, Utc};

use super::{FieldPicker, MergeOutcome, Mergeable};
use crate::model::{MergedProduct, Product};

/// Merge two duplicate products into the field set to persist over
/// `primary`'s id. `is_active` follows the most recently updated record.
pub fn smart_merge_product(primary: &Product, other: &Product) -> MergedProduct {
    primary.smart_merge(other).merged
}

impl Mergeable for Product {
    type Merged = MergedProduct;

    fn smart_merge(&self, other: &Self) -> MergeOutcome<MergedProduct> {
        let mut pick = FieldPicker::new(self, other);

        let merged = MergedProduct {
            name: pick.text("name", &self.name, &other.name),
            description: pick.text("description", &self.description, &other.description),
            price: pick.amount("price", &self.price, &other.price),
            sku: pick.text("sku", &self.sku, &other.sku),
            is_active: pick.flag("is_active", self.is_active, other.is_active),
            created_at: self.created_at,
        };
        pick.finish(merged)
    }

    fn absorb(&self, merged: MergedProduct, updated_at: DateTime<Utc>) -> Self {
        Self {
            id: self.id.clone(),
            name: merged.name,
            description: merged.description,
            price: merged.price,
            sku: merged.sku,
            is_active: merged.is_active,
            created_at: merged.created_at,
            updated_at,
        }
    }
}
