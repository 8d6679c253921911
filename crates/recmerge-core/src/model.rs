//! Record types compared and merged by the engine.
//!
//! Records are plain values supplied by the persistence layer. Decimal
//! amounts and order dates stay as text, exactly as they were stored, and
//! are parsed leniently when compared (see [`crate::blank`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A person or company in the address book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An order as seen by duplicate detection.
///
/// `contact_name` is denormalized from the referenced contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub contact_id: String,
    #[serde(default)]
    pub contact_name: String,
    /// Decimal text, e.g. `"100.00"`
    #[serde(default)]
    pub total: String,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    #[serde(default)]
    pub order_date: String,
    #[serde(default)]
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Decimal text, e.g. `"24.99"`
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

/// Identity and recency shared by every entity type.
pub trait Record {
    fn id(&self) -> &str;
    fn updated_at(&self) -> DateTime<Utc>;
}

impl Record for Contact {
    fn id(&self) -> &str {
        &self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Record for Order {
    fn id(&self) -> &str {
        &self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Record for Product {
    fn id(&self) -> &str {
        &self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

// ---------------------------------------------------------------------------
// Merge output
// ---------------------------------------------------------------------------

/// Field set to persist over the primary contact's id.
///
/// `created_at` is the earlier of the two inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Field set to persist over the primary order's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedOrder {
    pub contact_id: String,
    pub contact_name: String,
    pub total: String,
    pub order_date: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Field set to persist over the primary product's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedProduct {
    pub name: String,
    pub description: String,
    pub price: String,
    pub sku: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
